use serde::{Deserialize, Serialize};

/// One remote collaborator's caret as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteCursor {
    /// Stable identifier of the collaborator. Unique within a snapshot.
    pub id: String,
    /// Offset into the document's linear content model. A client that has
    /// not placed its caret yet reports none; stale offsets may be out of
    /// range and are clamped at projection time, never here.
    #[serde(rename = "pos", default)]
    pub position: Option<i64>,
    /// Display color token.
    pub color: String,
    /// Display label.
    pub name: String,
}

impl RemoteCursor {
    pub fn new(id: impl Into<String>, position: Option<i64>) -> Self {
        Self {
            id: id.into(),
            position,
            color: String::new(),
            name: String::new(),
        }
    }

    pub fn with_display(mut self, color: impl Into<String>, name: impl Into<String>) -> Self {
        self.color = color.into();
        self.name = name.into();
        self
    }
}

/// Which side of its offset a marker attaches to.
///
/// Side info determines where a widget lands when content is inserted at
/// the exact marker offset.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left = -1,
    #[default]
    Middle = 0,
    Right = 1,
}

impl Side {
    pub fn from_i32(i: i32) -> Option<Self> {
        match i {
            -1 => Some(Self::Left),
            0 => Some(Self::Middle),
            1 => Some(Self::Right),
            _ => None,
        }
    }

    pub fn to_i32(&self) -> i32 {
        *self as i32
    }
}
