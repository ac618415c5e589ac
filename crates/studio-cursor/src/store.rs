use tracing::debug;

use crate::cursor::RemoteCursor;
use crate::mapping::PositionMap;

pub type Timestamp = i64;

pub(crate) fn get_sys_timestamp() -> Timestamp {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

/// One stored cursor plus the local wall-clock time at which the snapshot
/// carrying it was installed. The stamp is purely local bookkeeping and is
/// never compared against remote clocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorEntry {
    pub cursor: RemoteCursor,
    pub updated_at: Timestamp,
}

/// The authoritative local view of every remote collaborator's caret.
///
/// A pure replace-by-snapshot structure: a network update swaps the whole
/// set, a local edit remaps positions in place, and nothing else touches
/// it. Entries keep the order the snapshot arrived in. One live session
/// owns one of these; it is not shared across documents.
#[derive(Debug, Clone, Default)]
pub struct CursorSet {
    entries: Vec<CursorEntry>,
}

impl CursorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every existing entry and installs `snapshot` verbatim.
    ///
    /// No validation happens here; missing and out-of-range positions are
    /// tolerated and dealt with at projection time, so a corrupt remote
    /// update can never take down the local session.
    pub fn replace(&mut self, snapshot: Vec<RemoteCursor>) {
        let now = get_sys_timestamp();
        debug!(cursors = snapshot.len(), "installing remote cursor snapshot");
        self.entries = snapshot
            .into_iter()
            .map(|cursor| CursorEntry {
                cursor,
                updated_at: now,
            })
            .collect();
    }

    /// Pushes every placed cursor through `mapping`. Entries without a
    /// position pass through untouched; no entry is added, dropped, or
    /// reordered.
    pub fn remap_all<M: PositionMap + ?Sized>(&mut self, mapping: &M) {
        for entry in &mut self.entries {
            if let Some(pos) = entry.cursor.position {
                entry.cursor.position = Some(mapping.map_position(pos));
            }
        }
    }

    /// The present snapshot, in arrival order.
    pub fn current(&self) -> &[CursorEntry] {
        &self.entries
    }

    pub fn cursors(&self) -> impl Iterator<Item = &RemoteCursor> {
        self.entries.iter().map(|e| &e.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
