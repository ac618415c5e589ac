//! The per-document editing session.

use studio_cursor::{
    project, reconcile, CursorMarker, CursorSet, Identity, PositionMap, RemoteCursor, Transition,
    TransitionMeta,
};

use crate::protocol::WireMessage;

/// Remote-cursor state for one open document.
///
/// Constructed when the editor view is built and dropped with it: one
/// session per document, never a process-wide value, so several documents
/// can be open in the same process. The host engine drives it serially:
/// inbound server messages and local document changes each become one
/// transition, applied before the next one starts.
#[derive(Debug, Default)]
pub struct EditorSession {
    cursors: CursorSet,
}

impl EditorSession {
    /// A fresh session with no known collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one inbound server message. Only cursor updates touch this
    /// session; anything else is left to the caller and `false` comes
    /// back.
    pub fn handle_message(&mut self, msg: &WireMessage) -> bool {
        match msg {
            WireMessage::CursorUpdate { cursors } => {
                self.apply_remote_snapshot(cursors.clone());
                true
            }
            _ => false,
        }
    }

    /// The server said: this is the complete remote-cursor set now.
    pub fn apply_remote_snapshot(&mut self, snapshot: Vec<RemoteCursor>) {
        self.apply(Transition::new(Identity).with_meta(TransitionMeta::ReplaceCursors(snapshot)));
    }

    /// The local document changed; carry every stored caret across it.
    pub fn apply_local_change<M: PositionMap>(&mut self, change: M) {
        self.apply(Transition::new(change));
    }

    fn apply<M: PositionMap>(&mut self, transition: Transition<M>) {
        let prev = std::mem::take(&mut self.cursors);
        self.cursors = reconcile(Some(prev), &transition);
    }

    /// Decoration supplier for the host's render pass: the current set as
    /// placed, clamped markers. Read-only; safe to call every frame.
    pub fn decorations(&self, doc_len: usize) -> Vec<CursorMarker> {
        project(&self.cursors, doc_len)
    }

    pub fn cursors(&self) -> &CursorSet {
        &self.cursors
    }
}
