use crate::cursor::RemoteCursor;
use crate::mapping::PositionMap;
use crate::store::CursorSet;

/// Out-of-band payload a transition can carry alongside its document
/// change. The host engine attaches it when dispatching and the
/// reconciler reads it back here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionMeta {
    /// "The authoritative remote-cursor set is now exactly this."
    ReplaceCursors(Vec<RemoteCursor>),
}

/// One editor-state transition as seen by the reconciler: the position
/// mapping of the document change it performed, plus any out-of-band
/// cursor payload.
#[derive(Debug, Clone)]
pub struct Transition<M> {
    meta: Option<TransitionMeta>,
    change: M,
}

impl<M: PositionMap> Transition<M> {
    pub fn new(change: M) -> Self {
        Self { meta: None, change }
    }

    pub fn with_meta(mut self, meta: TransitionMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn meta(&self) -> Option<&TransitionMeta> {
        self.meta.as_ref()
    }

    pub fn change(&self) -> &M {
        &self.change
    }
}

/// Applies one transition to the previous cursor state and returns the
/// next one. `None` for `prev` means this is the first transition the
/// session has seen; it starts from the empty set.
///
/// A snapshot payload replaces the set wholesale and suppresses
/// remapping, whatever else the transition did to the document. Without a
/// payload the transition is a plain content change and every stored
/// position is pushed through its mapping, so remote carets stay put
/// while the local user types around them. Exactly one of the two paths
/// runs per transition.
pub fn reconcile<M: PositionMap>(prev: Option<CursorSet>, transition: &Transition<M>) -> CursorSet {
    let mut set = prev.unwrap_or_default();
    match transition.meta() {
        Some(TransitionMeta::ReplaceCursors(snapshot)) => set.replace(snapshot.clone()),
        None => set.remap_all(transition.change()),
    }
    set
}
