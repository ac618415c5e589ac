use crate::cursor::Side;
use crate::store::CursorSet;

/// A positioned, clamped visual marker ready for the host's overlay
/// layer. Purely descriptive; building the actual widget is the
/// renderer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMarker {
    /// Reconciliation key for re-renders: the collaborator id. Keyed
    /// markers let the renderer move an existing widget instead of
    /// flickering it.
    pub key: String,
    pub position: usize,
    /// Always [`Side::Left`]: the marker attaches to the character before
    /// its offset so it sits at the caret itself, not after the next
    /// character.
    pub side: Side,
    pub color: String,
    pub label: String,
}

/// Projects the current snapshot onto a document of length `doc_len`.
///
/// Read-only and infallible; safe to call on every render pass. Entries
/// with no position produce no marker, and every other position is
/// clamped into `[0, doc_len]`, the last line of defense against a
/// cursor update racing a local edit. A stale position degrades to a
/// clamped marker rather than disappearing or failing the render.
pub fn project(set: &CursorSet, doc_len: usize) -> Vec<CursorMarker> {
    let mut markers = Vec::with_capacity(set.len());
    for entry in set.current() {
        let Some(pos) = entry.cursor.position else {
            continue;
        };
        markers.push(CursorMarker {
            key: entry.cursor.id.clone(),
            position: pos.clamp(0, doc_len as i64) as usize,
            side: Side::Left,
            color: entry.cursor.color.clone(),
            label: entry.cursor.name.clone(),
        });
    }
    markers
}
