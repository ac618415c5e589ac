/// Contract consumed from the host editing engine: translate an offset in
/// the document before a change into the corresponding offset after it.
///
/// Offsets inside a deleted span land on the nearest surviving boundary;
/// offsets outside every changed span are untouched.
pub trait PositionMap {
    fn map_position(&self, pos: i64) -> i64;
}

/// Adapter for hosts whose mapping primitive is a plain function.
pub struct MapFn<F>(pub F);

impl<F: Fn(i64) -> i64> PositionMap for MapFn<F> {
    fn map_position(&self, pos: i64) -> i64 {
        (self.0)(pos)
    }
}

/// A change that moved nothing. Remapping through it is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl PositionMap for Identity {
    fn map_position(&self, pos: i64) -> i64 {
        pos
    }
}

/// One replaced span: `deleted` characters starting at `at` (old
/// coordinates) were replaced by `inserted` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    pub at: usize,
    pub deleted: usize,
    pub inserted: usize,
}

/// A concrete document-change description assembled from non-overlapping
/// splices, kept in ascending order of `at`.
///
/// Engine adapters build one of these per transition; it implements the
/// [`PositionMap`] contract exactly, so it also serves as the reference
/// mapping in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentChange {
    splices: Vec<Splice>,
}

impl DocumentChange {
    pub fn new() -> Self {
        Self::default()
    }

    /// An insertion of `len` characters at `at`.
    pub fn insertion(at: usize, len: usize) -> Self {
        Self::new().with_splice(at, 0, len)
    }

    /// A deletion of `len` characters starting at `at`.
    pub fn deletion(at: usize, len: usize) -> Self {
        Self::new().with_splice(at, len, 0)
    }

    pub fn with_splice(mut self, at: usize, deleted: usize, inserted: usize) -> Self {
        self.splices.push(Splice {
            at,
            deleted,
            inserted,
        });
        self.splices.sort_by_key(|s| s.at);
        self
    }

    pub fn splices(&self) -> &[Splice] {
        &self.splices
    }
}

impl PositionMap for DocumentChange {
    fn map_position(&self, pos: i64) -> i64 {
        let mut delta: i64 = 0;
        for s in &self.splices {
            let at = s.at as i64;
            if pos < at {
                break;
            }
            if pos < at + s.deleted as i64 {
                // Inside a deleted span: collapse to the span's start.
                return at + delta;
            }
            delta += s.inserted as i64 - s.deleted as i64;
        }
        pos + delta
    }
}
