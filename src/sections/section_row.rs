//! Logical coordinates of one list item.

use std::fmt;

/// A `(section, row)` pair addressing one item of a sectioned list.
///
/// Never stored by the list itself; recomputed from a flat position on
/// every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionRow {
    pub section: usize,
    pub row: usize,
}

impl SectionRow {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    pub fn section(&self) -> usize {
        self.section
    }

    pub fn row(&self) -> usize {
        self.row
    }
}

impl fmt::Display for SectionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}
