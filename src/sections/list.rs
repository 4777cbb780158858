//! Position-to-section addressing over a list of sections.
//!
//! The flat position space is the concatenation of every section's items in
//! section order, so for sections `S_0..S_n`:
//!
//! ```text
//! position = len(S_0) + ... + len(S_{section-1}) + row
//! ```
//!
//! Storage is copy-on-write. A [`Snapshot`] taken by a renderer keeps seeing
//! the sections exactly as they were when it was taken, no matter how the
//! owning screen mutates the list afterwards.

use std::sync::Arc;

use tokio::sync::watch;

use super::SectionRow;
use crate::error::ListIndexError;

/// An ordered list of sections, each an ordered list of items.
///
/// The item count is never cached; it is summed on demand so that it always
/// reflects the latest mutation. Lookups walk the sections linearly, which
/// is fine for lists the size of a screen of data.
#[derive(Debug)]
pub struct SectionedList<T> {
    sections: Arc<Vec<Vec<T>>>,
    version: u64,
    changes: watch::Sender<u64>,
}

/// An immutable view of a [`SectionedList`] at one version.
#[derive(Debug)]
pub struct Snapshot<T> {
    sections: Arc<Vec<Vec<T>>>,
    version: u64,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            sections: Arc::clone(&self.sections),
            version: self.version,
        }
    }
}

impl<T: Clone> Default for SectionedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SectionedList<T> {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            sections: Arc::new(Vec::new()),
            version: 0,
            changes,
        }
    }

    /// Build a list from pre-grouped sections.
    pub fn from_sections(sections: Vec<Vec<T>>) -> Self {
        let mut list = Self::new();
        list.add_sections(sections);
        list
    }

    pub fn sections(&self) -> &[Vec<T>] {
        &self.sections
    }

    /// Direct mutable access to the backing storage.
    ///
    /// Counts as a mutation even if the caller ends up changing nothing.
    pub fn sections_mut(&mut self) -> &mut Vec<Vec<T>> {
        self.touch();
        Arc::make_mut(&mut self.sections)
    }

    pub fn clear_sections(&mut self) {
        self.sections_mut().clear();
    }

    /// Append a section after the existing ones.
    pub fn add_section(&mut self, items: Vec<T>) {
        self.sections_mut().push(items);
    }

    /// Append several sections, keeping their order.
    pub fn add_sections<I>(&mut self, sections: I)
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        self.sections_mut().extend(sections);
    }

    /// Replace the section at `index` in place.
    pub fn set_section(&mut self, index: usize, items: Vec<T>) -> Result<(), ListIndexError> {
        let section_count = self.sections.len();
        if index >= section_count {
            return Err(ListIndexError::SectionOutOfRange {
                section: index,
                section_count,
            });
        }
        self.sections_mut()[index] = items;
        Ok(())
    }

    /// Insert a section at `index`, shifting later sections back by one.
    ///
    /// `index` may equal the current section count, which appends.
    pub fn insert_section(&mut self, index: usize, items: Vec<T>) -> Result<(), ListIndexError> {
        let section_count = self.sections.len();
        if index > section_count {
            return Err(ListIndexError::SectionOutOfRange {
                section: index,
                section_count,
            });
        }
        self.sections_mut().insert(index, items);
        Ok(())
    }

    /// Publish the current contents to anyone watching [`changes`](Self::changes).
    pub fn notify_data_changed(&self) {
        tracing::debug!(
            version = self.version,
            item_count = self.item_count(),
            "sectioned list changed"
        );
        self.changes.send_replace(self.version);
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

impl<T> SectionedList<T> {
    /// Incremented on every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Receives the list version each time the owner calls
    /// [`notify_data_changed`](SectionedList::notify_data_changed).
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            sections: Arc::clone(&self.sections),
            version: self.version,
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of rows in section `index`, or `None` past the last section.
    pub fn section_len(&self, index: usize) -> Option<usize> {
        self.sections.get(index).map(Vec::len)
    }

    pub fn item_count(&self) -> usize {
        item_count(&self.sections)
    }

    pub fn object_from_section_row(&self, section_row: SectionRow) -> Result<&T, ListIndexError> {
        object_at(&self.sections, section_row)
    }

    pub fn section_row_from_position(&self, position: usize) -> Result<SectionRow, ListIndexError> {
        locate(&self.sections, position)
    }

    pub fn object_from_position(&self, position: usize) -> Result<&T, ListIndexError> {
        let section_row = self.section_row_from_position(position)?;
        self.object_from_section_row(section_row)
    }
}

impl<T> Snapshot<T> {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn sections(&self) -> &[Vec<T>] {
        &self.sections
    }

    pub fn section_len(&self, index: usize) -> Option<usize> {
        self.sections.get(index).map(Vec::len)
    }

    pub fn item_count(&self) -> usize {
        item_count(&self.sections)
    }

    pub fn object_from_section_row(&self, section_row: SectionRow) -> Result<&T, ListIndexError> {
        object_at(&self.sections, section_row)
    }

    pub fn section_row_from_position(&self, position: usize) -> Result<SectionRow, ListIndexError> {
        locate(&self.sections, position)
    }

    pub fn object_from_position(&self, position: usize) -> Result<&T, ListIndexError> {
        let section_row = self.section_row_from_position(position)?;
        self.object_from_section_row(section_row)
    }
}

fn item_count<T>(sections: &[Vec<T>]) -> usize {
    sections.iter().map(Vec::len).sum()
}

fn object_at<T>(sections: &[Vec<T>], section_row: SectionRow) -> Result<&T, ListIndexError> {
    let section = sections
        .get(section_row.section)
        .ok_or(ListIndexError::SectionOutOfRange {
            section: section_row.section,
            section_count: sections.len(),
        })?;

    section.get(section_row.row).ok_or(ListIndexError::RowOutOfRange {
        section: section_row.section,
        row: section_row.row,
        row_count: section.len(),
    })
}

fn locate<T>(sections: &[Vec<T>], position: usize) -> Result<SectionRow, ListIndexError> {
    let mut cursor = 0;
    for (section, items) in sections.iter().enumerate() {
        if position < cursor + items.len() {
            return Ok(SectionRow::new(section, position - cursor));
        }
        cursor += items.len();
    }

    Err(ListIndexError::PositionNotFound {
        position,
        item_count: cursor,
    })
}
