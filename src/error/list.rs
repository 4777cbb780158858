//! Lookup failures in the sectioned list model.
//!
//! Every variant means the renderer asked for something the model does not
//! have. Renderers derive positions from the same model, so these are
//! desync bugs rather than runtime conditions to recover from.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListIndexError {
    #[error("section {section} out of range ({section_count} sections)")]
    SectionOutOfRange { section: usize, section_count: usize },

    #[error("row {row} out of range in section {section} ({row_count} rows)")]
    RowOutOfRange {
        section: usize,
        row: usize,
        row_count: usize,
    },

    #[error("position not found: {position} (item count {item_count})")]
    PositionNotFound { position: usize, item_count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_not_found_message() {
        let err = ListIndexError::PositionNotFound {
            position: 7,
            item_count: 3,
        };
        assert_eq!(err.to_string(), "position not found: 7 (item count 3)");
    }

    #[test]
    fn test_row_out_of_range_message() {
        let err = ListIndexError::RowOutOfRange {
            section: 1,
            row: 4,
            row_count: 2,
        };
        assert!(err.to_string().contains("section 1"));
    }
}
