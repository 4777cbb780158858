//! Sectioned list model backing every scrollable list.
//!
//! Items are grouped into ordered sections (header, body, footer, empty
//! states...) and addressed by the renderer through one flat position.
//! [`SectionedList`] owns the storage and the position arithmetic;
//! [`SectionedAdapter`] is what each screen implements on top of it.

mod adapter;
mod list;
mod section_row;

pub use adapter::{BindError, SectionedAdapter, ViewHolder};
pub use list::{SectionedList, Snapshot};
pub use section_row::SectionRow;
