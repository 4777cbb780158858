//! Screen-facing adapter contract over a [`SectionedList`].
//!
//! A screen supplies two things: which layout a row uses, and how to build
//! the renderer for a layout. Position bookkeeping and binding are shared.

use std::fmt;

use thiserror::Error;

use super::{SectionRow, SectionedList};
use crate::error::ListIndexError;

/// Raised by a view holder that cannot present the item it was handed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{holder} cannot bind {found}")]
    UnexpectedItem {
        holder: &'static str,
        found: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Renders one item of a list.
///
/// Binding only touches the holder's own presentation state, never the
/// list model.
pub trait ViewHolder {
    type Item;

    fn bind_data(&mut self, item: &Self::Item) -> Result<(), BindError>;
}

/// A sectioned list plus the screen-specific choices a renderer needs.
///
/// Implementors usually keep row content as a per-screen enum so that
/// [`layout_for`](Self::layout_for) is an exhaustive `match`.
pub trait SectionedAdapter {
    type Item: Clone;
    type Layout: Copy + Eq + fmt::Debug;
    type View;
    type Holder: ViewHolder<Item = Self::Item>;

    fn list(&self) -> &SectionedList<Self::Item>;

    /// Pick the presentation template for the row at `section_row`.
    fn layout_for(&self, section_row: SectionRow) -> Result<Self::Layout, ListIndexError>;

    /// Build the renderer for `layout` on top of `view`.
    fn view_holder_for(&self, layout: Self::Layout, view: Self::View) -> Self::Holder;

    fn item_count(&self) -> usize {
        self.list().item_count()
    }

    /// The layout of the row at a flat renderer position.
    fn item_layout(&self, position: usize) -> Result<Self::Layout, ListIndexError> {
        let section_row = self
            .list()
            .section_row_from_position(position)
            .map_err(log_desync)?;
        self.layout_for(section_row).map_err(log_desync)
    }

    fn create_view_holder(
        &self,
        position: usize,
        view: Self::View,
    ) -> Result<Self::Holder, ListIndexError> {
        let layout = self.item_layout(position)?;
        Ok(self.view_holder_for(layout, view))
    }

    /// Hand the item at `position` to `holder`.
    ///
    /// A holder that rejects its item is logged and left as is; only a
    /// position the list does not have is returned as an error.
    fn bind(&self, holder: &mut Self::Holder, position: usize) -> Result<(), ListIndexError> {
        let item = self.list().object_from_position(position).map_err(log_desync)?;

        if let Err(err) = holder.bind_data(item) {
            tracing::error!(position, error = %err, "failed to bind view holder");
        }
        Ok(())
    }
}

fn log_desync(err: ListIndexError) -> ListIndexError {
    tracing::error!(error = %err, "list renderer out of sync with its model");
    err
}
