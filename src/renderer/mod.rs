//! Rendering capability for the product page.
//!
//! The controller never paints anything itself; it hands rows, summaries and
//! messages to a [`Renderer`]. The terminal implementation prints to stdout,
//! the recording implementation keeps calls for tests.

pub mod rows;
pub mod terminal;
#[cfg(test)]
pub mod recording;

pub use rows::*;
pub use terminal::TerminalRenderer;

use crate::domain::{Category, ProductFields};
use crate::view_state::{ModalMode, PaginationSummary};

/// Which panel of the listing is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingState {
    Loading,
    Populated { filtered: bool },
    Empty,
    Error,
}

/// A chip describing one active filter, e.g. `Search: phone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTag {
    pub label: &'static str,
    pub value: String,
}

pub trait Renderer: Send {
    fn show_state(&mut self, state: ListingState);
    fn render_products(&mut self, rows: &[ProductRow]);
    fn set_pagination(&mut self, summary: &PaginationSummary);
    /// An empty slice hides the active filter bar.
    fn set_active_filters(&mut self, tags: &[FilterTag]);
    fn set_categories(&mut self, categories: &[Category]);
    fn show_modal(&mut self, mode: ModalMode, form: &ProductFields);
    fn hide_modal(&mut self);
    fn notify(&mut self, message: &str);
}
