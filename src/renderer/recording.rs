use super::{FilterTag, ListingState, ProductRow, Renderer};
use crate::domain::{Category, ProductFields};
use crate::view_state::{ModalMode, PaginationSummary};

/// Renderer that remembers every call, for headless controller tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub states: Vec<ListingState>,
    pub rows: Vec<ProductRow>,
    pub pagination: Option<PaginationSummary>,
    pub filter_tags: Vec<FilterTag>,
    pub categories: Vec<Category>,
    pub modal: Option<(ModalMode, ProductFields)>,
    pub notices: Vec<String>,
}

impl RecordingRenderer {
    pub fn last_state(&self) -> Option<ListingState> {
        self.states.last().copied()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.title.as_str()).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn show_state(&mut self, state: ListingState) {
        self.states.push(state);
    }

    fn render_products(&mut self, rows: &[ProductRow]) {
        self.rows = rows.to_vec();
    }

    fn set_pagination(&mut self, summary: &PaginationSummary) {
        self.pagination = Some(*summary);
    }

    fn set_active_filters(&mut self, tags: &[FilterTag]) {
        self.filter_tags = tags.to_vec();
    }

    fn set_categories(&mut self, categories: &[Category]) {
        self.categories = categories.to_vec();
    }

    fn show_modal(&mut self, mode: ModalMode, form: &ProductFields) {
        self.modal = Some((mode, form.clone()));
    }

    fn hide_modal(&mut self) {
        self.modal = None;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
