//! The product page controller: the listing state machine.
//!
//! Every user action ends in exactly one of the listing states. Loads hit the
//! server page by page; filtered views fetch once and sort/narrow locally.
//! Mutations never touch the rendered rows, they reload the current page.

pub mod events;
pub mod filters;

pub use events::UiEvent;
pub use filters::{filter_tags, narrow_to_category, sort_products};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::ProductClient;
use crate::config::AdminConfig;
use crate::domain::{PageResult, ProductFields, ProductId};
use crate::error::ProductError;
use crate::renderer::{product_rows, ListingState, Renderer};
use crate::view_state::{Filters, ModalMode, ModalState, PaginationSummary, SortKey, ViewState};

/// How failed requests reach the listing.
///
/// `Lenient` treats remote failures (transport, status, decode) as "no
/// data", so they land in `Empty` exactly like an empty collection. Only the
/// HTTP service itself going away lands in `Error`. `Strict` sends every
/// failure to `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug)]
pub enum Outcome<T> {
    Data(T),
    NoData,
    Failed(ProductError),
}

impl FailurePolicy {
    pub fn settle<T>(self, result: Result<T, ProductError>) -> Outcome<T> {
        match result {
            Ok(value) => Outcome::Data(value),
            Err(e) if self == FailurePolicy::Lenient && e.is_remote() => {
                debug!(error = %e, "Treating failed request as no data");
                Outcome::NoData
            }
            Err(e) => Outcome::Failed(e),
        }
    }
}

pub struct PageController<R: Renderer> {
    client: ProductClient,
    state: ViewState,
    renderer: R,
    policy: FailurePolicy,
    filter_fetch_limit: u32,
    listing: ListingState,
}

impl<R: Renderer> PageController<R> {
    pub fn new(client: ProductClient, state: ViewState, renderer: R) -> Self {
        Self {
            client,
            state,
            renderer,
            policy: FailurePolicy::default(),
            filter_fetch_limit: 100,
            listing: ListingState::Loading,
        }
    }

    pub fn from_config(client: ProductClient, renderer: R, config: &AdminConfig) -> Self {
        Self::new(client, ViewState::new(config.products_per_page), renderer)
            .with_policy(config.failure_policy)
            .with_filter_fetch_limit(config.filter_fetch_limit)
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_filter_fetch_limit(mut self, limit: u32) -> Self {
        self.filter_fetch_limit = limit;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn listing(&self) -> ListingState {
        self.listing
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn show(&mut self, listing: ListingState) {
        self.listing = listing;
        self.renderer.show_state(listing);
    }

    /// Initial page paint: first page plus the category picker.
    pub async fn start(&mut self) {
        self.load(1).await;
        self.load_categories().await;
    }

    pub async fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::Reload => self.reload().await,
            UiEvent::GoToPage(page) => self.load(page).await,
            UiEvent::NextPage => self.next_page().await,
            UiEvent::PreviousPage => self.previous_page().await,
            UiEvent::Retry => self.retry().await,
            UiEvent::Search(query) => self.set_search(&query).await,
            UiEvent::SelectCategory(slug) => self.select_category(&slug).await,
            UiEvent::SortBy(key) => self.sort_by(key).await,
            UiEvent::ClearFilters => self.clear_filters().await,
            UiEvent::OpenAdd => self.open_add(),
            UiEvent::OpenEdit(id) => self.open_edit(id).await,
            UiEvent::Submit(fields) => self.submit(fields).await,
            UiEvent::CloseModal => self.close_modal(),
            UiEvent::Delete(id) => self.delete(id).await,
            UiEvent::LoadCategories => self.load_categories().await,
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn load(&mut self, page: u32) {
        let page = page.max(1);
        self.show(ListingState::Loading);

        let per_page = self.state.pagination.products_per_page;
        let skip = self.state.pagination.skip_for(page);
        debug!(limit = per_page, skip, "Loading products");

        match self.policy.settle(self.client.list_products(per_page, skip).await) {
            Outcome::Data(result) if !result.products.is_empty() => {
                self.state.pagination.current_page = page;
                self.state.pagination.total_products = result.total;
                self.show(ListingState::Populated { filtered: false });
                self.renderer.render_products(&product_rows(&result.products));
                self.renderer.set_pagination(&self.state.pagination.summary());
                info!(count = result.products.len(), total = result.total, "Products loaded");
            }
            Outcome::Data(_) | Outcome::NoData => {
                info!("No products to show");
                self.show(ListingState::Empty);
            }
            Outcome::Failed(e) => {
                error!(error = %e, "Failed to load products");
                self.show(ListingState::Error);
            }
        }
    }

    pub async fn reload(&mut self) {
        self.load(self.state.pagination.current_page).await;
    }

    pub async fn retry(&mut self) {
        self.load(1).await;
    }

    /// Filtered views are not paged; the arrows are disabled there.
    fn paging_enabled(&self) -> bool {
        self.listing != ListingState::Populated { filtered: true }
    }

    pub async fn next_page(&mut self) {
        if !self.paging_enabled() {
            debug!("Paging is disabled in a filtered view");
        } else if self.state.pagination.has_next() {
            self.load(self.state.pagination.current_page + 1).await;
        } else {
            debug!("Already on the last page");
        }
    }

    pub async fn previous_page(&mut self) {
        if !self.paging_enabled() {
            debug!("Paging is disabled in a filtered view");
        } else if self.state.pagination.has_previous() {
            self.load(self.state.pagination.current_page - 1).await;
        } else {
            debug!("Already on the first page");
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub async fn set_search(&mut self, query: &str) {
        self.state.filters.search_query = query.trim().to_string();
        self.apply_filters().await;
    }

    pub async fn select_category(&mut self, slug: &str) {
        self.state.filters.selected_category = slug.trim().to_string();
        self.apply_filters().await;
    }

    /// Replaces all filters at once and applies them.
    pub async fn set_filters(&mut self, filters: Filters) {
        self.state.filters = Filters {
            search_query: filters.search_query.trim().to_string(),
            ..filters
        };
        self.apply_filters().await;
    }

    pub async fn sort_by(&mut self, key: SortKey) {
        self.state.filters.sort_key = key;
        self.apply_filters().await;
    }

    /// Search wins over category, category over the plain listing. The
    /// search endpoint ignores categories, so both together are narrowed
    /// here.
    #[instrument(skip(self), fields(filters = ?self.state.filters))]
    pub async fn apply_filters(&mut self) {
        self.show(ListingState::Loading);

        let source =
            fetch_filter_source(&self.client, &self.state.filters, self.filter_fetch_limit).await;
        let mut products = match self.policy.settle(source) {
            Outcome::Data(result) => result.products,
            Outcome::NoData => Vec::new(),
            Outcome::Failed(e) => {
                error!(error = %e, "Failed to apply filters");
                self.show(ListingState::Error);
                return;
            }
        };

        let filters = self.state.filters.clone();
        if !filters.search_query.is_empty() && !filters.selected_category.is_empty() {
            narrow_to_category(&mut products, &filters.selected_category);
        }
        if filters.sort_key.is_set() {
            products = sort_products(&products, filters.sort_key);
        }

        if products.is_empty() {
            info!("No products match the filters");
            self.show(ListingState::Empty);
            return;
        }

        self.show(ListingState::Populated { filtered: true });
        self.renderer.render_products(&product_rows(&products));
        self.renderer
            .set_pagination(&PaginationSummary::filtered(products.len()));
        self.renderer.set_active_filters(&filter_tags(&filters));
        info!(count = products.len(), "Filtered products shown");
    }

    pub async fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.renderer.set_active_filters(&[]);
        self.load(1).await;
    }

    #[instrument(skip(self))]
    pub async fn load_categories(&mut self) {
        debug!("Loading categories");
        match self.policy.settle(self.client.list_categories().await) {
            Outcome::Data(categories) => self.renderer.set_categories(&categories),
            Outcome::NoData => warn!("No categories available"),
            Outcome::Failed(e) => error!(error = %e, "Failed to load categories"),
        }
    }

    // =========================================================================
    // Modal and mutations
    // =========================================================================

    pub fn open_add(&mut self) {
        self.state.modal = ModalState {
            mode: ModalMode::Add,
            current_product_id: None,
            open: true,
        };
        self.renderer
            .show_modal(ModalMode::Add, &ProductFields::default());
    }

    #[instrument(skip(self))]
    pub async fn open_edit(&mut self, id: ProductId) {
        match self.policy.settle(self.client.get_product(id).await) {
            Outcome::Data(product) => {
                self.state.modal = ModalState {
                    mode: ModalMode::Edit,
                    current_product_id: Some(product.id),
                    open: true,
                };
                self.renderer
                    .show_modal(ModalMode::Edit, &ProductFields::from(&product));
            }
            Outcome::NoData => {
                warn!("Product details unavailable");
                self.renderer.notify("Failed to load product details");
            }
            Outcome::Failed(e) => {
                error!(error = %e, "Failed to load product details");
                self.renderer.notify("Failed to load product details");
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.state.modal.reset();
        self.renderer.hide_modal();
    }

    /// Saves the open form, then reloads the current page from the server.
    #[instrument(skip(self, form), fields(mode = ?self.state.modal.mode))]
    pub async fn submit(&mut self, form: ProductFields) {
        if !self.state.modal.open {
            self.renderer.notify("No product form is open");
            return;
        }

        let (result, success) = match (self.state.modal.mode, self.state.modal.current_product_id) {
            (ModalMode::Add, _) => (
                self.client.create_product(&form).await,
                "Product added successfully!",
            ),
            (ModalMode::Edit, Some(id)) => (
                self.client.update_product(id, &form).await,
                "Product updated successfully!",
            ),
            (ModalMode::Edit, None) => {
                warn!("Edit form has no product id");
                self.renderer.notify("Failed to save product. Please try again.");
                return;
            }
        };

        match self.policy.settle(result) {
            Outcome::Data(_) | Outcome::NoData => {
                self.renderer.notify(success);
                self.close_modal();
                self.reload().await;
            }
            Outcome::Failed(e) => {
                error!(error = %e, "Error submitting form");
                self.renderer.notify("Failed to save product. Please try again.");
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: ProductId) {
        match self.policy.settle(self.client.delete_product(id).await) {
            Outcome::Data(_) | Outcome::NoData => {
                info!("Product deleted");
                self.reload().await;
            }
            Outcome::Failed(e) => {
                error!(error = %e, "Failed to delete product");
                self.renderer.notify("Failed to delete product");
            }
        }
    }
}

async fn fetch_filter_source(
    client: &ProductClient,
    filters: &Filters,
    all_limit: u32,
) -> Result<PageResult, ProductError> {
    if !filters.search_query.is_empty() {
        client.search_products(&filters.search_query).await
    } else if !filters.selected_category.is_empty() {
        client
            .list_products_by_category(&filters.selected_category)
            .await
    } else {
        client.list_products(all_limit, 0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_policy_hides_remote_failures() {
        let outcome = FailurePolicy::Lenient.settle::<()>(Err(ProductError::Transport("reset".into())));
        assert!(matches!(outcome, Outcome::NoData));

        let outcome = FailurePolicy::Lenient
            .settle::<()>(Err(ProductError::ServiceUnavailable("closed".into())));
        assert!(matches!(outcome, Outcome::Failed(_)));
    }

    #[test]
    fn strict_policy_surfaces_every_failure() {
        let outcome = FailurePolicy::Strict.settle::<()>(Err(ProductError::Decode("eof".into())));
        assert!(matches!(outcome, Outcome::Failed(ProductError::Decode(_))));
        assert!(matches!(FailurePolicy::Strict.settle(Ok(5)), Outcome::Data(5)));
    }
}
