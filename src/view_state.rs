//! In-memory view state: pagination position, active filters and modal mode.
//!
//! Owned by the controller and mutated only from its event handlers. Nothing
//! derived is cached here; summaries are recomputed on every repaint.

use std::fmt;
use std::str::FromStr;

use crate::domain::ProductId;
use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub products_per_page: u32,
    pub total_products: u64,
}

impl Pagination {
    pub fn new(products_per_page: u32) -> Self {
        Self {
            current_page: 1,
            products_per_page,
            total_products: 0,
        }
    }

    /// Offset of the first product on `page` (pages start at 1).
    pub fn skip_for(&self, page: u32) -> u32 {
        page.saturating_sub(1).saturating_mul(self.products_per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page != 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) * u64::from(self.products_per_page) < self.total_products
    }

    pub fn summary(&self) -> PaginationSummary {
        PaginationSummary {
            start: u64::from(self.skip_for(self.current_page)) + 1,
            // Not clamped to total_products on the last page.
            end: u64::from(self.current_page) * u64::from(self.products_per_page),
            total: self.total_products,
            previous_enabled: self.has_previous(),
            next_enabled: self.has_next(),
        }
    }
}

/// What the pagination bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSummary {
    pub start: u64,
    pub end: u64,
    pub total: u64,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationSummary {
    /// Filtered views are not paginated against the server.
    pub fn filtered(count: usize) -> Self {
        Self {
            start: 1,
            end: count as u64,
            total: count as u64,
            previous_enabled: false,
            next_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Add,
    Edit,
}

impl fmt::Display for ModalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalMode::Add => write!(f, "Add New Product"),
            ModalMode::Edit => write!(f, "Edit Product"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalState {
    pub mode: ModalMode,
    pub current_product_id: Option<ProductId>,
    pub open: bool,
}

impl ModalState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
    RatingAsc,
    RatingDesc,
    StockAsc,
    StockDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingAsc,
        SortKey::RatingDesc,
        SortKey::StockAsc,
        SortKey::StockDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::StockAsc => "stock-asc",
            SortKey::StockDesc => "stock-desc",
        }
    }

    /// Label shown in the sort picker and the active filter tags.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Default",
            SortKey::TitleAsc => "Name: A to Z",
            SortKey::TitleDesc => "Name: Z to A",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingAsc => "Rating: Low to High",
            SortKey::RatingDesc => "Rating: High to Low",
            SortKey::StockAsc => "Stock: Low to High",
            SortKey::StockDesc => "Stock: High to Low",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != SortKey::None
    }
}

impl FromStr for SortKey {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "none" {
            return Ok(SortKey::None);
        }
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FieldError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub search_query: String,
    pub selected_category: String,
    pub sort_key: SortKey,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty() || !self.selected_category.is_empty() || self.sort_key.is_set()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub pagination: Pagination,
    pub modal: ModalState,
    pub filters: Filters,
}

impl ViewState {
    pub fn new(products_per_page: u32) -> Self {
        Self {
            pagination: Pagination::new(products_per_page),
            modal: ModalState::default(),
            filters: Filters::default(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(10)
    }
}
