use std::cmp::Ordering;

use crate::domain::Product;
use crate::renderer::FilterTag;
use crate::view_state::{Filters, SortKey};

/// Sorts a copy of `products` by `key`. The sort is stable; ties keep the
/// service's order.
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    let compare: fn(&Product, &Product) -> Ordering = match key {
        SortKey::None => return sorted,
        SortKey::TitleAsc => |a, b| a.title.cmp(&b.title),
        SortKey::TitleDesc => |a, b| b.title.cmp(&a.title),
        SortKey::PriceAsc => |a, b| a.price.total_cmp(&b.price),
        SortKey::PriceDesc => |a, b| b.price.total_cmp(&a.price),
        SortKey::RatingAsc => |a, b| a.rating.total_cmp(&b.rating),
        SortKey::RatingDesc => |a, b| b.rating.total_cmp(&a.rating),
        SortKey::StockAsc => |a, b| a.stock.cmp(&b.stock),
        SortKey::StockDesc => |a, b| b.stock.cmp(&a.stock),
    };
    sorted.sort_by(compare);
    sorted
}

/// Keeps products whose category equals `category` exactly.
pub fn narrow_to_category(products: &mut Vec<Product>, category: &str) {
    products.retain(|product| product.category == category);
}

pub fn filter_tags(filters: &Filters) -> Vec<FilterTag> {
    let mut tags = Vec::new();
    if !filters.search_query.is_empty() {
        tags.push(FilterTag {
            label: "Search",
            value: filters.search_query.clone(),
        });
    }
    if !filters.selected_category.is_empty() {
        tags.push(FilterTag {
            label: "Category",
            value: filters.selected_category.clone(),
        });
    }
    if filters.sort_key.is_set() {
        tags.push(FilterTag {
            label: "Sort",
            value: filters.sort_key.label().to_string(),
        });
    }
    tags
}
