use crate::domain::{Product, ProductId};

/// Presentational stock bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTier {
    OutOfStock,
    Low,
    Healthy,
}

impl StockTier {
    /// 0 is out of stock, 1..=50 is low, anything above is healthy.
    pub fn for_stock(stock: u32) -> Self {
        if stock > 50 {
            StockTier::Healthy
        } else if stock > 0 {
            StockTier::Low
        } else {
            StockTier::OutOfStock
        }
    }
}

/// One table row, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub title: String,
    pub sku: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub stock_tier: StockTier,
    pub rating: String,
    pub thumbnail: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            sku: product.sku.clone(),
            category: product.category.clone(),
            price: format!("${:.2}", product.price),
            stock: format!("{} in stock", product.stock),
            stock_tier: StockTier::for_stock(product.stock),
            rating: format!("{:.2}", product.rating),
            thumbnail: product.thumbnail.clone(),
        }
    }
}

pub fn product_rows(products: &[Product]) -> Vec<ProductRow> {
    products.iter().map(ProductRow::from).collect()
}
