use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Identifier assigned by the product service.
pub type ProductId = u64;

/// Represents a product in the remote catalog.
///
/// Only transient copies live here; the service owns the record. Fields the
/// service leaves out (e.g. the echo of `POST /products/add`) decode to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub rating: f64,
    pub thumbnail: String,
    pub sku: String,
    pub brand: Option<String>,
    pub is_deleted: Option<bool>,
    pub deleted_on: Option<String>,
}

#[cfg(test)]
impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            stock,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

/// A bounded slice of the product collection plus the collection's size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageResult {
    pub products: Vec<Product>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[cfg(test)]
impl PageResult {
    pub fn new(products: Vec<Product>, total: u64, skip: u64, limit: u64) -> Self {
        Self {
            products,
            total,
            skip,
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub url: String,
}

/// Payload for creating or updating a product.
///
/// Every field is optional; absent fields are left out of the JSON body so an
/// update only carries what changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ProductFields {
    pub const NAMES: [&'static str; 9] = [
        "title",
        "description",
        "category",
        "brand",
        "price",
        "stock",
        "rating",
        "sku",
        "thumbnail",
    ];

    /// Parses `key=value` pairs as typed into the form.
    ///
    /// Numeric fields must parse; that is the only validation applied.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self, FieldError> {
        let mut fields = Self::default();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| FieldError::MalformedPair(pair.to_string()))?;
            fields.set(key.trim(), value.trim())?;
        }
        Ok(fields)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let text = || Some(value.to_string());
        match key {
            "title" => self.title = text(),
            "description" => self.description = text(),
            "category" => self.category = text(),
            "brand" => self.brand = text(),
            "sku" => self.sku = text(),
            "thumbnail" => self.thumbnail = text(),
            "price" => self.price = Some(parse_number(key, value)?),
            "rating" => self.rating = Some(parse_number(key, value)?),
            "stock" => {
                let stock = value.parse::<u32>().map_err(|_| FieldError::InvalidNumber {
                    field: key.to_string(),
                    value: value.to_string(),
                })?;
                self.stock = Some(stock);
            }
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, FieldError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(number),
        _ => Err(FieldError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Prefills the edit form from a fetched record.
impl From<&Product> for ProductFields {
    fn from(product: &Product) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            title: non_empty(&product.title),
            description: non_empty(&product.description),
            category: non_empty(&product.category),
            brand: product.brand.clone(),
            price: Some(product.price),
            stock: Some(product.stock),
            rating: Some(product.rating),
            sku: non_empty(&product.sku),
            thumbnail: non_empty(&product.thumbnail),
        }
    }
}
