use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use crate::domain::{Category, PageResult, Product, ProductFields, ProductId};
use crate::error::ProductError;
use crate::http_service::{ApiRequest, HttpClient};

/// Client for the remote product service.
///
/// Each method issues exactly one request and never retries. Failures are
/// logged here and returned to the caller, which decides through its failure
/// policy whether they mean "no data" or an error.
#[derive(Clone)]
pub struct ProductClient {
    inner: HttpClient,
}

impl ProductClient {
    pub fn new(inner: HttpClient) -> Self {
        Self { inner }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ProductError> {
        let method = request.method.clone();
        let path = request.path.clone();
        let result = match self.inner.send(request).await {
            Ok(body) => serde_json::from_value(body).map_err(|e| ProductError::Decode(e.to_string())),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!(%method, %path, error = %e, "Product request failed");
        }
        result
    }

    /// `limit` is always sent; `skip` only when positive.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: u32, skip: u32) -> Result<PageResult, ProductError> {
        debug!("Sending request");
        let mut request = ApiRequest::get("/products").query("limit", limit);
        if skip > 0 {
            request = request.query("skip", skip);
        }
        self.fetch(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.fetch(ApiRequest::new(Method::DELETE, format!("/products/{}", id)))
            .await
    }

    #[instrument(skip(self, fields))]
    pub async fn create_product(&self, fields: &ProductFields) -> Result<Product, ProductError> {
        debug!("Sending request");
        let request = ApiRequest::new(Method::POST, "/products/add").json(encode(fields)?);
        self.fetch(request).await
    }

    #[instrument(skip(self, fields))]
    pub async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        let request =
            ApiRequest::new(Method::PUT, format!("/products/{}", id)).json(encode(fields)?);
        self.fetch(request).await
    }
}

fn encode(fields: &ProductFields) -> Result<serde_json::Value, ProductError> {
    serde_json::to_value(fields).map_err(|e| ProductError::Decode(e.to_string()))
}

get_endpoint!(ProductClient => fn get_product(id: ProductId) -> Product,
    path = format!("/products/{}", id));
get_endpoint!(ProductClient => fn search_products(query: &str) -> PageResult,
    path = "/products/search", query = ["q" => query]);
get_endpoint!(ProductClient => fn list_categories() -> Vec<Category>,
    path = "/products/categories");
get_endpoint!(ProductClient => fn list_products_by_category(slug: &str) -> PageResult,
    path = format!("/products/category/{}", slug));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_client, expect_request, fail_with, respond_with};
    use serde_json::json;

    #[tokio::test]
    async fn list_products_omits_zero_skip() {
        let (inner, mut rx) = create_mock_client(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.list_products(10, 0).await });
        let request = respond_with(&mut rx, &PageResult::new(vec![], 0, 0, 10)).await;

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/products");
        assert_eq!(request.query, vec![("limit".to_string(), "10".to_string())]);
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn list_products_sends_positive_skip() {
        let (inner, mut rx) = create_mock_client(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.list_products(10, 30).await });
        let request = respond_with(&mut rx, &PageResult::new(vec![], 194, 30, 10)).await;

        assert_eq!(request.query_value("limit"), Some("10"));
        assert_eq!(request.query_value("skip"), Some("30"));
        let page = task.await.unwrap().unwrap();
        assert_eq!(page.total, 194);
    }

    #[tokio::test]
    async fn endpoints_map_to_service_paths() {
        let (inner, mut rx) = create_mock_client(4);
        let client = ProductClient::new(inner);

        let c = client.clone();
        let task = tokio::spawn(async move { c.search_products("phone").await });
        let request = respond_with(&mut rx, &PageResult::default()).await;
        assert_eq!(request.path, "/products/search");
        assert_eq!(request.query_value("q"), Some("phone"));
        task.await.unwrap().unwrap();

        let c = client.clone();
        let task = tokio::spawn(async move { c.list_products_by_category("smartphones").await });
        let request = respond_with(&mut rx, &PageResult::default()).await;
        assert_eq!(request.path, "/products/category/smartphones");
        assert!(request.query.is_empty());
        task.await.unwrap().unwrap();

        let c = client.clone();
        let task = tokio::spawn(async move { c.list_categories().await });
        let categories = json!([{ "slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty" }]);
        let request = respond_with(&mut rx, &categories).await;
        assert_eq!(request.path, "/products/categories");
        let categories = task.await.unwrap().unwrap();
        assert_eq!(categories[0].slug, "beauty");

        let task = tokio::spawn(async move { client.get_product(7).await });
        let request = respond_with(&mut rx, &Product::new(7, "Lamp", 9.0, 4)).await;
        assert_eq!(request.path, "/products/7");
        assert_eq!(task.await.unwrap().unwrap().title, "Lamp");
    }

    #[tokio::test]
    async fn mutations_carry_method_and_body() {
        let (inner, mut rx) = create_mock_client(4);
        let client = ProductClient::new(inner);
        let fields = ProductFields::from_pairs(["title=Lamp", "stock=4"]).unwrap();

        let (c, f) = (client.clone(), fields.clone());
        let task = tokio::spawn(async move { c.create_product(&f).await });
        let request = respond_with(&mut rx, &Product::new(195, "Lamp", 0.0, 4)).await;
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/products/add");
        assert_eq!(request.body, Some(json!({ "title": "Lamp", "stock": 4 })));
        assert_eq!(task.await.unwrap().unwrap().id, 195);

        let (c, f) = (client.clone(), fields.clone());
        let task = tokio::spawn(async move { c.update_product(3, &f).await });
        let request = respond_with(&mut rx, &Product::new(3, "Lamp", 0.0, 4)).await;
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/products/3");
        task.await.unwrap().unwrap();

        let task = tokio::spawn(async move { client.delete_product(3).await });
        let request = respond_with(&mut rx, &json!({ "id": 3, "isDeleted": true })).await;
        assert_eq!(request.method, Method::DELETE);
        assert!(request.body.is_none());
        assert_eq!(task.await.unwrap().unwrap().is_deleted, Some(true));
    }

    #[tokio::test]
    async fn wrong_shape_is_a_decode_error() {
        let (inner, mut rx) = create_mock_client(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.list_products(10, 0).await });
        let (_request, responder) = expect_request(&mut rx).await.unwrap();
        responder.send(Ok(json!({ "products": "nope" }))).unwrap();

        assert!(matches!(task.await.unwrap(), Err(ProductError::Decode(_))));
    }

    #[tokio::test]
    async fn service_errors_pass_through() {
        let (inner, mut rx) = create_mock_client(4);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.get_product(999).await });
        let error = ProductError::Status { status: 404, message: "Product with id '999' not found".into() };
        fail_with(&mut rx, error.clone()).await;

        assert_eq!(task.await.unwrap(), Err(error));
    }
}
