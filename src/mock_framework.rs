//! # Mock Framework
//!
//! Utilities for testing clients and the controller without a network.
//!
//! Use [`create_mock_client`] to get an [`HttpClient`] and a receiver.
//! Then use [`expect_request`] to assert on the request and answer it.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::ProductError;
use crate::http_service::{ApiRequest, HttpClient, HttpRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// Requests sent through the client arrive on the receiver instead of the
/// network, so a test decides what the service answers (success, failure, or
/// nothing at all by dropping the responder).
pub fn create_mock_client(buffer_size: usize) -> (HttpClient, mpsc::Receiver<HttpRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (HttpClient::new(sender), receiver)
}

/// Helper to take the next request and its responder.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<HttpRequest>,
) -> Option<(ApiRequest, Response<Value>)> {
    match receiver.recv().await {
        Some(HttpRequest::Send { request, respond_to }) => Some((request, respond_to)),
        _ => None,
    }
}

/// Answers the next request with `body` and returns the request for assertions.
pub async fn respond_with<T: Serialize>(
    receiver: &mut mpsc::Receiver<HttpRequest>,
    body: &T,
) -> ApiRequest {
    let (request, responder) = expect_request(receiver).await.expect("Expected a request");
    let body = serde_json::to_value(body).expect("Serializable body");
    responder.send(Ok(body)).expect("Client waiting");
    request
}

/// Answers the next request with a failure.
pub async fn fail_with(
    receiver: &mut mpsc::Receiver<HttpRequest>,
    error: ProductError,
) -> ApiRequest {
    let (request, responder) = expect_request(receiver).await.expect("Expected a request");
    responder.send(Err(error)).expect("Client waiting");
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let send_task = tokio::spawn(async move {
            client.send(ApiRequest::get("/products/1")).await
        });

        let (request, responder) = expect_request(&mut receiver).await.expect("Expected request");
        assert_eq!(request.path, "/products/1");
        responder.send(Ok(serde_json::json!({ "id": 1 }))).unwrap();

        let result = send_task.await.unwrap();
        assert_eq!(result, Ok(serde_json::json!({ "id": 1 })));
    }

    #[tokio::test]
    async fn dropped_responder_reads_as_unavailable() {
        let (client, mut receiver) = create_mock_client(10);

        let send_task = tokio::spawn(async move {
            client.send(ApiRequest::get("/products")).await
        });

        let (_request, responder) = expect_request(&mut receiver).await.unwrap();
        drop(responder);

        let result = send_task.await.unwrap();
        assert!(matches!(result, Err(ProductError::ServiceUnavailable(_))));
    }
}
