use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::ProductError;

// =============================================================================
// 1. THE MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ProductError>>;

/// One HTTP call against the product service, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of a query parameter, if the request carries it.
    #[cfg(test)]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
pub enum HttpRequest {
    Send {
        request: ApiRequest,
        respond_to: Response<Value>,
    },
    Shutdown,
}

// =============================================================================
// 2. THE SERVICE
// =============================================================================

/// Owns the `reqwest::Client` and performs requests one message at a time.
pub struct HttpService {
    receiver: mpsc::Receiver<HttpRequest>,
    client: reqwest::Client,
    base_url: String,
}

impl HttpService {
    pub fn new(
        buffer_size: usize,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<(Self, HttpClient), ProductError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProductError::Transport(e.to_string()))?;

        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        };
        Ok((service, HttpClient::new(sender)))
    }

    #[instrument(name = "http_service", skip(self), fields(base_url = %self.base_url))]
    pub async fn run(mut self) {
        info!("HttpService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                HttpRequest::Send { request, respond_to } => {
                    let result = self.perform(request).await;
                    let _ = respond_to.send(result);
                }
                HttpRequest::Shutdown => {
                    info!("HttpService shutting down");
                    break;
                }
            }
        }

        info!("HttpService stopped");
    }

    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn perform(&self, request: ApiRequest) -> Result<Value, ProductError> {
        debug!("Processing request");
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self.client.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProductError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProductError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            warn!(status = status.as_u16(), %message, "Request failed");
            return Err(ProductError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ProductError::Decode(e.to_string()))
    }
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

#[derive(Clone)]
pub struct HttpClient {
    sender: mpsc::Sender<HttpRequest>,
}

impl HttpClient {
    pub fn new(sender: mpsc::Sender<HttpRequest>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<Value, ProductError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HttpRequest::Send { request, respond_to })
            .await
            .map_err(|_| ProductError::ServiceUnavailable("Service closed".to_string()))?;
        response
            .await
            .map_err(|_| ProductError::ServiceUnavailable("Service dropped".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ProductError> {
        debug!("Sending shutdown request");
        self.sender
            .send(HttpRequest::Shutdown)
            .await
            .map_err(|e| ProductError::ServiceUnavailable(e.to_string()))
    }
}
