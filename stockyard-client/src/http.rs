//! HTTP plumbing for the backend's JSON envelope

use crate::error::{ClientError, ClientResult};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, ErrorCode};
use shared::query::QueryRequest;

/// Access-token header, mirrored from the backend's auth middleware
const TOKEN_HEADER: &str = "x-access-token";

/// Per-request correlation id header
const REQUEST_ID_HEADER: &str = "x-request-id";

/// REST client for the Stockyard backend
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Set the access token used for subsequent requests
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Builder-style variant of [`Self::set_token`]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string());
        if let Some(token) = &self.token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder
    }

    /// GET with optional list-query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryRequest>,
    ) -> ClientResult<T> {
        let mut builder = self.request(Method::GET, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        Self::execute(builder).await
    }

    /// POST a JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::execute(self.request(Method::POST, path).json(body)).await
    }

    /// PATCH a JSON body
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::execute(self.request(Method::PATCH, path).json(body)).await
    }

    /// DELETE
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::execute(self.request(Method::DELETE, path)).await
    }

    /// Send the request and unwrap the [`ApiResponse`] envelope
    async fn execute<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<ApiResponse<T>>(&bytes) {
            Ok(body) if body.is_success() && status.is_success() => match body.data {
                Some(data) => Ok(data),
                // Endpoints without a payload (e.g. delete): `()` and
                // `Option<_>` deserialize from JSON null.
                None => serde_json::from_value(serde_json::Value::Null).map_err(ClientError::Decode),
            },
            Ok(body) => {
                let err = body.into_error();
                tracing::debug!(code = %err.code, status = %status, "Backend rejected request");
                Err(err.into())
            }
            // Not our envelope: proxy error pages, empty bodies, ...
            Err(_) if !status.is_success() => Err(ClientError::Api {
                code: status_to_code(status),
                message: format!("HTTP {status}"),
                errors: Vec::new(),
            }),
            Err(e) => Err(ClientError::Decode(e)),
        }
    }
}

/// Fallback mapping for non-envelope error responses
fn status_to_code(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::UNAUTHORIZED => ErrorCode::NotAuthenticated,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::CONFLICT => ErrorCode::AlreadyExists,
        StatusCode::BAD_REQUEST => ErrorCode::InvalidRequest,
        s if s.is_server_error() => ErrorCode::InternalError,
        _ => ErrorCode::Unknown,
    }
}
