//! QKart REST API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - Catalog reads are cached in-memory via `moka`; search and cart calls
//!   always go to the wire
//! - Backend failures carry a `{message}` body that is surfaced verbatim;
//!   transport failures have no response and map to a generic
//!   "backend unreachable" message
//!
//! # Example
//!
//! ```rust,ignore
//! use qkart_storefront::api::QkartClient;
//!
//! let client = QkartClient::new(&config)?;
//! let catalog = client.products().await?;
//! let cart = client.upsert_cart(&token, &entry).await?;
//! ```

pub mod types;

use std::sync::Arc;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use qkart_core::{CartEntry, Product};

use crate::config::StorefrontConfig;
use types::{AuthPayload, BackendMessage, Credentials};

/// Generic message shown when the backend cannot be reached at all.
pub const BACKEND_UNREACHABLE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

/// Errors that can occur when talking to the QKart backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status and a `{message}` body.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The message to surface to the user for this failure.
    ///
    /// Backend-reported messages are shown verbatim; everything else
    /// collapses to the generic unreachable message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { message, .. } if !message.is_empty() => message.clone(),
            _ => BACKEND_UNREACHABLE.to_string(),
        }
    }
}

// =============================================================================
// QkartClient
// =============================================================================

/// Client for the QKart REST API.
///
/// Cheaply cloneable via `Arc`. Catalog responses are cached for the
/// configured TTL; cart state is never cached (mutable, server-owned).
#[derive(Clone)]
pub struct QkartClient {
    inner: Arc<QkartClientInner>,
}

struct QkartClientInner {
    client: reqwest::Client,
    /// Base endpoint without a trailing slash.
    endpoint: String,
    cache: Cache<String, Vec<Product>>,
}

/// Cache key for the full catalog (search results are never cached).
const CATALOG_CACHE_KEY: &str = "products";

impl QkartClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(QkartClientInner {
                client,
                endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.endpoint)
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Authenticate with username and password.
    ///
    /// `POST /auth/login`, success is HTTP 201 with the session payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` with the backend's message on 4xx
    /// (e.g., "Password is incorrect"), `ApiError::Transport` if the
    /// backend is unreachable.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;

        decode_json(response).await
    }

    /// Create a new account.
    ///
    /// `POST /auth/register`, success is HTTP 201.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` with the backend's message on 4xx
    /// (e.g., "Username is already taken").
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/auth/register"))
            .json(credentials)
            .send()
            .await?;

        decode_json::<BackendMessage>(response).await.map(|_| ())
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Fetch the full product catalog.
    ///
    /// `GET /products`. The response is cached for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` on a 5xx `{message}` response,
    /// `ApiError::Transport` if the backend is unreachable.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(catalog) = self.inner.cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(catalog);
        }

        let response = self
            .inner
            .client
            .get(self.url("/products"))
            .send()
            .await?;

        let catalog: Vec<Product> = decode_json(response).await?;

        self.inner
            .cache
            .insert(CATALOG_CACHE_KEY.to_string(), catalog.clone())
            .await;

        Ok(catalog)
    }

    /// Fetch the catalog filtered by a search term.
    ///
    /// `GET /products/search?value=`. Never cached. A 404 means no product
    /// matched and maps to an empty catalog rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` for non-404 failures,
    /// `ApiError::Transport` if the backend is unreachable.
    #[instrument(skip(self))]
    pub async fn search(&self, value: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url("/products/search"))
            .query(&[("value", value)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        decode_json(response).await
    }

    /// Invalidate the cached catalog.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate(CATALOG_CACHE_KEY).await;
    }

    // =========================================================================
    // Cart Methods (not cached - mutable, server-owned)
    // =========================================================================

    /// Fetch the authoritative cart for the session.
    ///
    /// `GET /cart` with a Bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` on 401/400 `{message}` responses,
    /// `ApiError::Transport` if the backend is unreachable.
    #[instrument(skip(self, token))]
    pub async fn cart(&self, token: &SecretString) -> Result<Vec<CartEntry>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url("/cart"))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        decode_json(response).await
    }

    /// Upsert one cart entry and receive the full authoritative cart back.
    ///
    /// `POST /cart` with `{productId, qty}` and a Bearer token. The qty is
    /// absolute, not a delta; qty 0 deletes the entry server-side.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` on a 404 `{message}` response for an
    /// unknown product, `ApiError::Transport` if the backend is unreachable.
    #[instrument(skip(self, token), fields(product_id = %entry.product_id, qty = entry.qty))]
    pub async fn upsert_cart(
        &self,
        token: &SecretString,
        entry: &CartEntry,
    ) -> Result<Vec<CartEntry>, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/cart"))
            .bearer_auth(token.expose_secret())
            .json(entry)
            .send()
            .await?;

        decode_json(response).await
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a response, mapping non-success statuses to `ApiError::Backend`.
///
/// The body is read as text first so a malformed error body still produces
/// a useful message.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<BackendMessage>(&body)
            .map(|m| m.message)
            .unwrap_or_default();
        tracing::debug!(status = %status, message = %message, "Backend returned failure");
        return Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        ApiError::Parse(e)
    })
}
