//! Zettle commerce API client
//!
//! Owns the bearer token lifecycle and the purchase polling endpoint.
//! The token is refreshed lazily before each call; the refresh is
//! serialized behind a mutex so concurrent callers await a single
//! in-flight exchange instead of issuing duplicates.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::config::Config;

/// RFC 7523 JWT bearer grant type
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

pub const DEFAULT_AUTH_URL: &str = "https://oauth.zettle.com/token";
pub const DEFAULT_PURCHASE_URL: &str = "https://purchase.izettle.com/purchases/v2";

/// API error taxonomy
///
/// Both variants are cycle-fatal: the current poll cycle aborts and the
/// next scheduled invocation retries from scratch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token exchange failed; no orders processed this cycle
    #[error("Token exchange failed: {0}")]
    Auth(#[source] reqwest::Error),

    /// Purchase listing failed; cycle aborts without partial processing
    #[error("Purchase fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Bearer token with its expiry instant
#[derive(Debug, Clone)]
struct Token {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// A purchase as returned by the listing endpoint
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub user_display_name: String,
    #[serde(default)]
    pub products: Vec<PurchaseProduct>,
}

/// A line item of a purchase
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseProduct {
    pub name: String,
    pub quantity: i64,
    pub variant_name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PurchaseList {
    purchases: Vec<Purchase>,
}

/// Client for the Zettle order API
pub struct ZettleClient {
    http: reqwest::Client,
    client_id: String,
    assertion_token: String,
    auth_url: String,
    purchase_url: String,
    token: Mutex<Option<Token>>,
}

impl ZettleClient {
    /// Create a client from the bridge configuration
    pub fn new(config: &Config) -> Self {
        debug!(
            organization = %config.organization_uuid,
            auth_url = %config.auth_url,
            "Zettle client initialized"
        );

        Self {
            http: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            assertion_token: config.assertion_token.clone(),
            auth_url: config.auth_url.clone(),
            purchase_url: config.purchase_url.clone(),
            token: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, refreshing it first if expired
    ///
    /// The mutex is held across the refresh so concurrent callers wait
    /// for the in-flight exchange instead of starting their own.
    pub async fn ensure_valid(&self) -> ApiResult<String> {
        let mut slot = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = slot.as_ref()
            && token.is_valid(now)
        {
            return Ok(token.value.clone());
        }

        debug!("Bearer token missing or expired, refreshing");

        let response = self
            .http
            .post(&self.auth_url)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("client_id", &self.client_id),
                ("assertion", &self.assertion_token),
            ])
            .send()
            .await
            .map_err(ApiError::Auth)?
            .error_for_status()
            .map_err(ApiError::Auth)?;

        let TokenResponse {
            access_token,
            expires_in,
        } = response.json().await.map_err(ApiError::Auth)?;

        info!(expires_in, "Bearer token refreshed");

        let token = Token {
            value: access_token,
            expires_at: now + Duration::seconds(expires_in),
        };
        let value = token.value.clone();
        *slot = Some(token);

        Ok(value)
    }

    /// Fetch the most recent purchases
    ///
    /// Single paginated read; `limit` bounds the result set. Ensures a
    /// valid token before the call.
    #[instrument(skip(self))]
    pub async fn latest_purchases(&self, limit: u32, descending: bool) -> ApiResult<Vec<Purchase>> {
        let bearer = self.ensure_valid().await?;

        let response = self
            .http
            .get(&self.purchase_url)
            .query(&[
                ("limit", limit.to_string()),
                ("descending", descending.to_string()),
            ])
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(ApiError::Fetch)?
            .error_for_status()
            .map_err(ApiError::Fetch)?;

        let list: PurchaseList = response.json().await.map_err(ApiError::Fetch)?;
        debug!(count = list.purchases.len(), "Fetched purchases");

        Ok(list.purchases)
    }
}

impl std::fmt::Debug for ZettleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZettleClient")
            .field("auth_url", &self.auth_url)
            .field("purchase_url", &self.purchase_url)
            .finish()
    }
}
