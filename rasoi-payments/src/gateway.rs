use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GatewayConfig;

pub const DEFAULT_CURRENCY: &str = "INR";

/// Session-creation request in gateway terms. `amount` is in minor currency
/// units (paise for INR); `notes` is opaque metadata echoed back by the
/// gateway.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub notes: Option<serde_json::Value>,
}

/// Server-side handle for one payment attempt, as returned by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySession {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rejected the request: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait PaymentGateway {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<GatewaySession, GatewayError>;
}

/// HTTP client for the payment gateway's server-to-server API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: GatewayConfig,
    http: Client,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Secret half of the gateway key pair, used to verify callback
    /// signatures.
    pub fn key_secret(&self) -> &str {
        &self.config.key_secret
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<GatewaySession, GatewayError> {
        let url = format!("{}/v1/sessions", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::Rejected(format!(
                "session request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

/// Convert a major-unit amount (rupees) to minor units (paise), rounding to
/// the nearest paisa. `None` when the amount does not fit an `i64`.
pub fn to_minor_units(amount: &BigDecimal) -> Option<i64> {
    (amount * BigDecimal::from(100)).round(0).to_i64()
}
