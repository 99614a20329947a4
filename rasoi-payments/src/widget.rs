use async_trait::async_trait;
use thiserror::Error;

use crate::gateway::GatewaySession;

/// Terminal resolution of the client-side payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The gateway captured the payment. Carries the callback credentials
    /// the server must verify before trusting the capture.
    Approved {
        payment_id: String,
        signature: String,
    },
    /// The user dismissed the widget without paying.
    Cancelled,
    /// The gateway reported a failed payment attempt.
    Failed { reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("payment widget did not respond")]
    NoResponse,

    #[error("payment widget channel failed: {0}")]
    Channel(String),
}

/// Client-side leg of an online payment. Implementations hand the gateway
/// session to the user-facing widget and resolve once the widget reports a
/// terminal outcome.
#[async_trait]
pub trait PaymentPresenter {
    async fn present(&self, session: &GatewaySession) -> Result<PaymentOutcome, PaymentError>;
}
