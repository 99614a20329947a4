use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentSessionRequest {
    /// Amount in major currency units, as a decimal string (e.g. "236.00")
    pub amount: Option<String>,
    /// ISO currency code (e.g. "INR")
    pub currency: Option<String>,
    /// Caller-side reference carried through to the gateway
    pub receipt: Option<String>,
    /// Opaque metadata echoed back by the gateway
    pub notes: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentSessionResponse {
    /// Gateway identifier for the payment session
    pub id: String,
    /// Amount in minor currency units (paise)
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Caller-side reference, when one was given
    pub receipt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    /// Gateway payment identifier from the completion callback
    pub payment_id: Option<String>,
    /// Gateway session identifier the payment was made against
    pub session_id: Option<String>,
    /// Hex HMAC-SHA256 signature over "{session_id}|{payment_id}"
    pub signature: Option<String>,
    /// Order row the payment settles (UUID string)
    pub order_db_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    /// True once the payment is recorded against the order
    pub success: bool,
    /// Gateway payment identifier that was applied
    pub payment_id: String,
    /// Gateway session identifier
    pub session_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
