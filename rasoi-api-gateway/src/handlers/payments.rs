use axum::{Router, extract::State, response::Json, routing::post};
use bigdecimal::BigDecimal;
use tracing::instrument;
use uuid::Uuid;

use rasoi_order_service::checkout::{CheckoutError, reconciler};
use rasoi_order_service::establish_connection;
use rasoi_order_service::store::StoreError;
use rasoi_order_service::store::pg::PgStore;
use rasoi_payments::gateway::{CreateSessionRequest, PaymentGateway, to_minor_units};

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments/session", post(create_payment_session))
        .route("/payments/verify", post(verify_payment))
}

#[utoipa::path(
    post,
    path = "/payments/session",
    request_body = CreatePaymentSessionRequest,
    responses(
        (status = 200, description = "Payment session created", body = PaymentSessionResponse),
        (status = 400, description = "Invalid request", body = ApiErrorResponse),
        (status = 500, description = "Payment gateway error", body = ApiErrorResponse),
    ),
    tag = "payments"
)]
#[instrument(skip(state))]
pub async fn create_payment_session(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentSessionRequest>,
) -> Result<Json<PaymentSessionResponse>, ApiError> {
    let amount = payload.amount.ok_or(ApiError::MissingField("amount"))?;
    let currency = payload.currency.ok_or(ApiError::MissingField("currency"))?;

    let amount: BigDecimal = amount
        .parse()
        .map_err(|_| ApiError::BadRequest("Amount must be a decimal number".to_string()))?;
    let amount = to_minor_units(&amount)
        .ok_or_else(|| ApiError::BadRequest("Amount is out of range".to_string()))?;

    let request = CreateSessionRequest {
        amount,
        currency,
        receipt: payload.receipt,
        notes: payload.notes,
    };

    let session = state
        .gateway
        .create_session(&request)
        .await
        .map_err(|e| ApiError::Gateway(format!("Payment gateway error: {e}")))?;

    Ok(Json(PaymentSessionResponse {
        id: session.id,
        amount: session.amount,
        currency: session.currency,
        receipt: session.receipt,
    }))
}

#[utoipa::path(
    post,
    path = "/payments/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and applied to the order", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid request or signature mismatch", body = ApiErrorResponse),
        (status = 500, description = "Storage error", body = ApiErrorResponse),
    ),
    tag = "payments"
)]
#[instrument(skip(state))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let payment_id = payload
        .payment_id
        .ok_or(ApiError::MissingField("payment_id"))?;
    let session_id = payload
        .session_id
        .ok_or(ApiError::MissingField("session_id"))?;
    let signature = payload
        .signature
        .ok_or(ApiError::MissingField("signature"))?;
    let order_db_id = payload
        .order_db_id
        .ok_or(ApiError::MissingField("order_db_id"))?;
    let order_id = Uuid::try_parse(&order_db_id)
        .map_err(|_| ApiError::BadRequest("Order id must be a UUID".to_string()))?;

    let mut conn = establish_connection();
    let mut store = PgStore::new(&mut conn);

    reconciler::confirm_payment(
        &mut store,
        state.gateway.key_secret(),
        order_id,
        &session_id,
        &payment_id,
        &signature,
    )
    .map_err(|e| match e {
        CheckoutError::SignatureVerificationFailed => ApiError::SignatureMismatch,
        CheckoutError::Store(StoreError::NotFound) => {
            ApiError::BadRequest("Order not found".to_string())
        }
        CheckoutError::Store(err) => ApiError::Internal(format!("Storage error: {err}")),
        other => ApiError::BadRequest(other.to_string()),
    })?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        payment_id,
        session_id,
    }))
}
