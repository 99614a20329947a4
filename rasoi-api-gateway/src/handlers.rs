pub mod payments;

// Re-export routers for easier importing
pub use payments::router as payments_router;

use utoipa::OpenApi;

use rasoi_payments::gateway::HttpGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: HttpGateway,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        payments::create_payment_session,
        payments::verify_payment,
    ),
    components(
        schemas(
            crate::models::CreatePaymentSessionRequest,
            crate::models::PaymentSessionResponse,
            crate::models::VerifyPaymentRequest,
            crate::models::VerifyPaymentResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "payments", description = "Payment session and verification endpoints")
    ),
    info(
        title = "Rasoi API Gateway",
        description = "API Gateway for the Rasoi home-cooked food marketplace",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
