use axum::Router;
use dotenvy::dotenv;
use rasoi_order_service::{establish_connection, run_migrations};
use rasoi_payments::config::GatewayConfig;
use rasoi_payments::gateway::HttpGateway;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod handlers;
mod models;

use handlers::{ApiDoc, AppState, payments_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut conn = establish_connection();
    run_migrations(&mut conn).expect("Failed to run migrations");

    let state = AppState {
        gateway: HttpGateway::new(GatewayConfig::from_env()),
    };

    let app = Router::new()
        .merge(payments_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8100").await?;
    info!("API Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
