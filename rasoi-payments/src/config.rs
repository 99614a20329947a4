use std::env;

use tracing::warn;

const TEST_KEY_ID: &str = "pg_test_key";
const TEST_KEY_SECRET: &str = "pg_test_secret";

/// Credentials and endpoint for the payment gateway API.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub key_id: String,
    pub key_secret: String,
}

impl GatewayConfig {
    /// Reads `PAYMENT_GATEWAY_URL`, `PAYMENT_GATEWAY_KEY_ID` and
    /// `PAYMENT_GATEWAY_KEY_SECRET`. Missing keys fall back to built-in test
    /// keys, which only ever authenticate against a gateway sandbox.
    pub fn from_env() -> Self {
        let base_url = env::var("PAYMENT_GATEWAY_URL").expect("PAYMENT_GATEWAY_URL must be set");
        let key_id = env::var("PAYMENT_GATEWAY_KEY_ID").unwrap_or_else(|_| {
            warn!("PAYMENT_GATEWAY_KEY_ID not set, falling back to test key");
            TEST_KEY_ID.to_string()
        });
        let key_secret = env::var("PAYMENT_GATEWAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("PAYMENT_GATEWAY_KEY_SECRET not set, falling back to test key");
            TEST_KEY_SECRET.to_string()
        });

        Self {
            base_url,
            key_id,
            key_secret,
        }
    }
}
