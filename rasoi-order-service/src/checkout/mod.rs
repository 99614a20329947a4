use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use rasoi_payments::gateway::PaymentGateway;
use rasoi_payments::widget::PaymentPresenter;

use crate::models::{CookPayment, Order, PaymentMethod};
use crate::store::{CheckoutStore, StoreError};

pub mod cart;
pub mod reconciler;
pub mod validator;
pub mod writer;

pub use cart::{Cart, CartError, CartLine};

/// Authenticated caller identity, as established by the session provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Checkout requires an authenticated session")]
    NotAuthenticated,
    #[error("Profile is missing required delivery details")]
    IncompleteProfile,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Cart references an invalid catalog item: {item_id}")]
    InvalidCatalogReference { item_id: String },
    #[error("Order could not be created")]
    OrderCreationFailed(#[source] StoreError),
    #[error("Order items could not be created")]
    OrderLineCreationFailed(#[source] StoreError),
    #[error("Payment was cancelled before completion")]
    PaymentCancelled,
    #[error("Payment signature verification failed")]
    SignatureVerificationFailed,
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A settled checkout: the order as finally stored, plus the payable owed to
/// the cook when an online payment was captured.
#[derive(Debug)]
pub struct Settlement {
    pub order: Order,
    pub payable: Option<CookPayment>,
}

/// Run the full checkout sequence: validate, persist, settle payment. Each
/// stage gates the next. There is no server-side idempotency key in this
/// flow, so callers must not submit the same cart twice concurrently.
pub async fn place_order<S, G, P>(
    store: &mut S,
    gateway: &G,
    presenter: &P,
    gateway_secret: &str,
    session: Option<&Session>,
    cart: &Cart,
    method: PaymentMethod,
) -> Result<Settlement, CheckoutError>
where
    S: CheckoutStore,
    G: PaymentGateway,
    P: PaymentPresenter,
{
    let profile = match session {
        Some(session) => store.load_profile(session.user_id)?,
        None => None,
    };
    let checkout = validator::validate(session, profile.as_ref(), cart)?;
    let order = writer::write_order(store, &checkout, method)?;

    info!(
        order_id = %order.id,
        total = %order.total,
        method = ?order.payment_method,
        "Order created",
    );

    reconciler::settle(store, gateway, presenter, gateway_secret, &order).await
}
