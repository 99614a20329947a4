use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use rasoi_payments::gateway::{
    to_minor_units, CreateSessionRequest, PaymentGateway, DEFAULT_CURRENCY,
};
use rasoi_payments::signature::verify_payment_signature;
use rasoi_payments::widget::{PaymentOutcome, PaymentPresenter};

use super::{CheckoutError, Settlement};
use crate::models::{CookPayment, Order, PayableStatus, PaymentMethod, PaymentStatus};
use crate::store::{CheckoutStore, StoreError};

/// Result of applying one verified gateway callback.
#[derive(Debug)]
pub struct PaymentApplication {
    pub order: Order,
    pub payable: CookPayment,
    /// False when the callback had already been applied and this call only
    /// re-read (or repaired) the stored state.
    pub newly_applied: bool,
}

/// Settle payment for a freshly created order.
///
/// Cash orders complete immediately and stay `Pending` until fulfilment;
/// their payable is raised at delivery time, outside this flow. Online
/// orders create a gateway session, suspend on the payment widget, then
/// verify and apply its callback.
pub async fn settle<S, G, P>(
    store: &mut S,
    gateway: &G,
    presenter: &P,
    gateway_secret: &str,
    order: &Order,
) -> Result<Settlement, CheckoutError>
where
    S: CheckoutStore,
    G: PaymentGateway,
    P: PaymentPresenter,
{
    match order.payment_method {
        PaymentMethod::Cash => {
            info!(order_id = %order.id, "Cash order placed, payment due on delivery");
            Ok(Settlement {
                order: order.clone(),
                payable: None,
            })
        }
        PaymentMethod::Online => {
            settle_online(store, gateway, presenter, gateway_secret, order).await
        }
    }
}

async fn settle_online<S, G, P>(
    store: &mut S,
    gateway: &G,
    presenter: &P,
    gateway_secret: &str,
    order: &Order,
) -> Result<Settlement, CheckoutError>
where
    S: CheckoutStore,
    G: PaymentGateway,
    P: PaymentPresenter,
{
    let Some(amount) = to_minor_units(&order.total) else {
        error!(order_id = %order.id, total = %order.total, "Order total does not fit minor currency units");
        store.mark_order_payment_failed(order.id)?;
        return Err(CheckoutError::PaymentFailed(
            "Order total does not fit minor currency units".to_string(),
        ));
    };
    let request = CreateSessionRequest {
        amount,
        currency: DEFAULT_CURRENCY.to_string(),
        receipt: Some(order.id.to_string()),
        notes: Some(serde_json::json!({
            "order_id": order.id,
            "delivery_address": order.delivery_address,
        })),
    };

    let session = match gateway.create_session(&request).await {
        Ok(session) => session,
        Err(err) => {
            error!(order_id = %order.id, error = %err, "Gateway session creation failed");
            store.mark_order_payment_failed(order.id)?;
            return Err(CheckoutError::PaymentFailed(err.to_string()));
        }
    };

    let outcome = match presenter.present(&session).await {
        Ok(outcome) => outcome,
        Err(err) => {
            // No resolution from the widget. Fail closed without touching
            // the order; the customer can retry with a fresh session.
            warn!(order_id = %order.id, error = %err, "No payment resolution, treating as cancelled");
            return Err(CheckoutError::PaymentCancelled);
        }
    };

    match outcome {
        PaymentOutcome::Cancelled => {
            info!(order_id = %order.id, "Payment cancelled by the customer");
            Err(CheckoutError::PaymentCancelled)
        }
        PaymentOutcome::Failed { reason } => {
            warn!(order_id = %order.id, reason = %reason, "Gateway reported a failed payment");
            store.mark_order_payment_failed(order.id)?;
            Err(CheckoutError::PaymentFailed(reason))
        }
        PaymentOutcome::Approved {
            payment_id,
            signature,
        } => {
            let application = confirm_payment(
                store,
                gateway_secret,
                order.id,
                &session.id,
                &payment_id,
                &signature,
            )?;
            Ok(Settlement {
                order: application.order,
                payable: Some(application.payable),
            })
        }
    }
}

/// Verify a gateway callback and apply it to the order.
///
/// Idempotent: a repeated callback for the payment already recorded is a
/// no-op success, re-creating the payable only when an earlier apply was
/// cut short. The paid transition is compare-and-set at the store, so a
/// paid order is never downgraded by a bad later callback and a failed
/// order is never resurrected, even when callbacks race.
pub fn confirm_payment<S: CheckoutStore>(
    store: &mut S,
    gateway_secret: &str,
    order_id: Uuid,
    session_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<PaymentApplication, CheckoutError> {
    if !verify_payment_signature(gateway_secret, session_id, payment_id, signature) {
        warn!(order_id = %order_id, session_id, "Payment signature mismatch");
        // Compare-and-set: fails the order only while it is still pending,
        // a settled one keeps its state.
        store.mark_order_payment_failed(order_id)?;
        return Err(CheckoutError::SignatureVerificationFailed);
    }

    let order = store
        .load_order(order_id)?
        .ok_or(CheckoutError::Store(StoreError::NotFound))?;

    match order.payment_status {
        PaymentStatus::Pending => {
            if !store.mark_order_paid(order_id, payment_id)? {
                // Another callback settled the order between our read and
                // write. Re-read and resolve against what it left behind.
                let order = store
                    .load_order(order_id)?
                    .ok_or(CheckoutError::Store(StoreError::NotFound))?;
                return already_settled(store, order, payment_id);
            }
            let order = store
                .load_order(order_id)?
                .ok_or(CheckoutError::Store(StoreError::NotFound))?;
            let payable = new_payable(&order);
            store.insert_cook_payment(&payable)?;
            info!(
                order_id = %order_id,
                payment_id,
                amount = %payable.amount,
                "Payment captured and cook payable raised",
            );
            Ok(PaymentApplication {
                order,
                payable,
                newly_applied: true,
            })
        }
        _ => already_settled(store, order, payment_id),
    }
}

/// Resolve a verified callback against an order some earlier callback
/// already settled.
fn already_settled<S: CheckoutStore>(
    store: &mut S,
    order: Order,
    payment_id: &str,
) -> Result<PaymentApplication, CheckoutError> {
    match order.payment_status {
        PaymentStatus::Paid => {
            if order.payment_id.as_deref() != Some(payment_id) {
                error!(
                    order_id = %order.id,
                    recorded = ?order.payment_id,
                    offered = payment_id,
                    "Order already settled by a different payment",
                );
                return Err(CheckoutError::PaymentFailed(
                    "Order already settled by a different payment".to_string(),
                ));
            }
            let payable = match store.load_cook_payment_for_order(order.id)? {
                Some(payable) => payable,
                None => {
                    // An earlier apply stopped between the order update and
                    // the payable insert. Repair it now.
                    let payable = new_payable(&order);
                    store.insert_cook_payment(&payable)?;
                    payable
                }
            };
            info!(order_id = %order.id, payment_id, "Payment was already applied");
            Ok(PaymentApplication {
                order,
                payable,
                newly_applied: false,
            })
        }
        _ => Err(CheckoutError::PaymentFailed(
            "Order payment is already in a terminal failed state".to_string(),
        )),
    }
}

fn new_payable(order: &Order) -> CookPayment {
    CookPayment {
        id: Uuid::new_v4(),
        cook_id: order.cook_id,
        order_id: order.id,
        amount: order.total.clone(),
        status: PayableStatus::Pending,
        created_at: Utc::now(),
    }
}
