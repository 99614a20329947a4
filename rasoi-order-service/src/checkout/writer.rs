use bigdecimal::BigDecimal;
use chrono::Utc;
use tracing::error;
use uuid::Uuid;

use super::validator::ValidatedCheckout;
use super::CheckoutError;
use crate::models::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus};
use crate::store::CheckoutStore;

/// Tax applied on the cart subtotal. One flat rate for every order; there
/// are no per-cook or per-category rates in this flow.
pub const TAX_RATE_PERCENT: i32 = 18;

pub fn order_subtotal(checkout: &ValidatedCheckout) -> BigDecimal {
    checkout
        .lines
        .iter()
        .map(|line| &line.unit_price * BigDecimal::from(line.quantity))
        .sum()
}

/// Tax-inclusive order total, rounded to whole paise.
pub fn order_total(subtotal: &BigDecimal) -> BigDecimal {
    let multiplier = BigDecimal::from(100 + TAX_RATE_PERCENT) / BigDecimal::from(100);
    (subtotal * multiplier).round(2)
}

/// Persist the validated cart as an order row plus its line batch.
///
/// The two inserts are separate statements. When the line batch fails, the
/// fresh order row is deleted again as compensation so no half-written
/// order survives this call.
pub fn write_order<S: CheckoutStore>(
    store: &mut S,
    checkout: &ValidatedCheckout,
    method: PaymentMethod,
) -> Result<Order, CheckoutError> {
    let subtotal = order_subtotal(checkout);
    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4(),
        customer_id: checkout.customer_id,
        cook_id: checkout.cook_id,
        status: OrderStatus::Pending,
        total: order_total(&subtotal),
        payment_method: method,
        payment_status: PaymentStatus::Pending,
        payment_id: None,
        delivery_address: checkout.delivery_address.clone(),
        created_at: now,
        updated_at: now,
    };

    store
        .insert_order(&order)
        .map_err(CheckoutError::OrderCreationFailed)?;

    let items: Vec<OrderItem> = checkout
        .lines
        .iter()
        .map(|line| OrderItem {
            id: Uuid::new_v4(),
            order_id: order.id,
            catalog_item_id: line.catalog_item_id,
            quantity: line.quantity,
            price_at_time: line.unit_price.clone(),
        })
        .collect();

    if let Err(err) = store.insert_order_items(&items) {
        match store.delete_order(order.id) {
            Ok(()) => {
                error!(order_id = %order.id, error = %err, "Order line insert failed, order rolled back");
            }
            Err(cleanup) => {
                error!(
                    order_id = %order.id,
                    error = %err,
                    cleanup_error = %cleanup,
                    "Order line insert failed and the compensating delete failed too, order row orphaned",
                );
            }
        }
        return Err(CheckoutError::OrderLineCreationFailed(err));
    }

    Ok(order)
}
