use thiserror::Error;
use uuid::Uuid;

use crate::models::{CookPayment, Order, OrderItem, UserProfile};

pub mod pg;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Unexpected internal error")]
    Internal(#[from] diesel::result::Error),
}

/// Statement-granular access to the checkout tables. Every call maps to one
/// all-or-nothing statement; recovery across statements belongs to the
/// caller.
pub trait CheckoutStore {
    fn load_profile(&mut self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    fn insert_order(&mut self, order: &Order) -> Result<(), StoreError>;

    fn insert_order_items(&mut self, items: &[OrderItem]) -> Result<(), StoreError>;

    fn delete_order(&mut self, order_id: Uuid) -> Result<(), StoreError>;

    fn load_order(&mut self, order_id: Uuid) -> Result<Option<Order>, StoreError>;

    /// Move a pending order to paid, recording the gateway payment id and
    /// touching `updated_at`. Compare-and-set: only an order whose payment is
    /// still pending is updated. Returns whether this call applied the
    /// transition; `false` means another writer settled the order first.
    fn mark_order_paid(&mut self, order_id: Uuid, payment_id: &str) -> Result<bool, StoreError>;

    /// Move a pending order to payment-failed. Same compare-and-set rules as
    /// [`mark_order_paid`](CheckoutStore::mark_order_paid); a paid order is
    /// never downgraded.
    fn mark_order_payment_failed(&mut self, order_id: Uuid) -> Result<bool, StoreError>;

    fn insert_cook_payment(&mut self, payment: &CookPayment) -> Result<(), StoreError>;

    fn load_cook_payment_for_order(
        &mut self,
        order_id: Uuid,
    ) -> Result<Option<CookPayment>, StoreError>;
}
