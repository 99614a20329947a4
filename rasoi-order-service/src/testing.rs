//! In-memory doubles and fixtures shared by the checkout tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use rasoi_payments::gateway::{CreateSessionRequest, GatewayError, GatewaySession, PaymentGateway};
use rasoi_payments::signature::payment_signature;
use rasoi_payments::widget::{PaymentError, PaymentOutcome, PaymentPresenter};

use crate::checkout::{Cart, CartLine};
use crate::models::{
    Address, CookPayment, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, UserProfile,
};
use crate::store::{CheckoutStore, StoreError};

pub const GATEWAY_SECRET: &str = "secret_under_test";

/// In-memory [`CheckoutStore`] with per-statement failure injection.
#[derive(Default)]
pub struct MemoryStore {
    pub profiles: HashMap<Uuid, UserProfile>,
    pub orders: HashMap<Uuid, Order>,
    pub order_items: Vec<OrderItem>,
    pub cook_payments: Vec<CookPayment>,
    pub deleted_orders: Vec<Uuid>,
    pub fail_order_insert: bool,
    pub fail_item_insert: bool,
    pub fail_payable_insert: bool,
    pub fail_delete: bool,
    /// When set, the next `mark_order_paid` loses a simulated race: the
    /// order is settled under this payment id first and the call reports
    /// that it updated nothing.
    pub race_payment_id: Option<String>,
}

fn injected() -> StoreError {
    StoreError::Internal(diesel::result::Error::BrokenTransactionManager)
}

impl CheckoutStore for MemoryStore {
    fn load_profile(&mut self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.get(&user_id).cloned())
    }

    fn insert_order(&mut self, order: &Order) -> Result<(), StoreError> {
        if self.fail_order_insert {
            return Err(injected());
        }
        self.orders.insert(order.id, order.clone());
        Ok(())
    }

    fn insert_order_items(&mut self, items: &[OrderItem]) -> Result<(), StoreError> {
        if self.fail_item_insert {
            return Err(injected());
        }
        self.order_items.extend_from_slice(items);
        Ok(())
    }

    fn delete_order(&mut self, order_id: Uuid) -> Result<(), StoreError> {
        if self.fail_delete {
            return Err(injected());
        }
        self.orders.remove(&order_id);
        self.order_items.retain(|item| item.order_id != order_id);
        self.deleted_orders.push(order_id);
        Ok(())
    }

    fn load_order(&mut self, order_id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(&order_id).cloned())
    }

    fn mark_order_paid(&mut self, order_id: Uuid, payment_id: &str) -> Result<bool, StoreError> {
        if let Some(winner) = self.race_payment_id.take() {
            self.mark_order_paid(order_id, &winner)?;
        }
        match self.orders.get_mut(&order_id) {
            Some(order) if order.payment_status == PaymentStatus::Pending => {
                order.status = OrderStatus::Paid;
                order.payment_status = PaymentStatus::Paid;
                order.payment_id = Some(payment_id.to_string());
                order.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn mark_order_payment_failed(&mut self, order_id: Uuid) -> Result<bool, StoreError> {
        match self.orders.get_mut(&order_id) {
            Some(order) if order.payment_status == PaymentStatus::Pending => {
                order.status = OrderStatus::PaymentFailed;
                order.payment_status = PaymentStatus::Failed;
                order.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn insert_cook_payment(&mut self, payment: &CookPayment) -> Result<(), StoreError> {
        if self.fail_payable_insert {
            return Err(injected());
        }
        self.cook_payments.push(payment.clone());
        Ok(())
    }

    fn load_cook_payment_for_order(
        &mut self,
        order_id: Uuid,
    ) -> Result<Option<CookPayment>, StoreError> {
        Ok(self
            .cook_payments
            .iter()
            .find(|payment| payment.order_id == order_id)
            .cloned())
    }
}

/// Gateway double minting deterministic sessions, or refusing when told to.
/// Every accepted request is captured for assertions.
#[derive(Default)]
pub struct StubGateway {
    pub reject: bool,
    pub sessions: Mutex<Vec<CreateSessionRequest>>,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<GatewaySession, GatewayError> {
        if self.reject {
            return Err(GatewayError::Rejected(
                "session request failed with status 400".to_string(),
            ));
        }
        let mut sessions = self.sessions.lock().unwrap();
        sessions.push(request.clone());
        Ok(GatewaySession {
            id: format!("sess_{}", sessions.len()),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: request.receipt.clone(),
        })
    }
}

/// Presenter double driven by a closure, standing in for the widget leg.
pub struct FnPresenter<F>(pub F);

#[async_trait]
impl<F> PaymentPresenter for FnPresenter<F>
where
    F: Fn(&GatewaySession) -> Result<PaymentOutcome, PaymentError> + Send + Sync,
{
    async fn present(&self, session: &GatewaySession) -> Result<PaymentOutcome, PaymentError> {
        (self.0)(session)
    }
}

/// Presenter that approves every session with a correctly signed callback
/// for `payment_id`.
pub fn approving_presenter(
    payment_id: &'static str,
) -> FnPresenter<impl Fn(&GatewaySession) -> Result<PaymentOutcome, PaymentError> + Send + Sync> {
    FnPresenter(move |session: &GatewaySession| {
        Ok(PaymentOutcome::Approved {
            payment_id: payment_id.to_string(),
            signature: payment_signature(GATEWAY_SECRET, &session.id, payment_id),
        })
    })
}

pub fn address() -> Address {
    Address {
        street: "14 Gandhi Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
    }
}

pub fn profile(user_id: Uuid) -> UserProfile {
    UserProfile {
        id: user_id,
        first_name: "Asha".to_string(),
        last_name: "Iyer".to_string(),
        email: "asha@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        address: Some(address()),
        created_at: Utc::now(),
    }
}

pub fn single_line_cart(cook_id: Uuid, quantity: i32, unit_price: &str) -> Cart {
    let mut cart = Cart::new(cook_id);
    cart.push(CartLine {
        catalog_item_id: Uuid::new_v4().to_string(),
        quantity,
        unit_price: unit_price.parse().unwrap(),
        cook_id,
    })
    .unwrap();
    cart
}

pub fn pending_order(method: PaymentMethod, total: &str) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        cook_id: Uuid::new_v4(),
        status: OrderStatus::Pending,
        total: total.parse().unwrap(),
        payment_method: method,
        payment_status: PaymentStatus::Pending,
        payment_id: None,
        delivery_address: address(),
        created_at: now,
        updated_at: now,
    }
}
