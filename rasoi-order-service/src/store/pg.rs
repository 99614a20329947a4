use chrono::Utc;
use diesel::{delete, insert_into, prelude::*, update, PgConnection};
use uuid::Uuid;

use super::{CheckoutStore, StoreError};
use crate::{models, schema};

/// Diesel-backed store borrowing an open Postgres connection.
pub struct PgStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl CheckoutStore for PgStore<'_> {
    fn load_profile(&mut self, user_id: Uuid) -> Result<Option<models::UserProfile>, StoreError> {
        Ok(schema::users::table
            .select(models::UserProfile::as_select())
            .find(&user_id)
            .get_result::<models::UserProfile>(self.conn)
            .optional()?)
    }

    fn insert_order(&mut self, order: &models::Order) -> Result<(), StoreError> {
        insert_into(schema::orders::table)
            .values(order)
            .execute(self.conn)?;
        Ok(())
    }

    fn insert_order_items(&mut self, items: &[models::OrderItem]) -> Result<(), StoreError> {
        insert_into(schema::order_items::table)
            .values(items)
            .execute(self.conn)?;
        Ok(())
    }

    fn delete_order(&mut self, order_id: Uuid) -> Result<(), StoreError> {
        delete(schema::orders::table)
            .filter(schema::orders::id.eq(&order_id))
            .execute(self.conn)?;
        Ok(())
    }

    fn load_order(&mut self, order_id: Uuid) -> Result<Option<models::Order>, StoreError> {
        Ok(schema::orders::table
            .select(models::Order::as_select())
            .find(&order_id)
            .get_result::<models::Order>(self.conn)
            .optional()?)
    }

    fn mark_order_paid(&mut self, order_id: Uuid, payment_id: &str) -> Result<bool, StoreError> {
        // The pending-status filter makes the transition first-writer-wins;
        // a concurrent callback racing this one updates zero rows.
        let updated = update(schema::orders::table)
            .set((
                schema::orders::status.eq(models::OrderStatus::Paid),
                schema::orders::payment_status.eq(models::PaymentStatus::Paid),
                schema::orders::payment_id.eq(payment_id),
                schema::orders::updated_at.eq(Utc::now()),
            ))
            .filter(schema::orders::id.eq(&order_id))
            .filter(schema::orders::payment_status.eq(models::PaymentStatus::Pending))
            .execute(self.conn)?;
        Ok(updated > 0)
    }

    fn mark_order_payment_failed(&mut self, order_id: Uuid) -> Result<bool, StoreError> {
        let updated = update(schema::orders::table)
            .set((
                schema::orders::status.eq(models::OrderStatus::PaymentFailed),
                schema::orders::payment_status.eq(models::PaymentStatus::Failed),
                schema::orders::updated_at.eq(Utc::now()),
            ))
            .filter(schema::orders::id.eq(&order_id))
            .filter(schema::orders::payment_status.eq(models::PaymentStatus::Pending))
            .execute(self.conn)?;
        Ok(updated > 0)
    }

    fn insert_cook_payment(&mut self, payment: &models::CookPayment) -> Result<(), StoreError> {
        insert_into(schema::cook_payments::table)
            .values(payment)
            .execute(self.conn)?;
        Ok(())
    }

    fn load_cook_payment_for_order(
        &mut self,
        order_id: Uuid,
    ) -> Result<Option<models::CookPayment>, StoreError> {
        Ok(schema::cook_payments::table
            .select(models::CookPayment::as_select())
            .filter(schema::cook_payments::order_id.eq(&order_id))
            .get_result::<models::CookPayment>(self.conn)
            .optional()?)
    }
}
