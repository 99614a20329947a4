use std::io::Write;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Jsonb,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{cook_payments, cooks, order_items, orders, users};

#[derive(FromSqlRow, AsExpression, PartialEq, Copy, Clone, Debug)]
#[diesel(sql_type = crate::schema::sql_types::OrderStatus)]
pub enum OrderStatus {
    Pending,
    Paid,
    PaymentFailed,
}

impl ToSql<crate::schema::sql_types::OrderStatus, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            OrderStatus::Pending => out.write_all(b"PENDING")?,
            OrderStatus::Paid => out.write_all(b"PAID")?,
            OrderStatus::PaymentFailed => out.write_all(b"PAYMENT_FAILED")?,
        }
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::OrderStatus, Pg> for OrderStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"PENDING" => Ok(OrderStatus::Pending),
            b"PAID" => Ok(OrderStatus::Paid),
            b"PAYMENT_FAILED" => Ok(OrderStatus::PaymentFailed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(FromSqlRow, AsExpression, PartialEq, Copy, Clone, Debug)]
#[diesel(sql_type = crate::schema::sql_types::PaymentMethod)]
pub enum PaymentMethod {
    Cash,
    Online,
}

impl ToSql<crate::schema::sql_types::PaymentMethod, Pg> for PaymentMethod {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentMethod::Cash => out.write_all(b"CASH")?,
            PaymentMethod::Online => out.write_all(b"ONLINE")?,
        }
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::PaymentMethod, Pg> for PaymentMethod {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"CASH" => Ok(PaymentMethod::Cash),
            b"ONLINE" => Ok(PaymentMethod::Online),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(FromSqlRow, AsExpression, PartialEq, Copy, Clone, Debug)]
#[diesel(sql_type = crate::schema::sql_types::PaymentStatus)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl ToSql<crate::schema::sql_types::PaymentStatus, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentStatus::Pending => out.write_all(b"PENDING")?,
            PaymentStatus::Paid => out.write_all(b"PAID")?,
            PaymentStatus::Failed => out.write_all(b"FAILED")?,
        }
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::PaymentStatus, Pg> for PaymentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"PENDING" => Ok(PaymentStatus::Pending),
            b"PAID" => Ok(PaymentStatus::Paid),
            b"FAILED" => Ok(PaymentStatus::Failed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(FromSqlRow, AsExpression, PartialEq, Copy, Clone, Debug)]
#[diesel(sql_type = crate::schema::sql_types::PayableStatus)]
pub enum PayableStatus {
    Pending,
    Completed,
}

impl ToSql<crate::schema::sql_types::PayableStatus, Pg> for PayableStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PayableStatus::Pending => out.write_all(b"PENDING")?,
            PayableStatus::Completed => out.write_all(b"COMPLETED")?,
        }
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::PayableStatus, Pg> for PayableStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"PENDING" => Ok(PayableStatus::Pending),
            b"COMPLETED" => Ok(PayableStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

/// Postal address stored as a jsonb document, both on profiles and as the
/// immutable per-order delivery snapshot.
#[derive(AsExpression, FromSqlRow, Serialize, Deserialize, PartialEq, Clone, Debug)]
#[diesel(sql_type = Jsonb)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl ToSql<Jsonb, Pg> for Address {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(&[1])?;
        serde_json::to_writer(out, self)?;
        Ok(IsNull::No)
    }
}

impl FromSql<Jsonb, Pg> for Address {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let bytes = bytes.as_bytes();
        if bytes.first() != Some(&1) {
            return Err("Unsupported JSONB encoding version".into());
        }
        Ok(serde_json::from_slice(&bytes[1..])?)
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = users)]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = cooks)]
pub struct Cook {
    pub id: Uuid,
    pub kitchen_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = orders)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cook_id: Uuid,
    pub status: OrderStatus,
    pub total: BigDecimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub delivery_address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Order))]
#[diesel(table_name = order_items)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub catalog_item_id: Uuid,
    pub quantity: i32,
    pub price_at_time: BigDecimal,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Order))]
#[diesel(belongs_to(Cook))]
#[diesel(table_name = cook_payments)]
pub struct CookPayment {
    pub id: Uuid,
    pub cook_id: Uuid,
    pub order_id: Uuid,
    pub amount: BigDecimal,
    pub status: PayableStatus,
    pub created_at: DateTime<Utc>,
}
