use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::cart::{parse_catalog_id, Cart};
use super::{CheckoutError, Session};
use crate::models::{Address, UserProfile};

/// A cart that passed every checkout gate: identifiers parsed, delivery
/// address snapshotted from the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCheckout {
    pub customer_id: Uuid,
    pub cook_id: Uuid,
    pub delivery_address: Address,
    pub lines: Vec<PricedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub catalog_item_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// Gate checkout on authentication, profile completeness and cart
/// well-formedness, in that order. Pure: consults only its arguments and
/// writes nothing.
pub fn validate(
    session: Option<&Session>,
    profile: Option<&UserProfile>,
    cart: &Cart,
) -> Result<ValidatedCheckout, CheckoutError> {
    let session = session.ok_or(CheckoutError::NotAuthenticated)?;
    let profile = profile.ok_or(CheckoutError::IncompleteProfile)?;
    let delivery_address = delivery_details(profile).ok_or(CheckoutError::IncompleteProfile)?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut lines = Vec::with_capacity(cart.lines().len());
    for line in cart.lines() {
        let catalog_item_id = parse_catalog_id(&line.catalog_item_id).ok_or_else(|| {
            CheckoutError::InvalidCatalogReference {
                item_id: line.catalog_item_id.clone(),
            }
        })?;
        lines.push(PricedLine {
            catalog_item_id,
            quantity: line.quantity,
            unit_price: line.unit_price.clone(),
        });
    }

    Ok(ValidatedCheckout {
        customer_id: session.user_id,
        cook_id: cart.cook_id(),
        delivery_address,
        lines,
    })
}

/// The details an order cannot be delivered without: both names, a phone
/// number and a full address. Email is not one of them.
fn delivery_details(profile: &UserProfile) -> Option<Address> {
    if profile.first_name.trim().is_empty()
        || profile.last_name.trim().is_empty()
        || profile.phone.trim().is_empty()
    {
        return None;
    }

    let address = profile.address.as_ref()?;
    if address.street.trim().is_empty()
        || address.city.trim().is_empty()
        || address.state.trim().is_empty()
        || address.pincode.trim().is_empty()
    {
        return None;
    }

    Some(address.clone())
}
