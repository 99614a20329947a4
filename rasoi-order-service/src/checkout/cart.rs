use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq)]
pub enum CartError {
    #[error("Cart lines must all belong to one cook")]
    CookMismatch,
    #[error("Line quantity must be positive")]
    InvalidQuantity,
}

/// One cart entry as submitted by the client. `catalog_item_id` stays a raw
/// string until checkout validation; clients have been seen sending
/// arbitrary strings here.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub catalog_item_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub cook_id: Uuid,
}

/// Client-held cart. Bound to a single cook for its whole lifetime; orders
/// never span kitchens.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    cook_id: Uuid,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(cook_id: Uuid) -> Self {
        Self {
            cook_id,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.cook_id != self.cook_id {
            return Err(CartError::CookMismatch);
        }
        if line.quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }
        self.lines.push(line);
        Ok(())
    }

    pub fn cook_id(&self) -> Uuid {
        self.cook_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse a catalog reference in strict canonical form: 36 characters,
/// hyphens at positions 8, 13, 18 and 23, hex digits elsewhere. Looser
/// forms a UUID parser would accept (simple, braced, urn) are not valid
/// catalog references.
pub fn parse_catalog_id(raw: &str) -> Option<Uuid> {
    if raw.len() != 36 {
        return None;
    }
    let canonical = raw.bytes().enumerate().all(|(index, byte)| match index {
        8 | 13 | 18 | 23 => byte == b'-',
        _ => byte.is_ascii_hexdigit(),
    });
    if !canonical {
        return None;
    }
    Uuid::try_parse(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(cook_id: Uuid, quantity: i32) -> CartLine {
        CartLine {
            catalog_item_id: Uuid::new_v4().to_string(),
            quantity,
            unit_price: "100".parse().unwrap(),
            cook_id,
        }
    }

    #[test]
    fn accepts_lines_for_the_carts_cook() {
        let cook_id = Uuid::new_v4();
        let mut cart = Cart::new(cook_id);

        cart.push(line(cook_id, 1)).unwrap();
        cart.push(line(cook_id, 3)).unwrap();

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn rejects_lines_from_another_cook() {
        let mut cart = Cart::new(Uuid::new_v4());

        let result = cart.push(line(Uuid::new_v4(), 1));

        assert_eq!(result, Err(CartError::CookMismatch));
        assert!(cart.is_empty());
    }

    #[test]
    fn rejects_non_positive_quantities() {
        let cook_id = Uuid::new_v4();
        let mut cart = Cart::new(cook_id);

        assert_eq!(cart.push(line(cook_id, 0)), Err(CartError::InvalidQuantity));
        assert_eq!(
            cart.push(line(cook_id, -2)),
            Err(CartError::InvalidQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn parses_canonical_catalog_ids() {
        let id = Uuid::new_v4();

        assert_eq!(parse_catalog_id(&id.to_string()), Some(id));
    }

    #[test]
    fn rejects_non_canonical_uuid_forms() {
        let id = Uuid::new_v4();

        // A plain parser would take all of these.
        assert_eq!(parse_catalog_id(&id.simple().to_string()), None);
        assert_eq!(parse_catalog_id(&id.braced().to_string()), None);
        assert_eq!(parse_catalog_id(&id.urn().to_string()), None);
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(parse_catalog_id(""), None);
        assert_eq!(parse_catalog_id("paneer-tikka"), None);
        assert_eq!(parse_catalog_id("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"), None);
        assert_eq!(parse_catalog_id("123e4567-e89b-12d3-a456-42661417400"), None);
    }
}
