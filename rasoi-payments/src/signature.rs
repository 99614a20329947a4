use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signature the gateway attaches to a successful payment callback:
/// `HMAC-SHA256(key_secret, "{session_id}|{payment_id}")`, hex encoded.
pub fn payment_signature(key_secret: &str, session_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key_secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(signing_input(session_id, payment_id).as_bytes());

    encode_hex(&mac.finalize().into_bytes())
}

/// Check a callback signature. Comparison happens in constant time; any
/// malformed hex is rejected outright.
pub fn verify_payment_signature(
    key_secret: &str,
    session_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Some(signature) = decode_hex(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(key_secret.as_bytes()) else {
        return false;
    };
    mac.update(signing_input(session_id, payment_id).as_bytes());

    mac.verify_slice(&signature).is_ok()
}

fn signing_input(session_id: &str, payment_id: &str) -> String {
    format!("{session_id}|{payment_id}")
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    let raw = hex.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len() / 2);

    for pair in raw.chunks_exact(2) {
        let hi = decode_hex_nibble(pair[0])?;
        let lo = decode_hex_nibble(pair[1])?;

        bytes.push((hi << 4) | lo);
    }

    Some(bytes)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret";

    #[test]
    fn accepts_matching_signature() {
        let signature = payment_signature(SECRET, "sess_1", "pay_1");

        assert!(verify_payment_signature(SECRET, "sess_1", "pay_1", &signature));
    }

    #[test]
    fn rejects_single_flipped_bit() {
        let signature = payment_signature(SECRET, "sess_1", "pay_1");
        let mut bytes = decode_hex(&signature).unwrap();
        bytes[0] ^= 0x01;
        let tampered = encode_hex(&bytes);

        assert_ne!(signature, tampered);
        assert!(!verify_payment_signature(SECRET, "sess_1", "pay_1", &tampered));
    }

    #[test]
    fn rejects_signature_from_another_secret() {
        let signature = payment_signature("other_secret", "sess_1", "pay_1");

        assert!(!verify_payment_signature(SECRET, "sess_1", "pay_1", &signature));
    }

    #[test]
    fn rejects_signature_for_different_payment() {
        let signature = payment_signature(SECRET, "sess_1", "pay_1");

        assert!(!verify_payment_signature(SECRET, "sess_1", "pay_2", &signature));
        assert!(!verify_payment_signature(SECRET, "sess_2", "pay_1", &signature));
    }

    #[test]
    fn rejects_non_hex_signature() {
        assert!(!verify_payment_signature(SECRET, "sess_1", "pay_1", "not-hex"));
        assert!(!verify_payment_signature(SECRET, "sess_1", "pay_1", ""));
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let signature = payment_signature(SECRET, "sess_1", "pay_1").to_uppercase();

        assert!(verify_payment_signature(SECRET, "sess_1", "pay_1", &signature));
    }
}
