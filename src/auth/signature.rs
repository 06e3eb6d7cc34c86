//! HMAC-SHA384 signature generation for Bitfinex API authentication.
//!
//! Both API generations sign requests with the same primitive:
//! ```text
//! hex(HMAC-SHA384(key = api_secret, message = payload))
//! ```
//! Only the payload construction differs between v1 and v2 (see
//! [`crate::rest::v1`] and [`crate::rest::v2`]).

use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::auth::Credentials;
use crate::error::BitfinexError;

type HmacSha384 = Hmac<Sha384>;

/// Sign a payload with the credentials' secret.
///
/// The secret's UTF-8 bytes are the HMAC key; the result is the lowercase hex
/// digest (96 characters for SHA-384). Pure and deterministic.
///
/// # Example
///
/// ```rust
/// use bitfinex_api_client::auth::{Credentials, sign_payload};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signature = sign_payload(&credentials, b"/api/v2/auth/r/wallets1700000000{}")?;
/// assert_eq!(signature.len(), 96);
/// # Ok(())
/// # }
/// ```
pub fn sign_payload(credentials: &Credentials, payload: &[u8]) -> Result<String, BitfinexError> {
    let mut hmac = HmacSha384::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| BitfinexError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(payload);
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_known_vector() {
        let credentials = Credentials::new("key", "secret");
        let signature = sign_payload(&credentials, b"payload").unwrap();
        assert_eq!(
            signature,
            "b3ad9a65fe592cc4af8ed050a58e248896d8c52bbcc0b014a29d83f67a1de44aa077e9f2502123fa2683b95b88e20689"
        );
    }

    #[test]
    fn test_signature_is_96_lowercase_hex_chars() {
        let credentials = Credentials::new("key", "my_secret");
        let signature = sign_payload(&credentials, b"some payload").unwrap();

        assert_eq!(signature.len(), 96);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_signature_consistency() {
        let credentials = Credentials::new("key", "my_secret");

        let sig1 = sign_payload(&credentials, b"request body").unwrap();
        let sig2 = sign_payload(&credentials, b"request body").unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_payload() {
        let credentials = Credentials::new("key", "my_secret");

        let sig1 = sign_payload(&credentials, b"payload one").unwrap();
        let sig2 = sign_payload(&credentials, b"payload two").unwrap();

        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_secret() {
        let sig1 = sign_payload(&Credentials::new("key", "secret_a"), b"payload").unwrap();
        let sig2 = sign_payload(&Credentials::new("key", "secret_b"), b"payload").unwrap();

        assert_ne!(sig1, sig2);
    }
}
