//! Cryptographic Utilities
//!
//! Random material and HMAC-SHA256 signed tokens of the form
//! `{payload}.{base64url(signature)}`.

use base64::{Engine, engine::general_purpose};
use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac, digest::KeyInit};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 block size; HMAC zero-pads shorter keys to this length
const HMAC_BLOCK_LEN: usize = 64;

/// Generate a random 32-byte signing secret
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

fn keyed_mac(secret: &[u8; 32]) -> HmacSha256 {
    let mut block = [0u8; HMAC_BLOCK_LEN];
    block[..secret.len()].copy_from_slice(secret);
    <HmacSha256 as KeyInit>::new(GenericArray::from_slice(&block))
}

/// Sign `payload`, producing `{payload}.{signature}`
///
/// ## Examples
/// ```rust
/// use platform::crypto::{sign_token, verify_token};
///
/// let secret = [7u8; 32];
/// let token = sign_token(&secret, "payload");
/// assert_eq!(verify_token(&secret, &token), Some("payload"));
/// assert_eq!(verify_token(&[8u8; 32], &token), None);
/// ```
pub fn sign_token(secret: &[u8; 32], payload: &str) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        payload,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a token produced by [`sign_token`] and return its payload
///
/// Returns `None` for a malformed token or a bad signature. The signature
/// comparison is constant-time.
pub fn verify_token<'a>(secret: &[u8; 32], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.split_once('.')?;
    if signature_b64.contains('.') {
        return None;
    }

    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;

    let mut mac = keyed_mac(secret);
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_differs() {
        assert_ne!(random_secret(), random_secret());
    }

    #[test]
    fn test_base64_decode() {
        let secret = [42u8; 32];
        let decoded = from_base64(&to_base64(&secret)).unwrap();
        assert_eq!(decoded, secret);
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_padded_key_matches_slice_key() {
        let secret = [42u8; 32];
        let token = sign_token(&secret, "abc");

        let mut reference = <HmacSha256 as Mac>::new_from_slice(&secret).unwrap();
        reference.update(b"abc");
        let expected = general_purpose::URL_SAFE_NO_PAD.encode(reference.finalize().into_bytes());

        assert_eq!(token, format!("abc.{}", expected));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let secret = [1u8; 32];
        let token = sign_token(&secret, "3f0c");

        assert_eq!(verify_token(&secret, &token), Some("3f0c"));

        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("3f0d.{}", signature);
        assert_eq!(verify_token(&secret, &forged), None);
    }

    #[test]
    fn test_verify_rejects_malformed() {
        let secret = [1u8; 32];
        assert_eq!(verify_token(&secret, ""), None);
        assert_eq!(verify_token(&secret, "no-separator"), None);
        assert_eq!(verify_token(&secret, "a.b.c"), None);
        assert_eq!(verify_token(&secret, "payload.!!!"), None);
    }
}
