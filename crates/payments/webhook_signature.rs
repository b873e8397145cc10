//! HMAC-SHA256 authentication of provider webhooks.
//!
//! Providers sign the exact bytes they send. The digest must therefore be
//! computed over the raw request body as received, never over a value that was
//! parsed and serialized again.

use anyhow::{Result, bail};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `payload` keyed with `secret`.
pub fn sign_payload(secret: &str, payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks `signature` against the digest of `payload`.
///
/// The comparison is exact on the hex text: an uppercase rendering of the
/// right digest is rejected.
pub fn verify_webhook_signature(
    secret: &str,
    payload: &[u8],
    signature: Option<&str>,
) -> Result<()> {
    let Some(signature) = signature else {
        bail!("missing webhook signature");
    };

    let expected = sign_payload(secret, payload)?;
    if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        bail!("invalid webhook signature");
    }

    Ok(())
}
