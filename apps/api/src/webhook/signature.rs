//! Svix-style webhook signature verification.
//!
//! The provider signs `{id}.{timestamp}.{payload}` with HMAC-SHA256 under a
//! base64 secret (optionally prefixed `whsec_`) and sends one or more
//! space-separated `v1,<base64 sig>` candidates; any single match verifies.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Reject timestamps further than this from now, in either direction.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("webhook secret is not valid base64")]
    MalformedSecret,

    #[error("timestamp header is not a unix timestamp")]
    MalformedTimestamp,

    #[error("timestamp outside the accepted tolerance")]
    StaleTimestamp,

    #[error("no candidate signature matched")]
    Mismatch,
}

/// Verifies a signed webhook delivery.
pub fn verify(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    payload: &[u8],
    signature_header: &str,
    now_unix: i64,
) -> Result<(), SignatureError> {
    let key = decode_secret(secret)?;

    let ts: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::MalformedTimestamp)?;
    if (now_unix - ts).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Err(SignatureError::StaleTimestamp);
    }

    let mut signed = Vec::with_capacity(msg_id.len() + timestamp.len() + payload.len() + 2);
    signed.extend_from_slice(msg_id.as_bytes());
    signed.push(b'.');
    signed.extend_from_slice(timestamp.as_bytes());
    signed.push(b'.');
    signed.extend_from_slice(payload);

    for candidate in signature_header.split_whitespace() {
        let Some(sig_b64) = candidate.strip_prefix("v1,") else {
            continue;
        };
        let Ok(sig) = BASE64.decode(sig_b64) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|_| SignatureError::MalformedSecret)?;
        mac.update(&signed);
        // Mac::verify_slice is constant-time.
        if mac.verify_slice(&sig).is_ok() {
            return Ok(());
        }
    }

    Err(SignatureError::Mismatch)
}

fn decode_secret(secret: &str) -> Result<Vec<u8>, SignatureError> {
    let trimmed = secret.strip_prefix("whsec_").unwrap_or(secret);
    BASE64
        .decode(trimmed)
        .map_err(|_| SignatureError::MalformedSecret)
}
