//! GitHub webhook signature verification (`X-Hub-Signature-256`).
//!
//! GitHub signs each delivery body with HMAC-SHA256 under the shared secret
//! and sends `sha256=<hex digest>`. Verification is constant-time via the
//! `hmac` crate's `verify_slice`, and fails closed when no secret is set.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Checks delivery signatures against the configured shared secret.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secret: Option<SecretString>,
}

impl SignatureVerifier {
    /// A verifier for `secret`. `None` or an empty secret rejects everything.
    pub fn new(secret: Option<SecretString>) -> Self {
        let secret = secret.filter(|s| !s.expose_secret().is_empty());
        if secret.is_none() {
            tracing::warn!("no webhook secret configured; every webhook will be rejected");
        }
        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// True iff `header` is `sha256=` followed by the hex HMAC-SHA256 of
    /// `body` under the secret.
    ///
    /// A missing, unprefixed, or non-hex header is simply a mismatch.
    pub fn verify(&self, body: &[u8], header: Option<&str>) -> bool {
        let Some(secret) = &self.secret else {
            return false;
        };
        let Some(digest_hex) = header.and_then(|h| h.strip_prefix(SIGNATURE_PREFIX)) else {
            return false;
        };
        let Ok(expected) = hex::decode(digest_hex) else {
            return false;
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}

/// The `X-Hub-Signature-256` header value GitHub would send for `body`.
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(body);
    format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}
