//! Slack request signing (version `v0`).
//!
//! Slack signs each request with HMAC-SHA256 over
//! `v0:<timestamp>:<raw body>` using the app's signing secret, and sends the
//! hex digest as `X-Slack-Signature: v0=<hex>` alongside
//! `X-Slack-Request-Timestamp`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ServerError, ServerResult};

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

const VERSION: &str = "v0";

type HmacSha256 = Hmac<Sha256>;

/// Verifies that requests were signed by Slack with our signing secret.
#[derive(Clone)]
pub struct SlackVerifier {
    secret: Vec<u8>,
    max_age: Duration,
}

impl std::fmt::Debug for SlackVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackVerifier")
            .field("secret", &"<redacted>")
            .field("max_age", &self.max_age)
            .finish()
    }
}

impl SlackVerifier {
    pub fn new(secret: impl Into<Vec<u8>>, max_age: Duration) -> ServerResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ServerError::Config("slack signing secret is empty".into()));
        }
        Ok(Self { secret, max_age })
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> ServerResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        mac.update(VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        Ok(mac)
    }

    /// The `X-Slack-Signature` value Slack would send for this request.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> ServerResult<String> {
        let digest = self.mac(timestamp, body)?.finalize().into_bytes();
        Ok(format!("{VERSION}={}", hex::encode(digest)))
    }

    /// Check a request's timestamp and signature against `now`.
    ///
    /// The digest comparison is constant-time.
    pub fn verify_at(
        &self,
        timestamp: &str,
        signature: &str,
        body: &[u8],
        now: SystemTime,
    ) -> ServerResult<()> {
        let sent = timestamp
            .trim()
            .parse::<u64>()
            .map_err(|_| ServerError::StaleRequest)?;
        let now = now
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .as_secs();
        if now.abs_diff(sent) > self.max_age.as_secs() {
            return Err(ServerError::StaleRequest);
        }

        let hex_digest = signature
            .strip_prefix(VERSION)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or(ServerError::InvalidSignature)?;
        let expected = hex::decode(hex_digest).map_err(|_| ServerError::InvalidSignature)?;
        self.mac(timestamp, body)?
            .verify_slice(&expected)
            .map_err(|_| ServerError::InvalidSignature)
    }

    pub fn verify(&self, timestamp: &str, signature: &str, body: &[u8]) -> ServerResult<()> {
        self.verify_at(timestamp, signature, body, SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example from Slack's request verification guide.
    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
    const TIMESTAMP: &str = "1531420618";
    const BODY: &str = "token=xyzz0WbapA4vBCDEFasx0q6G&team_id=T1DC2JH3J&team_domain=testteamnow&channel_id=G8PSS9T3V&channel_name=foobar&user_id=U2CERLKJA&user_name=roadrunner&command=%2Fwebhook-collect&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1DC2JH3J%2F397700885554%2F96rGlfmibIGlgcZRskXaIFfN&trigger_id=398738663015.47445629121.803a0bc887a14d10d2c447fce8b6703c";
    const SIGNATURE: &str = "v0=a2114d57b48eac39b9ad189dd8316235a7b4a8d21a10bd27519666489c69b503";

    fn verifier() -> SlackVerifier {
        SlackVerifier::new(SECRET, Duration::from_secs(300)).unwrap()
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn signs_like_slack() {
        assert_eq!(verifier().sign(TIMESTAMP, BODY.as_bytes()).unwrap(), SIGNATURE);
    }

    #[test]
    fn accepts_documented_request() {
        verifier()
            .verify_at(TIMESTAMP, SIGNATURE, BODY.as_bytes(), at(1531420618 + 10))
            .unwrap();
    }

    #[test]
    fn rejects_tampered_body() {
        let err = verifier()
            .verify_at(TIMESTAMP, SIGNATURE, b"text=12345", at(1531420618))
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidSignature));
    }

    #[test]
    fn rejects_stale_and_future_timestamps() {
        let v = verifier();
        assert!(matches!(
            v.verify_at(TIMESTAMP, SIGNATURE, BODY.as_bytes(), at(1531420618 + 301)),
            Err(ServerError::StaleRequest)
        ));
        assert!(matches!(
            v.verify_at(TIMESTAMP, SIGNATURE, BODY.as_bytes(), at(1531420618 - 301)),
            Err(ServerError::StaleRequest)
        ));
    }

    #[test]
    fn rejects_malformed_signature() {
        let v = verifier();
        for bad in ["", "v0=", "v1=abcd", "v0=not-hex", "a2114d57"] {
            assert!(
                v.verify_at(TIMESTAMP, bad, BODY.as_bytes(), at(1531420618)).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_timestamp() {
        assert!(matches!(
            verifier().verify_at("yesterday", SIGNATURE, BODY.as_bytes(), at(1531420618)),
            Err(ServerError::StaleRequest)
        ));
    }

    #[test]
    fn empty_secret_is_config_error() {
        assert!(matches!(
            SlackVerifier::new("", Duration::from_secs(300)),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        assert!(!format!("{:?}", verifier()).contains(SECRET));
    }
}
