//! Session lifetime rules, token generation and cookie directives.
//!
//! Sessions use a sliding window: every authenticated request that presents a
//! still-valid token pushes `expires_at` to `now + EXPIRATION`.

use std::fmt;

use chrono::Duration;
use rand::RngCore;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Session time-to-live: 30 days, in milliseconds.
pub const EXPIRATION_IN_MILLISECONDS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Bytes of randomness behind each session token.
pub const TOKEN_BYTES: usize = 96;

/// Name of the cookie carrying the session token.
pub const COOKIE_NAME: &str = "session_id";

/// Value written into the cookie when the client must forget its session.
pub const INVALID_COOKIE_VALUE: &str = "invalid";

/// `Cache-Control` for responses that reflect live session state.
pub const NO_STORE_CACHE_CONTROL: &str = "no-store, no-cache, max-age=0, must-revalidate";

/// Session TTL as a [`Duration`].
pub fn expiration() -> Duration {
    Duration::milliseconds(EXPIRATION_IN_MILLISECONDS)
}

/// Absolute expiry for a session created or renewed at `now`.
pub fn expires_at_from(now: Timestamp) -> Timestamp {
    now + expiration()
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Observable state of a session row that still exists.
///
/// A revoked session has no row, so callers see it the same way as an
/// expired one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Expired,
}

impl SessionState {
    pub fn at(expires_at: Timestamp, now: Timestamp) -> Self {
        if now < expires_at {
            Self::Active
        } else {
            Self::Expired
        }
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Generate a fresh opaque session token: [`TOKEN_BYTES`] random bytes from
/// the thread-local CSPRNG, lowercase hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

// ---------------------------------------------------------------------------
// Cookie directives
// ---------------------------------------------------------------------------

/// What the boundary layer must tell the client about its session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub value: String,
    pub max_age_secs: i64,
}

impl SessionCookie {
    /// Cookie issued on login and re-issued on every renewal.
    pub fn issue(token: &str) -> Self {
        Self {
            value: token.to_string(),
            max_age_secs: EXPIRATION_IN_MILLISECONDS / 1000,
        }
    }

    /// Cookie that makes the client drop its session immediately.
    pub fn clear() -> Self {
        Self {
            value: INVALID_COOKIE_VALUE.to_string(),
            max_age_secs: -1,
        }
    }
}

impl fmt::Display for SessionCookie {
    /// Renders the `Set-Cookie` header value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{COOKIE_NAME}={}; Max-Age={}; Path=/; HttpOnly",
            self.value, self.max_age_secs
        )
    }
}

/// Pull the session token out of a `Cookie` request header value.
///
/// Returns `None` when the cookie is absent or empty.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn expiration_is_thirty_days() {
        assert_eq!(expiration(), Duration::days(30));
        assert_eq!(EXPIRATION_IN_MILLISECONDS, 2_592_000_000);
    }

    #[test]
    fn tokens_are_hex_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn state_flips_exactly_at_expiry() {
        let now = Utc::now();
        let expires = expires_at_from(now);
        assert_eq!(SessionState::at(expires, now), SessionState::Active);
        assert_eq!(
            SessionState::at(expires, expires - Duration::milliseconds(1)),
            SessionState::Active
        );
        assert_eq!(SessionState::at(expires, expires), SessionState::Expired);
    }

    #[test]
    fn issued_cookie_renders_ttl_in_seconds() {
        let cookie = SessionCookie::issue("abc123");
        assert_eq!(
            cookie.to_string(),
            "session_id=abc123; Max-Age=2592000; Path=/; HttpOnly"
        );
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        assert_eq!(
            SessionCookie::clear().to_string(),
            "session_id=invalid; Max-Age=-1; Path=/; HttpOnly"
        );
    }

    #[test]
    fn reads_token_among_other_cookies() {
        assert_eq!(
            token_from_cookie_header("theme=dark; session_id=deadbeef; lang=pt"),
            Some("deadbeef")
        );
        assert_eq!(token_from_cookie_header("session_id=cafe"), Some("cafe"));
    }

    #[test]
    fn missing_or_empty_cookie_yields_none() {
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header("session_id="), None);
        assert_eq!(token_from_cookie_header(""), None);
    }
}
