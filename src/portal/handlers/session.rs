//! Session cookie handling: issue, clear, read.
//!
//! The session token is an opaque bearer credential owned by this cookie. It
//! is stored HTTP-only, scoped to path `/`, and never written to any storage
//! reachable by client script. Handlers wrap it in `SecretString` so it never
//! reaches the logs.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use secrecy::SecretString;

pub const SESSION_COOKIE_NAME: &str = "authToken";

/// Cookie attributes fixed at startup
#[derive(Debug, Clone, Copy)]
pub struct CookieConfig {
    pub secure: bool,
}

/// Build the HTTP-only session cookie for a freshly issued token.
///
/// No `Max-Age`: the lifetime is the client's session default.
pub fn issue_cookie(config: CookieConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax");
    if config.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Overwrite the cookie with an empty value and zero `Max-Age` so the client
/// drops it on the next request cycle regardless of script access.
pub fn clear_cookie(config: CookieConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Read the session token from the `Cookie` header.
///
/// Absent is a valid, non-error state; the caller decides whether the
/// operation requires auth.
pub fn read_token(headers: &HeaderMap) -> Option<SecretString> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        // Pairs without `=` (bare flags) are skipped, not fatal
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME && !val.trim().is_empty() {
            return Some(SecretString::from(val.trim().to_string()));
        }
    }
    None
}

/// Tokens are opaque strings, but they must stay a single cookie value:
/// separators or control characters would let an upstream value smuggle
/// extra cookie attributes into the `Set-Cookie` header.
pub fn valid_token_value(token: &str) -> bool {
    !token.is_empty()
        && !token
            .chars()
            .any(|c| c == ';' || c == ',' || c.is_whitespace() || c.is_control())
}
