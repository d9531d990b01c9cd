//! Session cookie encoding

use std::time::Duration;

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "phrasebook_session";

/// Attributes applied to issued session cookies
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    /// Add the `Secure` attribute (HTTPS deployments)
    pub secure: bool,
    /// Add `Max-Age`; without it the cookie lasts for the browser session
    pub max_age: Option<Duration>,
}

impl CookieSettings {
    /// `Set-Cookie` header carrying a signed session value.
    pub fn header_value(&self, signed: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, signed);
        if let Some(max_age) = self.max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age.as_secs()));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}

/// Fresh opaque session token.
pub fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Value of cookie `name` across all `Cookie` headers, first match wins.
pub fn find_cookie<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for v in values {
            map.append(COOKIE, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    #[test]
    fn finds_cookie_among_others() {
        let map = headers(&["theme=dark; phrasebook_session=abc.def; lang=es"]);
        assert_eq!(find_cookie(&map, SESSION_COOKIE), Some("abc.def"));
    }

    #[test]
    fn searches_every_cookie_header() {
        let map = headers(&["theme=dark", "phrasebook_session=xyz.sig"]);
        assert_eq!(find_cookie(&map, SESSION_COOKIE), Some("xyz.sig"));
    }

    #[test]
    fn missing_cookie() {
        assert_eq!(find_cookie(&HeaderMap::new(), SESSION_COOKIE), None);
        let map = headers(&["phrasebook_sessionx=1; other"]);
        assert_eq!(find_cookie(&map, SESSION_COOKIE), None);
    }

    #[test]
    fn header_attributes() {
        let plain = CookieSettings::default().header_value("t.s").unwrap();
        assert_eq!(
            plain.to_str().unwrap(),
            "phrasebook_session=t.s; Path=/; HttpOnly; SameSite=Lax"
        );

        let strict = CookieSettings {
            secure: true,
            max_age: Some(Duration::from_secs(3600)),
        }
        .header_value("t.s")
        .unwrap();
        let text = strict.to_str().unwrap();
        assert!(text.contains("; Max-Age=3600"));
        assert!(text.ends_with("; Secure"));
    }

    #[test]
    fn tokens_are_unique_hex() {
        let a = new_token();
        let b = new_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
