//! Anonymous session identity
//!
//! A client holds a signed, opaque token in a cookie; the `sessions` table
//! maps the token to a user. No login exists: the first phrase submission
//! creates a temporary user and binds it to a new session.

pub mod cookie;
pub mod key;

pub use cookie::{find_cookie, new_token, CookieSettings, SESSION_COOKIE};
pub use key::{SessionKey, SessionKeyConfig, SessionKeyError, MIN_KEY_LEN};
