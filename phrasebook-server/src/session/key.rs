//! Session signing key
//!
//! Cookie values are `<token>.<signature>` where the signature is
//! base64url(HMAC-SHA256(key, token)). The key is either loaded from
//! configuration (sessions survive restarts) or generated at startup
//! (every restart invalidates all sessions).

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted key length in bytes
pub const MIN_KEY_LEN: usize = 32;

/// Length of generated keys in bytes
const GENERATED_KEY_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    #[error("session key is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("session key must be at least {min} bytes, got {len}")]
    TooShort { len: usize, min: usize },
}

/// Where the signing key comes from
#[derive(Clone, Default)]
pub enum SessionKeyConfig {
    /// Base64-encoded key supplied by configuration
    Persisted(String),
    /// Random key generated at startup
    #[default]
    Ephemeral,
}

impl fmt::Debug for SessionKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(_) => f.write_str("Persisted(<redacted>)"),
            Self::Ephemeral => f.write_str("Ephemeral"),
        }
    }
}

impl SessionKeyConfig {
    /// `Persisted` when a non-blank key is given, `Ephemeral` otherwise.
    pub fn from_option(encoded: Option<String>) -> Self {
        match encoded {
            Some(key) if !key.trim().is_empty() => Self::Persisted(key.trim().to_owned()),
            _ => Self::Ephemeral,
        }
    }

    pub fn into_key(self) -> Result<SessionKey, SessionKeyError> {
        match self {
            Self::Persisted(encoded) => SessionKey::from_base64(&encoded),
            Self::Ephemeral => {
                tracing::warn!(
                    "No session key configured; generated an ephemeral key. \
                     Sessions will not survive a restart."
                );
                Ok(SessionKey::generate())
            }
        }
    }
}

/// HMAC key used to sign and verify session cookies
#[derive(Clone)]
pub struct SessionKey {
    mac: HmacSha256,
    persisted: bool,
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("persisted", &self.persisted)
            .finish_non_exhaustive()
    }
}

impl SessionKey {
    /// Random key, valid for this process only.
    pub fn generate() -> Self {
        let mut bytes = [0u8; GENERATED_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            mac: Self::mac_for(&bytes),
            persisted: false,
        }
    }

    /// Key from raw bytes (at least [`MIN_KEY_LEN`]).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionKeyError> {
        if bytes.len() < MIN_KEY_LEN {
            return Err(SessionKeyError::TooShort {
                len: bytes.len(),
                min: MIN_KEY_LEN,
            });
        }
        Ok(Self {
            mac: Self::mac_for(bytes),
            persisted: true,
        })
    }

    /// Key from standard base64.
    pub fn from_base64(encoded: &str) -> Result<Self, SessionKeyError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Whether the key was loaded from configuration.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Signed cookie value for `token`.
    pub fn sign(&self, token: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(token.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{}.{}", token, signature)
    }

    /// The token inside a signed value, or `None` if the value is malformed
    /// or the signature does not match.
    pub fn verify<'v>(&self, value: &'v str) -> Option<&'v str> {
        let (token, signature) = value.rsplit_once('.')?;
        if token.is_empty() {
            return None;
        }
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(token.as_bytes());
        mac.verify_slice(&signature).ok().map(|_| token)
    }

    fn mac_for(bytes: &[u8]) -> HmacSha256 {
        match HmacSha256::new_from_slice(bytes) {
            Ok(mac) => mac,
            Err(_) => unreachable!("HMAC-SHA256 accepts keys of any length"),
        }
    }
}
