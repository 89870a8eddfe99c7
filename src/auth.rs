//! Authenticated request construction for the Bitfinex v2 REST API.
//!
//! Every private endpoint lives under `auth/r/` (queries) or `auth/w/`
//! (state-changing operations) and expects three headers:
//! `bfx-nonce`, `bfx-apikey` and `bfx-signature`, where the signature is
//! `hex(HMAC-SHA384(secret, "/api/" + path + nonce + body))`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha384;
use zeroize::Zeroizing;

use crate::Result;
use crate::config::BitfinexConfig;

/// Tracks the last nonce issued so every call returns a strictly
/// increasing value even when the wall-clock hasn't advanced.
///
/// Microsecond resolution keeps the nonce below 2^53, the largest value
/// the exchange accepts.
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Access level an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Queries (`auth/r/...`).
    Read,
    /// State-changing operations (`auth/w/...`).
    Write,
}

impl Permission {
    /// Returns the path segment used by the exchange for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Read => "r",
            Permission::Write => "w",
        }
    }
}

/// A signed request, ready to hand to a [`Synchronous`](crate::rest::Synchronous) executor.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedRequest {
    /// Absolute URL the request is posted to.
    pub url: String,
    /// Signed path, e.g. `v2/auth/r/wallets`.
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    /// Serialized JSON body exactly as it was signed.
    pub body: String,
}

impl AuthenticatedRequest {
    /// Returns the value of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body back into JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Json`](crate::BfxError::Json) if the body is not valid JSON.
    pub fn body_json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Builds authenticated requests for a permission level and endpoint.
///
/// The caller picks the permission; implementations never infer it from
/// the endpoint name.
pub trait RequestFactory {
    /// Builds a request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Credentials`](crate::BfxError::Credentials) if
    /// the request cannot be signed.
    fn new_authenticated_request_with_body(
        &self,
        permission: Permission,
        endpoint: &str,
        body: &Value,
    ) -> Result<AuthenticatedRequest>;

    /// Builds a request whose body is the empty object.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Credentials`](crate::BfxError::Credentials) if
    /// the request cannot be signed.
    fn new_authenticated_request(
        &self,
        permission: Permission,
        endpoint: &str,
    ) -> Result<AuthenticatedRequest> {
        self.new_authenticated_request_with_body(
            permission,
            endpoint,
            &Value::Object(serde_json::Map::new()),
        )
    }
}

impl<F: RequestFactory + ?Sized> RequestFactory for &F {
    fn new_authenticated_request_with_body(
        &self,
        permission: Permission,
        endpoint: &str,
        body: &Value,
    ) -> Result<AuthenticatedRequest> {
        (**self).new_authenticated_request_with_body(permission, endpoint, body)
    }
}

/// HMAC-SHA384 request signer holding the account's API credentials.
pub struct Signer {
    base_url: String,
    api_key: Option<String>,
    api_secret: Option<Zeroizing<String>>,
}

impl Signer {
    /// Creates a signer. Empty credentials are treated as absent; building
    /// a request without both fails.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            api_secret: api_secret.filter(|s| !s.is_empty()).map(Zeroizing::new),
        }
    }

    /// Creates a signer from the loaded configuration.
    pub fn from_config(config: &BitfinexConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.api_secret.clone(),
        )
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RequestFactory for Signer {
    fn new_authenticated_request_with_body(
        &self,
        permission: Permission,
        endpoint: &str,
        body: &Value,
    ) -> Result<AuthenticatedRequest> {
        let (Some(api_key), Some(api_secret)) = (&self.api_key, &self.api_secret) else {
            return Err(crate::BfxError::Credentials(
                "BFX_API_KEY and BFX_API_SECRET are required for authenticated requests".into(),
            ));
        };

        let auth_path = format!("auth/{}/{endpoint}", permission.as_str());
        let path = format!("v2/{auth_path}");
        let body = serde_json::to_string(body)?;
        let nonce = next_nonce().to_string();
        let signature = sign(api_secret, &path, &nonce, &body)?;

        Ok(AuthenticatedRequest {
            url: format!("{}{auth_path}", self.base_url),
            path,
            headers: vec![
                ("content-type", "application/json".to_string()),
                ("bfx-nonce", nonce),
                ("bfx-apikey", api_key.clone()),
                ("bfx-signature", signature),
            ],
            body,
        })
    }
}

/// Returns a strictly monotonically-increasing nonce with microsecond resolution.
///
/// Uses the wall-clock as the baseline but guarantees that successive calls
/// always return a value larger than the previous one, even when the clock
/// resolution is too coarse or the clock jumps backwards.
fn next_nonce() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);

    let mut prev = LAST_NONCE.load(Ordering::Relaxed);
    loop {
        let nonce = now.max(prev + 1);
        match LAST_NONCE.compare_exchange_weak(prev, nonce, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return nonce,
            Err(actual) => prev = actual,
        }
    }
}

/// Computes the `bfx-signature` header value.
///
/// Algorithm: `hex(HMAC-SHA384(secret, "/api/" + path + nonce + body))`
fn sign(api_secret: &str, path: &str, nonce: &str, body: &str) -> Result<String> {
    let mut mac = Hmac::<Sha384>::new_from_slice(api_secret.as_bytes())
        .map_err(|e| crate::BfxError::Credentials(format!("invalid HMAC key: {e}")))?;
    mac.update(format!("/api/{path}{nonce}{body}").as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
