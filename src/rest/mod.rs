//! Blocking REST client for the authenticated Bitfinex v2 API.
//!
//! Requests are signed by a [`RequestFactory`](crate::auth::RequestFactory) and executed by a
//! [`Synchronous`] executor. [`Client`] wires the production pair
//! ([`Signer`] and [`HttpExecutor`]) from an [`AppConfig`].

pub mod wallet;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

pub use wallet::WalletService;

use crate::Result;
use crate::auth::{AuthenticatedRequest, Signer};
use crate::config::AppConfig;
use crate::models::convert::{i64_or_zero, slot, string_or_empty};

/// Executes a signed request and returns the decoded JSON body.
///
/// Implementations classify transport and API failures; a returned value
/// is always a success payload.
pub trait Synchronous {
    /// Performs the round-trip for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Transport`](crate::BfxError::Transport) for
    /// network failures, [`BfxError::Http`](crate::BfxError::Http) for other
    /// non-2xx replies and [`BfxError::Api`](crate::BfxError::Api) when the
    /// exchange answers with an error payload.
    fn request(&self, request: &AuthenticatedRequest) -> Result<Value>;
}

impl<E: Synchronous + ?Sized> Synchronous for &E {
    fn request(&self, request: &AuthenticatedRequest) -> Result<Value> {
        (**self).request(request)
    }
}

/// [`Synchronous`] executor backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::blocking::Client,
}

impl HttpExecutor {
    /// Builds the executor, trusting only `tls_config`'s roots when given.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Transport`](crate::BfxError::Transport) if the
    /// HTTP client cannot be built.
    pub fn new(tls_config: Option<rustls::ClientConfig>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(tls_config) = tls_config {
            builder = builder.use_preconfigured_tls(tls_config);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Synchronous for HttpExecutor {
    fn request(&self, request: &AuthenticatedRequest) -> Result<Value> {
        let mut builder = self.client.post(&request.url).body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send()?;
        let status = response.status();
        let text = response.text()?;
        debug!(path = %request.path, %status, "Received response");

        classify(status, &text)
    }
}

/// Turns a response status and body into the decoded success payload or
/// the matching error.
///
/// An `["error", CODE, "MESSAGE"]` body is [`BfxError::Api`](crate::BfxError::Api)
/// whatever the status. Any other non-2xx reply is
/// [`BfxError::Http`](crate::BfxError::Http); a 2xx body that is not JSON is
/// [`BfxError::Json`](crate::BfxError::Json).
pub fn classify(status: StatusCode, text: &str) -> Result<Value> {
    let body = serde_json::from_str::<Value>(text);
    if let Ok(value) = &body
        && let Some(err) = api_error(value)
    {
        return Err(err);
    }
    if !status.is_success() {
        return Err(crate::BfxError::Http {
            status: status.as_u16(),
            body: text.to_string(),
        });
    }

    Ok(body?)
}

/// Recognizes the exchange's `["error", CODE, "MESSAGE"]` payload.
pub fn api_error(value: &Value) -> Option<crate::BfxError> {
    let raw = value.as_array()?;
    if slot(raw, 0).as_str() != Some("error") {
        return None;
    }
    Some(crate::BfxError::Api {
        code: i64_or_zero(slot(raw, 1)),
        message: string_or_empty(slot(raw, 2)),
    })
}

/// Production client: a [`Signer`] paired with an [`HttpExecutor`].
#[derive(Debug)]
pub struct Client {
    wallet: WalletService<Signer, HttpExecutor>,
}

impl Client {
    /// Builds a client from the loaded configuration.
    ///
    /// Missing credentials are not an error here; they surface as
    /// [`BfxError::Credentials`](crate::BfxError::Credentials) on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Tls`](crate::BfxError::Tls) if the configured CA
    /// bundle is unusable, or a transport error if the HTTP client cannot
    /// be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let tls_config = config
            .bitfinex
            .ca_bundle
            .as_deref()
            .map(crate::tls::build_tls_config)
            .transpose()?;

        Ok(Self::new(
            Signer::from_config(&config.bitfinex),
            HttpExecutor::new(tls_config)?,
        ))
    }

    /// Builds a client from explicit parts.
    pub fn new(signer: Signer, executor: HttpExecutor) -> Self {
        Self {
            wallet: WalletService::new(signer, executor),
        }
    }

    /// Wallet, transfer, deposit, withdrawal and movement operations.
    pub fn wallet(&self) -> &WalletService<Signer, HttpExecutor> {
        &self.wallet
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn recognizes_error_payload() {
        let err = api_error(&json!(["error", 10100, "apikey: invalid"])).unwrap();
        match err {
            crate::BfxError::Api { code, message } => {
                assert_eq!(code, 10100);
                assert_eq!(message, "apikey: invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_payloads_are_not_errors() {
        assert!(api_error(&json!([["exchange", "BTC", 1.0, 0, 1.0]])).is_none());
        assert!(api_error(&json!([1, "acc_tf", null])).is_none());
        assert!(api_error(&json!({ "error": "x" })).is_none());
        assert!(api_error(&json!([])).is_none());
    }

    #[test]
    fn classify_returns_success_payload() {
        let value = classify(StatusCode::OK, r#"[["exchange","BTC",1.5,0,1.5]]"#).unwrap();
        assert_eq!(value, json!([["exchange", "BTC", 1.5, 0, 1.5]]));
    }

    #[test]
    fn classify_error_array_on_success_status_is_api_error() {
        let err = classify(StatusCode::OK, r#"["error",10020,"limit: invalid"]"#).unwrap_err();
        assert!(matches!(err, crate::BfxError::Api { code: 10020, .. }));
    }

    #[test]
    fn classify_error_array_on_server_error_is_api_error() {
        let err = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"["error",10100,"apikey: invalid"]"#,
        )
        .unwrap_err();
        match err {
            crate::BfxError::Api { code, message } => {
                assert_eq!(code, 10100);
                assert_eq!(message, "apikey: invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn classify_plain_text_on_server_error_is_http_error() {
        let err = classify(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();
        match err {
            crate::BfxError::Http { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>bad gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn classify_json_without_error_shape_on_server_error_is_http_error() {
        let err = classify(StatusCode::SERVICE_UNAVAILABLE, r#"{"maintenance":true}"#).unwrap_err();
        assert!(matches!(err, crate::BfxError::Http { status: 503, .. }));
    }

    #[test]
    fn classify_plain_text_on_success_status_is_json_error() {
        let err = classify(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, crate::BfxError::Json(_)));
    }
}
