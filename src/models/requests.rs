//! Request bodies for the wallet write endpoints and movement queries.
//!
//! Optional fields are `Option`s skipped when `None`, so an absent value
//! never reaches the wire as `null` or `""`.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Largest `limit` accepted by `movements/hist`.
pub const MOVEMENTS_MAX_LIMIT: u32 = 1000;

/// Serializes an amount as its shortest exact decimal string.
///
/// `0.00000001` stays `"0.00000001"` and `1.50` becomes `"1.5"`; exponent
/// notation is never produced.
pub fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&amount.normalize().to_string())
}

/// Body of `auth/w/transfer`.
#[derive(Debug, Clone, Serialize)]
pub struct TransferParams {
    pub from: String,
    pub to: String,
    pub currency: String,
    pub currency_to: String,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Decimal,
}

/// Body of `auth/w/deposit/address`.
#[derive(Debug, Clone, Serialize)]
pub struct DepositAddressParams {
    pub wallet: String,
    pub method: String,
    /// `1` asks for a fresh address; `0` returns the current one.
    pub op_renew: u8,
}

/// Body of `auth/w/withdraw`.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawParams {
    pub wallet: String,
    pub method: String,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Decimal,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

/// Body of `auth/r/movements/hist`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MovementsParams {
    /// Millisecond timestamps bounding the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Errors from building a movements query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MovementsParamsError {
    #[error("max request limit: {max}, got: {got}")]
    LimitTooHigh { max: u32, got: u32 },
}

impl From<MovementsParamsError> for crate::BfxError {
    fn from(e: MovementsParamsError) -> Self {
        crate::BfxError::Validation(e.to_string())
    }
}

impl MovementsParams {
    /// Composes the filters, rejecting a `limit` above [`MOVEMENTS_MAX_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`MovementsParamsError::LimitTooHigh`] naming both the
    /// ceiling and the rejected value. The limit is never clamped.
    pub fn new(
        start: Option<i64>,
        end: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Self, MovementsParamsError> {
        if let Some(got) = limit
            && got > MOVEMENTS_MAX_LIMIT
        {
            return Err(MovementsParamsError::LimitTooHigh {
                max: MOVEMENTS_MAX_LIMIT,
                got,
            });
        }

        Ok(Self { start, end, limit })
    }
}
