//! Typed models for the Bitfinex v2 wallet endpoints.
//!
//! Responses are positional JSON arrays rather than named objects. Each
//! record type validates the array shape strictly and reads individual
//! slots leniently through the [`convert`] helpers.

pub mod convert;
pub mod movement;
pub mod notification;
pub mod requests;
pub mod wallet;

use serde_json::Value;

pub use movement::{MovementRecord, movements_from_raw};
pub use notification::{
    DepositAddressInfo, Notification, NotifyInfo, TransferInfo, WithdrawalInfo,
};
pub use requests::{
    DepositAddressParams, MOVEMENTS_MAX_LIMIT, MovementsParams, MovementsParamsError,
    TransferParams, WithdrawParams,
};
pub use wallet::{Wallet, WalletSnapshot};

/// Returns the elements of `raw`, or a decode error naming `what`.
pub(crate) fn expect_array<'a>(raw: &'a Value, what: &str) -> crate::Result<&'a [Value]> {
    raw.as_array().map(Vec::as_slice).ok_or_else(|| {
        crate::BfxError::Decode(format!("expected {what} array, got: {raw}"))
    })
}
