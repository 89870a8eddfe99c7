//! Notification models returned by write endpoints.
//!
//! Transfers, deposit-address requests and withdrawals are acknowledged
//! with `[MTS, TYPE, MESSAGE_ID, _, NOTIFY_INFO, CODE, STATUS, TEXT]`,
//! where `NOTIFY_INFO` echoes the operation's payload in a layout that
//! depends on `TYPE`.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::convert::{decimal_or_zero, i64_or_zero, slot, string_or_empty};
use super::expect_array;

mod field {
    pub const MTS: usize = 0;
    pub const TYPE: usize = 1;
    pub const MESSAGE_ID: usize = 2;
    pub const NOTIFY_INFO: usize = 4;
    pub const CODE: usize = 5;
    pub const STATUS: usize = 6;
    pub const TEXT: usize = 7;
}

/// Slots every notification must carry.
pub const NOTIFICATION_MIN_FIELDS: usize = 8;

/// Acknowledgement of a write operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Millisecond timestamp.
    pub mts: i64,
    /// Notification type, e.g. `"acc_tf"` or `"acc_wd-req"`.
    pub notification_type: String,
    pub message_id: i64,
    pub info: NotifyInfo,
    pub code: i64,
    /// `"SUCCESS"`, `"ERROR"` or `"FAILURE"`.
    pub status: String,
    pub text: String,
}

impl Notification {
    /// Decodes a notification response.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Decode`](crate::BfxError::Decode) if the response
    /// is not an array of at least [`NOTIFICATION_MIN_FIELDS`] slots.
    pub fn from_raw(raw: &Value) -> crate::Result<Self> {
        let raw = expect_array(raw, "notification")?;
        if raw.len() < NOTIFICATION_MIN_FIELDS {
            return Err(crate::BfxError::Decode(format!(
                "notification needs at least {NOTIFICATION_MIN_FIELDS} fields, got {}: {raw:?}",
                raw.len()
            )));
        }

        let notification_type = string_or_empty(slot(raw, field::TYPE));
        let info = NotifyInfo::from_raw(&notification_type, slot(raw, field::NOTIFY_INFO));

        Ok(Self {
            mts: i64_or_zero(slot(raw, field::MTS)),
            notification_type,
            message_id: i64_or_zero(slot(raw, field::MESSAGE_ID)),
            info,
            code: i64_or_zero(slot(raw, field::CODE)),
            status: string_or_empty(slot(raw, field::STATUS)),
            text: string_or_empty(slot(raw, field::TEXT)),
        })
    }

    /// Returns `true` when the exchange accepted the operation.
    pub fn is_success(&self) -> bool {
        self.status == "SUCCESS"
    }
}

/// Operation payload echoed inside a [`Notification`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NotifyInfo {
    Transfer(TransferInfo),
    DepositAddress(DepositAddressInfo),
    Withdrawal(WithdrawalInfo),
    /// The slot was `null`.
    Empty,
    /// Unknown notification type, or a payload in an unexpected layout.
    Raw(Value),
}

impl NotifyInfo {
    fn from_raw(notification_type: &str, raw: &Value) -> Self {
        if raw.is_null() {
            return NotifyInfo::Empty;
        }

        let decoded = raw.as_array().and_then(|info| match notification_type {
            "acc_tf" => TransferInfo::from_raw(info).map(NotifyInfo::Transfer),
            "acc_dep" => DepositAddressInfo::from_raw(info).map(NotifyInfo::DepositAddress),
            "acc_wd-req" => WithdrawalInfo::from_raw(info).map(NotifyInfo::Withdrawal),
            _ => None,
        });

        decoded.unwrap_or_else(|| {
            debug!(notification_type, "keeping notification payload undecoded");
            NotifyInfo::Raw(raw.clone())
        })
    }
}

/// Payload of an `acc_tf` (transfer) notification.
///
/// Layout: `[MTS_UPDATED, WALLET_FROM, WALLET_TO, _, CURRENCY, CURRENCY_TO, _, AMOUNT]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferInfo {
    pub mts_updated: i64,
    pub wallet_from: String,
    pub wallet_to: String,
    pub currency: String,
    pub currency_to: String,
    pub amount: Decimal,
}

impl TransferInfo {
    fn from_raw(raw: &[Value]) -> Option<Self> {
        if raw.len() < 8 {
            return None;
        }
        Some(Self {
            mts_updated: i64_or_zero(slot(raw, 0)),
            wallet_from: string_or_empty(slot(raw, 1)),
            wallet_to: string_or_empty(slot(raw, 2)),
            currency: string_or_empty(slot(raw, 4)),
            currency_to: string_or_empty(slot(raw, 5)),
            amount: decimal_or_zero(slot(raw, 7)),
        })
    }
}

/// Payload of an `acc_dep` (deposit address) notification.
///
/// Layout: `[_, METHOD, CURRENCY_CODE, _, ADDRESS, POOL_ADDRESS]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositAddressInfo {
    pub method: String,
    pub currency_code: String,
    pub address: String,
    /// Set for currencies that share a pool address and use `address` as a tag.
    pub pool_address: String,
}

impl DepositAddressInfo {
    fn from_raw(raw: &[Value]) -> Option<Self> {
        if raw.len() < 5 {
            return None;
        }
        Some(Self {
            method: string_or_empty(slot(raw, 1)),
            currency_code: string_or_empty(slot(raw, 2)),
            address: string_or_empty(slot(raw, 4)),
            pool_address: string_or_empty(slot(raw, 5)),
        })
    }
}

/// Payload of an `acc_wd-req` (withdrawal request) notification.
///
/// Layout: `[WITHDRAWAL_ID, _, METHOD, PAYMENT_ID, WALLET, AMOUNT, _, _, WITHDRAWAL_FEE]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalInfo {
    pub withdrawal_id: i64,
    pub method: String,
    pub payment_id: String,
    pub wallet: String,
    pub amount: Decimal,
    pub withdrawal_fee: Decimal,
}

impl WithdrawalInfo {
    fn from_raw(raw: &[Value]) -> Option<Self> {
        if raw.len() < 6 {
            return None;
        }
        Some(Self {
            withdrawal_id: i64_or_zero(slot(raw, 0)),
            method: string_or_empty(slot(raw, 2)),
            payment_id: string_or_empty(slot(raw, 3)),
            wallet: string_or_empty(slot(raw, 4)),
            amount: decimal_or_zero(slot(raw, 5)),
            withdrawal_fee: decimal_or_zero(slot(raw, 8)),
        })
    }
}
