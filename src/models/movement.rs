//! Deposit and withdrawal history models.
//!
//! `POST auth/r/movements/hist` returns rows of exactly 22 slots, most of
//! them placeholders. Only the positions listed in [`field`] are read.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::convert::{decimal_or_zero, i64_or_zero, slot, string_or_empty};
use super::expect_array;

/// Exact slot count of a movement row.
pub const MOVEMENT_FIELDS: usize = 22;

/// Slot positions inside a movement row. New upstream fields only need an
/// entry here and on [`MovementRecord`].
pub mod field {
    pub const ID: usize = 0;
    pub const CURRENCY: usize = 1;
    pub const CURRENCY_NAME: usize = 2;
    pub const MTS_STARTED: usize = 5;
    pub const MTS_UPDATED: usize = 6;
    pub const STATUS: usize = 9;
    pub const AMOUNT: usize = 12;
    pub const FEES: usize = 13;
    pub const DESTINATION_ADDRESS: usize = 16;
    pub const TRANSACTION_ID: usize = 20;
    pub const WITHDRAW_TRANSACTION_NOTE: usize = 21;
}

/// One deposit or withdrawal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovementRecord {
    pub id: i64,
    pub currency: String,
    pub currency_name: String,
    /// Millisecond timestamps.
    pub mts_started: i64,
    pub mts_updated: i64,
    /// e.g. `"PENDING"`, `"COMPLETED"`, `"CANCELED"`.
    pub status: String,
    /// Positive for deposits, negative for withdrawals.
    pub amount: Decimal,
    pub fees: Decimal,
    pub destination_address: String,
    pub transaction_id: String,
    pub withdraw_transaction_note: String,
}

impl MovementRecord {
    /// Decodes one movement row.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Decode`](crate::BfxError::Decode) unless the row
    /// has exactly [`MOVEMENT_FIELDS`] slots.
    pub fn from_raw(raw: &[Value]) -> crate::Result<Self> {
        if raw.len() != MOVEMENT_FIELDS {
            return Err(crate::BfxError::Decode(format!(
                "movement row must have {MOVEMENT_FIELDS} fields, got {}: {raw:?}",
                raw.len()
            )));
        }

        Ok(Self {
            id: i64_or_zero(slot(raw, field::ID)),
            currency: string_or_empty(slot(raw, field::CURRENCY)),
            currency_name: string_or_empty(slot(raw, field::CURRENCY_NAME)),
            mts_started: i64_or_zero(slot(raw, field::MTS_STARTED)),
            mts_updated: i64_or_zero(slot(raw, field::MTS_UPDATED)),
            status: string_or_empty(slot(raw, field::STATUS)),
            amount: decimal_or_zero(slot(raw, field::AMOUNT)),
            fees: decimal_or_zero(slot(raw, field::FEES)),
            destination_address: string_or_empty(slot(raw, field::DESTINATION_ADDRESS)),
            transaction_id: string_or_empty(slot(raw, field::TRANSACTION_ID)),
            withdraw_transaction_note: string_or_empty(slot(raw, field::WITHDRAW_TRANSACTION_NOTE)),
        })
    }
}

/// Decodes a movements response, preserving the server's order.
///
/// The whole batch fails on the first malformed row; no partial result is
/// returned.
///
/// # Errors
///
/// Returns [`BfxError::Decode`](crate::BfxError::Decode) if the response is
/// not an array, or any row is not an array of [`MOVEMENT_FIELDS`] slots.
pub fn movements_from_raw(raw: &Value) -> crate::Result<Vec<MovementRecord>> {
    expect_array(raw, "movements")?
        .iter()
        .map(|row| MovementRecord::from_raw(expect_array(row, "movement")?))
        .collect()
}
