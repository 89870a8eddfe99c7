//! Wallet snapshot models.
//!
//! `POST auth/r/wallets` answers with one row per wallet:
//! `[TYPE, CURRENCY, BALANCE, UNSETTLED_INTEREST, BALANCE_AVAILABLE, DESCRIPTION, META]`.
//! The last two slots are only sent by newer API versions.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::convert::{decimal_or_zero, slot, string_or_empty};
use super::expect_array;

/// Slot positions inside a wallet row.
mod field {
    pub const TYPE: usize = 0;
    pub const CURRENCY: usize = 1;
    pub const BALANCE: usize = 2;
    pub const UNSETTLED_INTEREST: usize = 3;
    pub const BALANCE_AVAILABLE: usize = 4;
    pub const DESCRIPTION: usize = 5;
    pub const META: usize = 6;
}

/// Slots every wallet row must carry.
pub const WALLET_MIN_FIELDS: usize = 5;

/// Balance of a single wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    /// Wallet type: `"exchange"`, `"margin"` or `"funding"`.
    pub wallet_type: String,
    pub currency: String,
    pub balance: Decimal,
    pub unsettled_interest: Decimal,
    /// Zero when the exchange has not calculated it yet.
    pub balance_available: Decimal,
    pub description: String,
    pub meta: Map<String, Value>,
}

impl Wallet {
    /// Decodes one wallet row.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Decode`](crate::BfxError::Decode) if the row has
    /// fewer than [`WALLET_MIN_FIELDS`] slots.
    pub fn from_raw(raw: &[Value]) -> crate::Result<Self> {
        if raw.len() < WALLET_MIN_FIELDS {
            return Err(crate::BfxError::Decode(format!(
                "wallet row needs at least {WALLET_MIN_FIELDS} fields, got {}: {raw:?}",
                raw.len()
            )));
        }

        Ok(Self {
            wallet_type: string_or_empty(slot(raw, field::TYPE)),
            currency: string_or_empty(slot(raw, field::CURRENCY)),
            balance: decimal_or_zero(slot(raw, field::BALANCE)),
            unsettled_interest: decimal_or_zero(slot(raw, field::UNSETTLED_INTEREST)),
            balance_available: decimal_or_zero(slot(raw, field::BALANCE_AVAILABLE)),
            description: string_or_empty(slot(raw, field::DESCRIPTION)),
            meta: slot(raw, field::META).as_object().cloned().unwrap_or_default(),
        })
    }
}

/// Point-in-time view of every wallet on the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalletSnapshot {
    pub wallets: Vec<Wallet>,
}

impl WalletSnapshot {
    /// Decodes a wallets response.
    ///
    /// An empty array is an account without wallets, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Decode`](crate::BfxError::Decode) if the response
    /// is not an array of wallet rows.
    pub fn from_raw(raw: &Value) -> crate::Result<Self> {
        let rows = expect_array(raw, "wallet snapshot")?;
        let wallets = rows
            .iter()
            .map(|row| Wallet::from_raw(expect_array(row, "wallet")?))
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(Self { wallets })
    }

    /// Returns the wallet of the given type and currency.
    pub fn find(&self, wallet_type: &str, currency: &str) -> Option<&Wallet> {
        self.wallets
            .iter()
            .find(|w| w.wallet_type == wallet_type && w.currency == currency)
    }
}
