//! Wallet operations: balances, transfers, deposit addresses, withdrawals
//! and movement history.
//!
//! Every call builds a signed request, executes it and decodes the reply.
//! Nothing is cached between calls.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::Synchronous;
use crate::Result;
use crate::auth::{Permission, RequestFactory};
use crate::models::{
    DepositAddressParams, MovementRecord, MovementsParams, Notification, TransferParams,
    WalletSnapshot, WithdrawParams, movements_from_raw,
};

/// Stateless wallet endpoint client over a request factory and an executor.
#[derive(Debug, Clone)]
pub struct WalletService<F, E> {
    factory: F,
    executor: E,
}

impl<F: RequestFactory, E: Synchronous> WalletService<F, E> {
    pub fn new(factory: F, executor: E) -> Self {
        Self { factory, executor }
    }

    /// Retrieves every wallet on the account.
    ///
    /// # Errors
    ///
    /// Propagates construction, transport and decode errors unchanged.
    pub fn wallets(&self) -> Result<WalletSnapshot> {
        let request = self
            .factory
            .new_authenticated_request(Permission::Read, "wallets")?;
        debug!(endpoint = "wallets", "Sending wallet request");
        let raw = self.executor.request(&request)?;
        WalletSnapshot::from_raw(&raw)
    }

    /// Moves funds between two of the account's wallets, optionally
    /// converting to `currency_to`.
    ///
    /// # Errors
    ///
    /// Propagates construction, transport and decode errors unchanged.
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        currency: &str,
        currency_to: &str,
        amount: Decimal,
    ) -> Result<Notification> {
        let params = TransferParams {
            from: from.to_string(),
            to: to.to_string(),
            currency: currency.to_string(),
            currency_to: currency_to.to_string(),
            amount,
        };
        self.write("transfer", &params)
    }

    /// Returns the current deposit address of `wallet` for `method`.
    ///
    /// # Errors
    ///
    /// Propagates construction, transport and decode errors unchanged.
    pub fn deposit_address(&self, wallet: &str, method: &str) -> Result<Notification> {
        self.request_deposit_address(wallet, method, 0)
    }

    /// Creates a new deposit address. Earlier addresses stay valid.
    ///
    /// # Errors
    ///
    /// Propagates construction, transport and decode errors unchanged.
    pub fn create_deposit_address(&self, wallet: &str, method: &str) -> Result<Notification> {
        self.request_deposit_address(wallet, method, 1)
    }

    fn request_deposit_address(
        &self,
        wallet: &str,
        method: &str,
        op_renew: u8,
    ) -> Result<Notification> {
        let params = DepositAddressParams {
            wallet: wallet.to_string(),
            method: method.to_string(),
            op_renew,
        };
        self.write("deposit/address", &params)
    }

    /// Withdraws `amount` from `wallet` to `address`.
    ///
    /// `payment_id` (memo/tag) is sent only when given.
    ///
    /// # Errors
    ///
    /// Propagates construction, transport and decode errors unchanged.
    pub fn withdraw(
        &self,
        wallet: &str,
        method: &str,
        amount: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> Result<Notification> {
        let params = WithdrawParams {
            wallet: wallet.to_string(),
            method: method.to_string(),
            amount,
            address: address.to_string(),
            payment_id: payment_id.map(String::from),
        };
        self.write("withdraw", &params)
    }

    /// Retrieves deposit and withdrawal history.
    ///
    /// `start` and `end` are millisecond timestamps; `limit` may not exceed
    /// [`MOVEMENTS_MAX_LIMIT`](crate::models::MOVEMENTS_MAX_LIMIT).
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Validation`](crate::BfxError::Validation) before
    /// any request is built when `limit` is over the ceiling. Otherwise
    /// propagates construction, transport and decode errors unchanged.
    pub fn movements(
        &self,
        start: Option<i64>,
        end: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<MovementRecord>> {
        let params = MovementsParams::new(start, end, limit)?;
        let body = serde_json::to_value(&params)?;
        let request = self.factory.new_authenticated_request_with_body(
            Permission::Read,
            "movements/hist",
            &body,
        )?;
        debug!(endpoint = "movements/hist", ?start, ?end, ?limit, "Sending movements request");
        let raw = self.executor.request(&request)?;
        movements_from_raw(&raw)
    }

    fn write<P: Serialize>(&self, endpoint: &str, params: &P) -> Result<Notification> {
        let body = serde_json::to_value(params)?;
        let request =
            self.factory
                .new_authenticated_request_with_body(Permission::Write, endpoint, &body)?;
        debug!(endpoint, "Sending wallet write request");
        let raw = self.executor.request(&request)?;
        Notification::from_raw(&raw)
    }
}
