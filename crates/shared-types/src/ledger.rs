//! # Ledger Transfer Port
//!
//! The external value-transfer primitive used for bonds and query fees.
//! A transfer either fully succeeds or fails; a failure aborts the operation
//! that requested it before any of that operation's state changes apply.

use crate::entities::{Amount, Identity};
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

/// Transfer failures reported by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Source account cannot cover the amount.
    #[error("insufficient funds in {account}: balance {balance}, required {required}")]
    InsufficientFunds {
        account: Identity,
        balance: Amount,
        required: Amount,
    },
    /// Ledger refused the transfer for another reason.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Outbound port to the ledger's value-transfer primitive.
pub trait LedgerTransfer: Send + Sync {
    /// Move `amount` from `from` to `to`. Synchronous and atomic.
    fn transfer(&self, amount: Amount, from: &Identity, to: &Identity)
        -> Result<(), TransferError>;
}

impl<T: LedgerTransfer + ?Sized> LedgerTransfer for std::sync::Arc<T> {
    fn transfer(
        &self,
        amount: Amount,
        from: &Identity,
        to: &Identity,
    ) -> Result<(), TransferError> {
        (**self).transfer(amount, from, to)
    }
}

/// In-memory ledger with per-identity balances.
///
/// Used by the runtime when no external ledger is attached, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: Mutex<HashMap<Identity, Amount>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger seeded with the given balances.
    pub fn with_balances(balances: impl IntoIterator<Item = (Identity, Amount)>) -> Self {
        Self {
            balances: Mutex::new(balances.into_iter().collect()),
        }
    }

    /// Add funds to an account.
    pub fn credit(&self, account: Identity, amount: Amount) {
        let mut balances = self.balances.lock();
        let entry = balances.entry(account).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Current balance (zero for unknown accounts).
    pub fn balance_of(&self, account: &Identity) -> Amount {
        self.balances.lock().get(account).copied().unwrap_or(0)
    }
}

impl LedgerTransfer for InMemoryLedger {
    fn transfer(
        &self,
        amount: Amount,
        from: &Identity,
        to: &Identity,
    ) -> Result<(), TransferError> {
        if amount == 0 || from == to {
            return Ok(());
        }

        let mut balances = self.balances.lock();
        let balance = balances.get(from).copied().unwrap_or(0);
        if balance < amount {
            tracing::debug!(%from, balance, amount, "ledger transfer refused");
            return Err(TransferError::InsufficientFunds {
                account: *from,
                balance,
                required: amount,
            });
        }

        balances.insert(*from, balance - amount);
        let credit = balances.entry(*to).or_insert(0);
        *credit = credit.saturating_add(amount);
        Ok(())
    }
}
