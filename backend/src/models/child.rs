//! Child model
//!
//! Represents a member of a children's group.
//! Each child has:
//! - A display name
//! - A wallet balance (i64, never negative)
//! - A back-reference to the group it belongs to (by id, at most one)
//!
//! The wallet floor is enforced by `debit`: a debit larger than the
//! balance is rejected and leaves the wallet untouched.

use crate::models::group::GroupId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during wallet operations
#[derive(Debug, Error, PartialEq)]
pub enum WalletError {
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("Donation of {amount} would overflow a wallet holding {balance}")]
    Overflow { amount: i64, balance: i64 },
}

/// Unique child identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChildId(Uuid);

impl ChildId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChildId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "child_{}", self.0.simple())
    }
}

/// A member of the group with a wallet
///
/// # Example
/// ```
/// use group_outings_core::Child;
///
/// let mut child = Child::with_wallet("Bob", 300);
/// child.debit(120).unwrap();
/// assert_eq!(child.wallet(), 180);
///
/// // Wallet never goes negative
/// assert!(child.debit(500).is_err());
/// assert_eq!(child.wallet(), 180);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    id: ChildId,

    name: String,

    /// Current balance, never negative
    wallet: i64,

    /// Group this child belongs to, if any
    ///
    /// Non-owning: the group owns membership, not the child's existence.
    group: Option<GroupId>,
}

impl Child {
    /// Create a child with an empty wallet
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_wallet(name, 0)
    }

    /// Create a child with an opening wallet balance
    ///
    /// # Panics
    ///
    /// Panics if `wallet` is negative
    pub fn with_wallet(name: impl Into<String>, wallet: i64) -> Self {
        assert!(wallet >= 0, "wallet must be non-negative");
        Self {
            id: ChildId::new(),
            name: name.into(),
            wallet,
            group: None,
        }
    }

    pub fn id(&self) -> ChildId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wallet(&self) -> i64 {
        self.wallet
    }

    /// Group this child currently belongs to
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        cost <= self.wallet
    }

    /// Debit (decrease) the wallet
    ///
    /// # Returns
    /// - Ok(()) if successful
    /// - Err if the wallet holds less than `amount`; the wallet is unchanged
    pub fn debit(&mut self, amount: i64) -> Result<(), WalletError> {
        assert!(amount >= 0, "amount must be non-negative");

        if !self.can_afford(amount) {
            return Err(WalletError::InsufficientFunds {
                required: amount,
                available: self.wallet,
            });
        }

        self.wallet -= amount;
        Ok(())
    }

    /// Credit (increase) the wallet, used for refunds
    ///
    /// Saturates at `i64::MAX`.
    pub fn credit(&mut self, amount: i64) {
        assert!(amount >= 0, "amount must be non-negative");
        self.wallet = self.wallet.saturating_add(amount);
    }

    /// Add pocket money to the wallet
    ///
    /// Non-positive amounts are rejected so a donation can never drain
    /// the wallet below zero.
    ///
    /// # Example
    /// ```
    /// use group_outings_core::{Child, WalletError};
    ///
    /// let mut child = Child::with_wallet("Amy", 100);
    /// assert_eq!(child.donate(50), Ok(150));
    /// assert_eq!(child.donate(-50), Err(WalletError::NonPositiveAmount(-50)));
    /// assert_eq!(child.wallet(), 150);
    /// ```
    pub fn donate(&mut self, amount: i64) -> Result<i64, WalletError> {
        if amount <= 0 {
            return Err(WalletError::NonPositiveAmount(amount));
        }
        self.wallet = self
            .wallet
            .checked_add(amount)
            .ok_or(WalletError::Overflow {
                amount,
                balance: self.wallet,
            })?;
        Ok(self.wallet)
    }

    pub(crate) fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_exact_balance() {
        let mut child = Child::with_wallet("Sam", 120);
        child.debit(120).unwrap();
        assert_eq!(child.wallet(), 0);
    }

    #[test]
    fn test_debit_rejected_reports_available() {
        let mut child = Child::with_wallet("Sam", 50);
        assert_eq!(
            child.debit(90),
            Err(WalletError::InsufficientFunds {
                required: 90,
                available: 50
            })
        );
    }

    #[test]
    fn test_credit_saturates() {
        let mut child = Child::with_wallet("Lana", i64::MAX - 10);
        child.credit(50);
        assert_eq!(child.wallet(), i64::MAX);
    }

    #[test]
    #[should_panic(expected = "wallet must be non-negative")]
    fn test_negative_opening_wallet_panics() {
        Child::with_wallet("Pete", -1);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Child::new("Eva").id(), Child::new("Eva").id());
    }
}
