use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of ledger movement. Sign is implied by the kind, never stored:
/// deposits and earnings credit the balance, withdrawals and purchases
/// debit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Cash paid into the wallet
    Deposit,
    /// Cash paid out of the wallet
    Withdrawal,
    /// Purchase of a yield plan
    Purchase,
    /// Daily yield credited by active plans
    Earning,
}

impl TransactionKind {
    /// Whether this kind increases the balance.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Earning)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
            TransactionKind::Purchase => write!(f, "Purchase"),
            TransactionKind::Earning => write!(f, "Earning"),
        }
    }
}

/// Sort order for history listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest first (default for display)
    NewestFirst,
    /// Oldest first
    OldestFirst,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

/// A single immutable entry in the transaction history.
///
/// Entries are append-only. The `id` is a per-account sequence counter,
/// so creation order is preserved even when two entries share a
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequence number, unique and monotonically increasing per account
    pub id: u64,

    /// Creation time (UTC, naive)
    pub timestamp: NaiveDateTime,

    /// Closed movement tag
    pub kind: TransactionKind,

    /// Magnitude of the movement (always non-negative)
    pub amount: f64,

    /// Human-readable label shown in the history view
    pub description: String,
}

impl Transaction {
    pub fn new(id: u64, kind: TransactionKind, amount: f64, description: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: Utc::now().naive_utc(),
            kind,
            amount,
            description: description.into(),
        }
    }

    /// The balance effect of this entry: positive for credits,
    /// negative for debits.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}
