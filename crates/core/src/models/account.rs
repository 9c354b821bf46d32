use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::plan::Plan;
use super::settings::Settings;
use super::transaction::Transaction;

/// The aggregate root. Everything in here is the snapshot that gets
/// serialized, encrypted, and handed to the caller for safekeeping.
///
/// Invariants maintained by the ledger operations (never by callers
/// mutating fields directly):
/// - `balance` equals the signed sum of all transaction amounts,
/// - `balance >= 0` after every operation,
/// - `transactions` is append-only, ids strictly increasing,
/// - `plans` is in purchase order and plans are immutable once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Current cash balance
    pub balance: f64,

    /// Active plans, insertion order = purchase order
    pub plans: Vec<Plan>,

    /// Full movement history, oldest first. Exposed newest-first by
    /// the query layer.
    pub transactions: Vec<Transaction>,

    /// Calendar date on which daily earnings were last credited.
    /// Advances monotonically; gates `accrue_daily_earnings`.
    pub last_accrual_date: NaiveDate,

    /// User settings; the only state that survives `reset()`
    pub settings: Settings,

    /// Next transaction sequence number
    #[serde(default)]
    pub next_transaction_id: u64,
}

impl Account {
    /// Create an empty account opened on the given date.
    /// Balance 0, no plans, no history, accrual clock set to `opened_on`.
    pub fn new(opened_on: NaiveDate) -> Self {
        Self {
            balance: 0.0,
            plans: Vec::new(),
            transactions: Vec::new(),
            last_accrual_date: opened_on,
            settings: Settings::default(),
            next_transaction_id: 0,
        }
    }
}
