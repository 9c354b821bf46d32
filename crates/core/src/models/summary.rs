use serde::{Deserialize, Serialize};

/// Point-in-time summary of the whole account, computed from the
/// transaction log and the active plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Date this summary was computed for
    pub as_of_date: chrono::NaiveDate,

    /// Currency code used for all monetary values
    pub currency: String,

    /// Current cash balance
    pub balance: f64,

    /// Number of active plans
    pub active_plans: usize,

    /// Sum of daily yields across all active plans
    pub total_daily_yield: f64,

    /// Withdrawal floor currently in effect
    pub min_withdrawal: f64,

    /// Lifetime sum of all deposits
    pub total_deposited: f64,

    /// Lifetime sum of all withdrawals
    pub total_withdrawn: f64,

    /// Lifetime sum of all plan purchases
    pub total_invested: f64,

    /// Lifetime sum of all credited earnings
    pub total_earned: f64,

    /// Total number of history entries
    pub transaction_count: usize,
}
