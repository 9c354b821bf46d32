use chrono::NaiveDate;

use crate::models::account::Account;
use crate::models::summary::AccountSummary;
use crate::models::transaction::TransactionKind;
use crate::services::ledger_service::LedgerService;

/// Computes account analytics: lifetime totals per movement kind,
/// aggregate plan yield and the governing withdrawal minimum.
///
/// Pure fold over the transaction log; no mutation, no I/O.
pub struct AnalyticsService {
    ledger_service: LedgerService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
        }
    }

    /// Generate a full account summary as of a given date.
    pub fn account_summary(&self, account: &Account, as_of: NaiveDate) -> AccountSummary {
        let mut total_deposited = 0.0;
        let mut total_withdrawn = 0.0;
        let mut total_invested = 0.0;
        let mut total_earned = 0.0;

        for tx in &account.transactions {
            match tx.kind {
                TransactionKind::Deposit => total_deposited += tx.amount,
                TransactionKind::Withdrawal => total_withdrawn += tx.amount,
                TransactionKind::Purchase => total_invested += tx.amount,
                TransactionKind::Earning => total_earned += tx.amount,
            }
        }

        AccountSummary {
            as_of_date: as_of,
            currency: account.settings.display_currency.clone(),
            balance: account.balance,
            active_plans: account.plans.len(),
            total_daily_yield: account.plans.iter().map(|p| p.daily_yield).sum(),
            min_withdrawal: self.ledger_service.min_withdrawal(account),
            total_deposited,
            total_withdrawn,
            total_invested,
            total_earned,
            transaction_count: account.transactions.len(),
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
