use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::plan::{Plan, PlanTemplate};
use crate::models::transaction::{Transaction, TransactionKind};

/// Fixed description for deposit entries.
pub const DEPOSIT_DESCRIPTION: &str = "Deposit confirmed";

/// Fixed description for withdrawal entries.
pub const WITHDRAWAL_DESCRIPTION: &str = "Withdrawal requested";

/// Runs the account ledger: deposits, withdrawals, plan purchases and
/// the once-per-day earnings accrual.
///
/// Pure business logic operating on `&mut Account`, no I/O and no clock
/// access. Dates come in as explicit parameters so every rule is
/// testable without touching wall time. Every operation either fully
/// applies its effect or rejects with exactly one error and no effect.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Add cash to the wallet.
    ///
    /// Rules, checked in order:
    /// - amount must be a finite, positive number,
    /// - amount must meet the configured minimum deposit.
    ///
    /// On success the balance is credited and a Deposit entry appended.
    /// Returns the updated balance.
    pub fn deposit(&self, account: &mut Account, amount: f64) -> Result<f64, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount(format!(
                "deposit amount must be a positive number, got {amount}"
            )));
        }
        if amount < account.settings.min_deposit {
            return Err(CoreError::InvalidAmount(format!(
                "minimum deposit is {}, got {amount}",
                account.settings.min_deposit
            )));
        }

        account.balance += amount;
        Self::log_transaction(account, TransactionKind::Deposit, amount, DEPOSIT_DESCRIPTION);
        Ok(account.balance)
    }

    /// Take cash out of the wallet.
    ///
    /// Rules, checked in order (at most one error per call):
    /// - `InvalidAmount` when the amount is not a finite positive number,
    /// - `BelowMinimum` when it is under the governing minimum
    ///   (see [`Self::min_withdrawal`]),
    /// - `InsufficientFunds` when it exceeds the balance.
    ///
    /// On success the balance is debited and a Withdrawal entry appended.
    /// Returns the updated balance.
    pub fn withdraw(&self, account: &mut Account, amount: f64) -> Result<f64, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount(format!(
                "withdrawal amount must be a positive number, got {amount}"
            )));
        }
        let minimum = self.min_withdrawal(account);
        if amount < minimum {
            return Err(CoreError::BelowMinimum { amount, minimum });
        }
        if amount > account.balance {
            return Err(CoreError::InsufficientFunds {
                requested: amount,
                available: account.balance,
            });
        }

        account.balance -= amount;
        Self::log_transaction(account, TransactionKind::Withdrawal, amount, WITHDRAWAL_DESCRIPTION);
        Ok(account.balance)
    }

    /// Buy a plan from a catalog template, dated `purchased_on`.
    ///
    /// Fails with `InsufficientFunds` when the price exceeds the
    /// balance; otherwise debits the price, appends the plan and logs a
    /// Purchase entry as one atomic unit.
    ///
    /// Template fields are trusted to be positive (catalog contract,
    /// see [`PlanTemplate`]).
    pub fn purchase_plan(
        &self,
        account: &mut Account,
        template: PlanTemplate,
        purchased_on: NaiveDate,
    ) -> Result<(), CoreError> {
        if template.price > account.balance {
            return Err(CoreError::InsufficientFunds {
                requested: template.price,
                available: account.balance,
            });
        }

        let plan = Plan::purchased(template, purchased_on);
        account.balance -= plan.price;
        let description = format!("Purchased plan {}", plan.machine_name);
        let price = plan.price;
        account.plans.push(plan);
        Self::log_transaction(account, TransactionKind::Purchase, price, description);
        Ok(())
    }

    /// Credit one day's yield across all active plans, at most once per
    /// calendar day.
    ///
    /// No-op whenever `today` is not after the last accrual date, so the
    /// accrual clock only ever moves forward and the operation is safe
    /// to call arbitrarily often (the UI layer calls it before every
    /// read). When yield is credited, a single aggregated Earning entry
    /// is appended naming the number of contributing plans.
    ///
    /// Returns the amount credited (0 when nothing accrued).
    pub fn accrue_daily_earnings(&self, account: &mut Account, today: NaiveDate) -> f64 {
        if today <= account.last_accrual_date {
            return 0.0;
        }

        let total_yield: f64 = account.plans.iter().map(|p| p.daily_yield).sum();
        if total_yield > 0.0 {
            account.balance += total_yield;
            let description = format!(
                "Daily earnings from {} active plans",
                account.plans.len()
            );
            Self::log_transaction(account, TransactionKind::Earning, total_yield, description);
        }
        account.last_accrual_date = today;

        total_yield
    }

    /// The withdrawal floor currently in effect: the most restrictive
    /// (largest) plan minimum, or the configured fallback when no plans
    /// are active.
    #[must_use]
    pub fn min_withdrawal(&self, account: &Account) -> f64 {
        account
            .plans
            .iter()
            .map(|p| p.min_withdrawal)
            .reduce(f64::max)
            .unwrap_or(account.settings.fallback_min_withdrawal)
    }

    /// Wipe the account back to its opening state, dated `today`:
    /// zero balance, no plans, no history, accrual clock reset.
    /// Settings are configuration, not account state, and are kept.
    pub fn reset(&self, account: &mut Account, today: NaiveDate) {
        account.balance = 0.0;
        account.plans.clear();
        account.transactions.clear();
        account.last_accrual_date = today;
        account.next_transaction_id = 0;
    }

    /// Append a history entry with the next sequence id.
    fn log_transaction(
        account: &mut Account,
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
    ) {
        let id = account.next_transaction_id;
        account.next_transaction_id += 1;
        account
            .transactions
            .push(Transaction::new(id, kind, amount, description));
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
