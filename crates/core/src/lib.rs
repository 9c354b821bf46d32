pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use models::{
    account::Account,
    plan::{Plan, PlanTemplate},
    settings::Settings,
    summary::AccountSummary,
    transaction::{Transaction, TransactionKind, TransactionSortOrder},
};
use services::{analytics_service::AnalyticsService, ledger_service::LedgerService};
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the Yield Wallet core library.
/// Holds the account state and the services that operate on it.
///
/// The UI layer owns one instance per session, calls the mutating
/// operations from its event handlers, and reads the exposed state to
/// render views. It never touches account fields directly.
#[must_use]
pub struct YieldWallet {
    account: Account,
    ledger_service: LedgerService,
    analytics_service: AnalyticsService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for YieldWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YieldWallet")
            .field("balance", &self.account.balance)
            .field("plans", &self.account.plans.len())
            .field("transactions", &self.account.transactions.len())
            .field("last_accrual_date", &self.account.last_accrual_date)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl YieldWallet {
    /// Create a brand new empty account opened today, with default
    /// settings. This is the login/registration entry point.
    pub fn create_new() -> Self {
        Self::build(Account::new(Utc::now().date_naive()))
    }

    /// Create an empty account opened on an explicit date. Useful when
    /// the caller controls the clock (tests, replays).
    pub fn create_at(opened_on: NaiveDate) -> Self {
        Self::build(Account::new(opened_on))
    }

    /// Load an existing account from encrypted snapshot bytes.
    /// Use this for WASM / Tauri where the frontend handles file I/O.
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let account = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(account))
    }

    /// Save the current account to encrypted snapshot bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.account, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from an encrypted file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let account = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(account))
    }

    /// Save to an encrypted file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.account, path, password)?;
        self.dirty = false;
        Ok(())
    }

    // ── Ledger Operations ───────────────────────────────────────────

    /// Deposit cash into the wallet. Returns the updated balance.
    pub fn deposit(&mut self, amount: f64) -> Result<f64, CoreError> {
        let balance = self.ledger_service.deposit(&mut self.account, amount)?;
        self.dirty = true;
        Ok(balance)
    }

    /// Withdraw cash from the wallet, subject to the governing minimum.
    /// Returns the updated balance.
    pub fn withdraw(&mut self, amount: f64) -> Result<f64, CoreError> {
        let balance = self.ledger_service.withdraw(&mut self.account, amount)?;
        self.dirty = true;
        Ok(balance)
    }

    /// Buy a plan from a catalog template, dated today.
    pub fn purchase_plan(&mut self, template: PlanTemplate) -> Result<(), CoreError> {
        let today = Utc::now().date_naive();
        self.purchase_plan_on(template, today)
    }

    /// Buy a plan with an explicit purchase date.
    pub fn purchase_plan_on(
        &mut self,
        template: PlanTemplate,
        purchased_on: NaiveDate,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .purchase_plan(&mut self.account, template, purchased_on)?;
        self.dirty = true;
        Ok(())
    }

    /// Credit one day's yield across all active plans, at most once per
    /// calendar day. The UI calls this before every state read; repeat
    /// calls on the same day are no-ops. Returns the amount credited.
    pub fn accrue_daily_earnings(&mut self, today: NaiveDate) -> f64 {
        let credited = self.ledger_service.accrue_daily_earnings(&mut self.account, today);
        if credited > 0.0 {
            self.dirty = true;
        }
        credited
    }

    /// Accrue against the real wall-clock date.
    pub fn accrue_today(&mut self) -> f64 {
        self.accrue_daily_earnings(Utc::now().date_naive())
    }

    /// The withdrawal floor currently in effect: the largest plan
    /// minimum, or the configured fallback with no active plans.
    #[must_use]
    pub fn current_min_withdrawal(&self) -> f64 {
        self.ledger_service.min_withdrawal(&self.account)
    }

    /// Wipe the account back to its opening state (logout / fresh
    /// registration). Settings survive; everything else is dropped.
    pub fn reset(&mut self) {
        self.reset_at(Utc::now().date_naive());
    }

    /// Reset with an explicit date for the new accrual clock.
    pub fn reset_at(&mut self, today: NaiveDate) {
        self.ledger_service.reset(&mut self.account, today);
        self.dirty = true;
    }

    // ── Observable State ────────────────────────────────────────────

    /// Current cash balance.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.account.balance
    }

    /// Active plans in purchase order.
    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.account.plans
    }

    /// Number of active plans.
    #[must_use]
    pub fn active_plan_count(&self) -> usize {
        self.account.plans.len()
    }

    /// Sum of daily yields across all active plans.
    #[must_use]
    pub fn total_daily_yield(&self) -> f64 {
        self.account.plans.iter().map(|p| p.daily_yield).sum()
    }

    /// Date on which daily earnings were last credited.
    #[must_use]
    pub fn last_accrual_date(&self) -> NaiveDate {
        self.account.last_accrual_date
    }

    // ── Transaction History ─────────────────────────────────────────

    /// Full history, newest first (display order).
    #[must_use]
    pub fn transactions(&self) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self.account.transactions.iter().collect();
        txs.reverse(); // internal storage is oldest-first
        txs
    }

    /// Total number of history entries without materializing a vector.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.account.transactions.len()
    }

    /// History entries of one kind, newest first.
    #[must_use]
    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self
            .account
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .collect();
        txs.reverse();
        txs
    }

    /// History entries within a date range (inclusive), newest first.
    #[must_use]
    pub fn transactions_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self
            .account
            .transactions
            .iter()
            .filter(|t| {
                let date = t.timestamp.date();
                date >= from && date <= to
            })
            .collect();
        txs.reverse();
        txs
    }

    /// Search history by matching the query against descriptions
    /// (case-insensitive), newest first.
    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        let q = query.to_lowercase();
        let mut txs: Vec<&Transaction> = self
            .account
            .transactions
            .iter()
            .filter(|t| t.description.to_lowercase().contains(&q))
            .collect();
        txs.reverse();
        txs
    }

    /// History entries in an explicit sort order. Ties keep creation
    /// order (sorts are stable, ids are monotonic).
    #[must_use]
    pub fn transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self.account.transactions.iter().collect();
        match order {
            TransactionSortOrder::NewestFirst => txs.reverse(),
            TransactionSortOrder::OldestFirst => {}
            TransactionSortOrder::AmountDesc => txs.sort_by(|a, b| {
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            TransactionSortOrder::AmountAsc => txs.sort_by(|a, b| {
                a.amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        txs
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Full account summary as of today.
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        self.analytics_service
            .account_summary(&self.account, Utc::now().date_naive())
    }

    /// Full account summary as of an explicit date.
    #[must_use]
    pub fn summary_as_of(&self, as_of: NaiveDate) -> AccountSummary {
        self.analytics_service.account_summary(&self.account, as_of)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.account.settings
    }

    /// Set the display currency (e.g., "COP", "USD").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_display_currency(&mut self, currency: String) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., COP, USD)"
            )));
        }
        self.account.settings.display_currency = trimmed;
        self.dirty = true;
        Ok(())
    }

    /// Set the minimum accepted deposit.
    pub fn set_min_deposit(&mut self, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount(format!(
                "minimum deposit must be a positive number, got {amount}"
            )));
        }
        self.account.settings.min_deposit = amount;
        self.dirty = true;
        Ok(())
    }

    /// Set the withdrawal floor used when no plans are active.
    pub fn set_fallback_min_withdrawal(&mut self, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount(format!(
                "fallback minimum withdrawal must be a positive number, got {amount}"
            )));
        }
        self.account.settings.fallback_min_withdrawal = amount;
        self.dirty = true;
        Ok(())
    }

    // ── Password & Dirty State ──────────────────────────────────────

    /// Re-encrypt the account snapshot with a new password.
    /// Returns the new encrypted bytes for the caller to store.
    ///
    /// `last_saved_bytes` must be the most recently saved snapshot; the
    /// current password is verified by decrypting it. On a wrong
    /// password this returns `CoreError::Decryption`.
    pub fn change_password(
        &mut self,
        last_saved_bytes: &[u8],
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<u8>, CoreError> {
        // Verify the current password against the actual saved data.
        StorageManager::load_from_bytes(last_saved_bytes, current_password)?;

        let new_bytes = StorageManager::save_to_bytes(&self.account, new_password)?;
        self.dirty = false;
        Ok(new_bytes)
    }

    /// Returns `true` if the account has been modified since the last
    /// save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the full history as a JSON string (oldest first).
    pub fn export_history_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.account.transactions)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize history to JSON: {e}")))
    }

    /// Export the full history as a CSV string (oldest first).
    /// Columns: id, timestamp, kind, amount, description
    #[must_use]
    pub fn export_history_to_csv(&self) -> String {
        let mut csv = String::from("id,timestamp,kind,amount,description\n");
        for tx in &self.account.transactions {
            // Escape CSV: quote fields containing commas, quotes, or newlines
            let description = &tx.description;
            let escaped = if description.contains(',')
                || description.contains('"')
                || description.contains('\n')
            {
                format!("\"{}\"", description.replace('"', "\"\""))
            } else {
                description.clone()
            };
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                tx.id, tx.timestamp, tx.kind, tx.amount, escaped,
            ));
        }
        csv
    }

    /// Export the full account snapshot as JSON (unencrypted, for
    /// debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.account)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize account: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(account: Account) -> Self {
        Self {
            account,
            ledger_service: LedgerService::new(),
            analytics_service: AnalyticsService::new(),
            dirty: false,
        }
    }
}
