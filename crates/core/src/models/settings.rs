use serde::{Deserialize, Serialize};

/// User-configurable settings, stored inside the account snapshot.
/// Unlike the rest of the account state these survive a `reset()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency code used when rendering amounts (e.g., "COP", "USD").
    /// Display-only; the ledger itself is single-currency.
    pub display_currency: String,

    /// Smallest deposit the wallet accepts.
    pub min_deposit: f64,

    /// Withdrawal floor applied when no plans are active. With active
    /// plans the most restrictive plan minimum governs instead.
    pub fallback_min_withdrawal: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "COP".to_string(),
            min_deposit: 10_000.0,
            fallback_min_withdrawal: 10_000.0,
        }
    }
}
