use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A plan as offered in the catalog, before purchase.
///
/// **Contract**: `price`, `daily_yield` and `min_withdrawal` must all be
/// positive. Templates come from the (out-of-scope) catalog UI, which
/// only offers valid plans; the ledger does not re-validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTemplate {
    /// Commercial name of the plan (e.g., "Plan Básico")
    pub name: String,

    /// Name of the mining machine backing the plan, used in
    /// transaction descriptions (e.g., "Antminer S9")
    pub machine_name: String,

    /// One-time purchase price, debited from the balance
    pub price: f64,

    /// Amount credited once per accrual cycle
    pub daily_yield: f64,

    /// Withdrawal floor imposed while this plan is active
    pub min_withdrawal: f64,
}

impl PlanTemplate {
    pub fn new(
        name: impl Into<String>,
        machine_name: impl Into<String>,
        price: f64,
        daily_yield: f64,
        min_withdrawal: f64,
    ) -> Self {
        Self {
            name: name.into(),
            machine_name: machine_name.into(),
            price,
            daily_yield,
            min_withdrawal,
        }
    }
}

/// A purchased yield instrument. All fields are fixed at purchase time;
/// plans never expire or change during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Commercial name of the plan
    pub name: String,

    /// Name of the mining machine backing the plan
    pub machine_name: String,

    /// Price paid at purchase
    pub price: f64,

    /// Amount credited once per accrual cycle
    pub daily_yield: f64,

    /// Withdrawal floor imposed while this plan is active
    pub min_withdrawal: f64,

    /// Date the plan was bought (day granularity)
    pub purchase_date: NaiveDate,
}

impl Plan {
    /// Materialize a purchased plan from a catalog template.
    pub fn purchased(template: PlanTemplate, purchase_date: NaiveDate) -> Self {
        Self {
            name: template.name,
            machine_name: template.machine_name,
            price: template.price,
            daily_yield: template.daily_yield,
            min_withdrawal: template.min_withdrawal,
            purchase_date,
        }
    }
}
