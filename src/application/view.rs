use serde::{Deserialize, Serialize};

use crate::domain::{Entry, Summary};

/// Everything a presentation layer needs to draw the budget, owned and
/// detached from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetView {
    /// Month and year the budget is shown for, e.g. "October 2026".
    pub period: String,
    pub summary: Summary,
    pub income: Vec<Entry>,
    /// Expenses carry their current percentage of income.
    pub expenses: Vec<Entry>,
}

impl BudgetView {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}
