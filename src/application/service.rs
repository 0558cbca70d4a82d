use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::{
    Cents, Entry, EntryId, EntryKind, EntryRef, Ledger, ParseCentsError, Summary, parse_cents,
};

use super::{AppError, BudgetView};

/// Raw form input as typed by the user, before any parsing.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    /// "income" or "expense" (short forms accepted)
    pub kind: String,
    pub description: String,
    /// Decimal amount, e.g. "12.50"
    pub value: String,
}

impl EntryInput {
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            value: value.into(),
        }
    }
}

/// Application service coordinating user actions with the ledger.
/// Every mutation is followed by a recalculation, so reads are never stale.
pub struct BudgetService {
    ledger: Ledger,
    period: NaiveDate,
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetService {
    /// Create an empty budget for the current month.
    pub fn new() -> Self {
        Self::for_period(Local::now().date_naive())
    }

    /// Create an empty budget labelled with the month containing `date`.
    pub fn for_period(date: NaiveDate) -> Self {
        let mut ledger = Ledger::new();
        ledger.recalculate();
        Self {
            ledger,
            period: date,
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Validate raw form input and add it to the ledger.
    pub fn submit(&mut self, input: EntryInput) -> Result<Entry, AppError> {
        let parsed = parse_input(&input);
        match parsed {
            Ok((kind, description, value_cents)) => self.add(kind, description, value_cents),
            Err(err) => {
                debug!(kind = %input.kind, value = %input.value, "rejected entry: {}", err);
                Err(err)
            }
        }
    }

    /// Add an already parsed entry.
    pub fn add(
        &mut self,
        kind: EntryKind,
        description: impl Into<String>,
        value_cents: Cents,
    ) -> Result<Entry, AppError> {
        let entry = self.ledger.add_entry(kind, description, value_cents)?;
        debug!(entry = %entry.entry_ref(), value_cents, "added entry");
        self.refresh();
        Ok(entry)
    }

    /// Remove an entry. Returns false if it did not exist.
    pub fn remove(&mut self, entry: EntryRef) -> bool {
        let removed = self.ledger.delete_entry(entry.kind, entry.id);
        if removed {
            debug!(entry = %entry, "removed entry");
        } else {
            debug!(entry = %entry, "no entry to remove");
        }
        self.refresh();
        removed
    }

    /// Remove an entry addressed by its textual `<kind>-<id>` reference.
    pub fn remove_by_id_str(&mut self, raw: &str) -> Result<bool, AppError> {
        let entry: EntryRef = raw.parse()?;
        Ok(self.remove(entry))
    }

    fn refresh(&mut self) {
        self.ledger.recalculate();
        let summary = self.ledger.snapshot();
        debug!(
            total_income = summary.total_income,
            total_expense = summary.total_expense,
            budget = summary.budget,
            percentage = ?summary.overall_expense_percentage,
            "recalculated budget"
        );
    }

    // ========================
    // Reads
    // ========================

    pub fn summary(&self) -> Summary {
        self.ledger.snapshot()
    }

    pub fn expense_percentages(&self) -> Vec<(EntryId, Option<u32>)> {
        self.ledger.expense_percentages()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Month and year label, e.g. "October 2026".
    pub fn period_label(&self) -> String {
        self.period.format("%B %Y").to_string()
    }

    pub fn view(&self) -> BudgetView {
        BudgetView {
            period: self.period_label(),
            summary: self.ledger.snapshot(),
            income: self.ledger.entries(EntryKind::Income).to_vec(),
            expenses: self.ledger.entries(EntryKind::Expense).to_vec(),
        }
    }
}

fn parse_input(input: &EntryInput) -> Result<(EntryKind, String, Cents), AppError> {
    let kind: EntryKind = input.kind.parse()?;

    let description = input.description.trim();
    if description.is_empty() {
        return Err(AppError::EmptyDescription);
    }

    let value_cents = parse_cents(&input.value).map_err(|err| {
        let raw = input.value.clone();
        match err {
            ParseCentsError::InvalidFormat => AppError::InvalidAmount(raw),
            ParseCentsError::TooManyDecimals => AppError::TooManyDecimals(raw),
            ParseCentsError::Overflow => AppError::AmountTooLarge(raw),
        }
    })?;
    if value_cents <= 0 {
        return Err(AppError::NonPositiveAmount(value_cents));
    }

    Ok((kind, description.to_string(), value_cents))
}
