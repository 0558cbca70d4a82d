use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cents, Entry, EntryId, EntryKind};

/// Aggregate totals derived from the ledger entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Cents,
    pub total_expense: Cents,
    /// total_income - total_expense
    pub budget: Cents,
    /// Share of income spent. Only defined while the budget is positive.
    pub overall_expense_percentage: Option<u32>,
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    entries: Vec<Entry>,
    next_id: EntryId,
}

impl Bucket {
    fn total(&self) -> Cents {
        self.entries.iter().map(|e| e.value_cents).sum()
    }
}

/// In-memory collection of income and expense entries plus their derived totals.
///
/// Derived values are only refreshed by [`Ledger::recalculate`]; callers mutate,
/// recalculate, then read.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    income: Bucket,
    expenses: Bucket,
    summary: Summary,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry of the given kind and return a copy of it.
    ///
    /// Ids grow per kind from 0 and are never handed out twice, even after
    /// the entry holding them is deleted.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        description: impl Into<String>,
        value_cents: Cents,
    ) -> Result<Entry, LedgerError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LedgerError::InvalidEntry(InvalidEntryReason::EmptyDescription));
        }
        if value_cents <= 0 {
            return Err(LedgerError::InvalidEntry(
                InvalidEntryReason::NonPositiveValue(value_cents),
            ));
        }

        // Keeps every later sum in recalculate within range
        if self.bucket(kind).total().checked_add(value_cents).is_none() {
            return Err(LedgerError::InvalidEntry(InvalidEntryReason::TotalOverflow));
        }

        let bucket = self.bucket_mut(kind);
        let entry = Entry::new(bucket.next_id, kind, description, value_cents);
        bucket.next_id += 1;
        bucket.entries.push(entry.clone());

        Ok(entry)
    }

    /// Remove the entry with the given id. Returns false if there was none.
    pub fn delete_entry(&mut self, kind: EntryKind, id: EntryId) -> bool {
        let entries = &mut self.bucket_mut(kind).entries;
        match entries.iter().position(|e| e.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Recompute totals, budget and per-expense percentages from the entries.
    pub fn recalculate(&mut self) {
        let total_income = self.income.total();
        let total_expense = self.expenses.total();
        let budget = total_income - total_expense;

        // Gated on a positive budget, not on income being present.
        let overall_expense_percentage = if budget > 0 {
            Some(percent_of(total_expense, total_income))
        } else {
            None
        };

        // With no income the previous percentages are kept as they were.
        if total_income > 0 {
            self.expenses.entries = std::mem::take(&mut self.expenses.entries)
                .into_iter()
                .map(|entry| {
                    let percentage = percent_of(entry.value_cents, total_income);
                    entry.with_percentage(Some(percentage))
                })
                .collect();
        }

        self.summary = Summary {
            total_income,
            total_expense,
            budget,
            overall_expense_percentage,
        };
    }

    /// Totals as of the last [`Ledger::recalculate`].
    pub fn snapshot(&self) -> Summary {
        self.summary
    }

    /// (id, percentage of income) for every expense, in display order.
    pub fn expense_percentages(&self) -> Vec<(EntryId, Option<u32>)> {
        self.expenses
            .entries
            .iter()
            .map(|e| (e.id, e.percentage_of_income))
            .collect()
    }

    /// Entries of one kind in insertion order.
    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        &self.bucket(kind).entries
    }

    pub fn get(&self, kind: EntryKind, id: EntryId) -> Option<&Entry> {
        self.entries(kind).iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.income.entries.len() + self.expenses.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket(&self, kind: EntryKind) -> &Bucket {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expenses,
        }
    }

    fn bucket_mut(&mut self, kind: EntryKind) -> &mut Bucket {
        match kind {
            EntryKind::Income => &mut self.income,
            EntryKind::Expense => &mut self.expenses,
        }
    }
}

/// Round `part / whole * 100` half up. `whole` must be positive.
fn percent_of(part: Cents, whole: Cents) -> u32 {
    let part = i128::from(part);
    let whole = i128::from(whole);
    let rounded = (part * 200 + whole).div_euclid(whole * 2);
    u32::try_from(rounded.max(0)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidEntryReason {
    EmptyDescription,
    NonPositiveValue(Cents),
    TotalOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    InvalidEntry(InvalidEntryReason),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidEntry(InvalidEntryReason::EmptyDescription) => {
                write!(f, "Invalid entry: description must not be empty")
            }
            LedgerError::InvalidEntry(InvalidEntryReason::NonPositiveValue(cents)) => {
                write!(
                    f,
                    "Invalid entry: value must be positive, got {} cents",
                    cents
                )
            }
            LedgerError::InvalidEntry(InvalidEntryReason::TotalOverflow) => {
                write!(f, "Invalid entry: total would exceed the supported amount")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn recalculated(mut ledger: Ledger) -> Ledger {
        ledger.recalculate();
        ledger
    }

    #[test]
    fn test_empty_ledger_snapshot() {
        let ledger = recalculated(Ledger::new());
        assert_eq!(
            ledger.snapshot(),
            Summary {
                total_income: 0,
                total_expense: 0,
                budget: 0,
                overall_expense_percentage: None,
            }
        );
        assert!(ledger.is_empty());
        assert!(ledger.expense_percentages().is_empty());
    }

    #[test]
    fn test_ids_are_independent_per_kind() {
        let mut ledger = Ledger::new();
        let a = ledger.add_entry(EntryKind::Income, "Salary", 100000).unwrap();
        let b = ledger.add_entry(EntryKind::Expense, "Rent", 40000).unwrap();
        let c = ledger.add_entry(EntryKind::Income, "Bonus", 5000).unwrap();
        let d = ledger.add_entry(EntryKind::Expense, "Food", 10000).unwrap();
        let e = ledger.add_entry(EntryKind::Expense, "Gym", 3000).unwrap();

        assert_eq!((a.id, c.id), (0, 1));
        assert_eq!((b.id, d.id, e.id), (0, 1, 2));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Expense, "A", 100).unwrap();
        ledger.add_entry(EntryKind::Expense, "B", 100).unwrap();
        assert!(ledger.delete_entry(EntryKind::Expense, 1));

        let c = ledger.add_entry(EntryKind::Expense, "C", 100).unwrap();
        assert_eq!(c.id, 2);

        assert!(ledger.delete_entry(EntryKind::Expense, 0));
        assert!(ledger.delete_entry(EntryKind::Expense, 2));
        let d = ledger.add_entry(EntryKind::Expense, "D", 100).unwrap();
        assert_eq!(d.id, 3);
    }

    #[test]
    fn test_add_rejects_invalid_entries() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.add_entry(EntryKind::Income, "   ", 100),
            Err(LedgerError::InvalidEntry(InvalidEntryReason::EmptyDescription))
        );
        assert_eq!(
            ledger.add_entry(EntryKind::Income, "Zero", 0),
            Err(LedgerError::InvalidEntry(InvalidEntryReason::NonPositiveValue(0)))
        );
        assert!(ledger.add_entry(EntryKind::Expense, "Neg", -5).is_err());
        assert!(ledger.is_empty());

        // Rejections do not consume ids
        let entry = ledger.add_entry(EntryKind::Income, "Ok", 1).unwrap();
        assert_eq!(entry.id, 0);
    }

    #[test]
    fn test_add_rejects_entry_overflowing_total() {
        let mut ledger = Ledger::new();
        let huge = 9_000_000_000_000_000_000; // 9e16 units in cents
        ledger.add_entry(EntryKind::Income, "A", huge).unwrap();

        assert_eq!(
            ledger.add_entry(EntryKind::Income, "B", huge),
            Err(LedgerError::InvalidEntry(InvalidEntryReason::TotalOverflow))
        );
        assert_eq!(ledger.entries(EntryKind::Income).len(), 1);

        // Totals are per kind, so expenses still fit
        ledger.add_entry(EntryKind::Expense, "C", huge).unwrap();
        ledger.recalculate();

        let summary = ledger.snapshot();
        assert_eq!(summary.total_income, huge);
        assert_eq!(summary.total_expense, huge);
        assert_eq!(summary.budget, 0);
        assert_eq!(ledger.expense_percentages(), vec![(0, Some(100))]);

        // Rejection did not consume an id
        ledger.delete_entry(EntryKind::Income, 0);
        assert_eq!(ledger.add_entry(EntryKind::Income, "D", huge).unwrap().id, 1);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut ledger = Ledger::new();
        for name in ["A", "B", "C", "D"] {
            ledger.add_entry(EntryKind::Income, name, 100).unwrap();
        }
        assert!(ledger.delete_entry(EntryKind::Income, 1));

        let names: Vec<&str> = ledger
            .entries(EntryKind::Income)
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(names, ["A", "C", "D"]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "A", 100).unwrap();
        ledger.add_entry(EntryKind::Expense, "B", 50).unwrap();

        assert!(!ledger.delete_entry(EntryKind::Income, 9));
        // Same id, other kind
        assert!(!ledger.delete_entry(EntryKind::Expense, 1));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_recalculate_salary_scenario() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 100000).unwrap();
        ledger.add_entry(EntryKind::Expense, "Rent", 40000).unwrap();
        ledger.add_entry(EntryKind::Expense, "Food", 10000).unwrap();
        ledger.recalculate();

        let summary = ledger.snapshot();
        assert_eq!(summary.total_income, 100000);
        assert_eq!(summary.total_expense, 50000);
        assert_eq!(summary.budget, 50000);
        assert_eq!(summary.overall_expense_percentage, Some(50));
        assert_eq!(
            ledger.expense_percentages(),
            vec![(0, Some(40)), (1, Some(10))]
        );
    }

    #[test]
    fn test_negative_budget_hides_overall_percentage() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "A", 10000).unwrap();
        ledger.add_entry(EntryKind::Expense, "B", 20000).unwrap();
        ledger.recalculate();

        let summary = ledger.snapshot();
        assert_eq!(summary.budget, -10000);
        assert_eq!(summary.overall_expense_percentage, None);
        // Per-entry percentages are still computed
        assert_eq!(ledger.expense_percentages(), vec![(0, Some(200))]);
    }

    #[test]
    fn test_zero_budget_hides_overall_percentage() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "A", 10000).unwrap();
        ledger.add_entry(EntryKind::Expense, "B", 10000).unwrap();
        ledger.recalculate();

        assert_eq!(ledger.snapshot().budget, 0);
        assert_eq!(ledger.snapshot().overall_expense_percentage, None);
    }

    #[test]
    fn test_expense_without_income() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Expense, "X", 5000).unwrap();
        ledger.recalculate();

        let summary = ledger.snapshot();
        assert_eq!(summary.total_income, 0);
        assert_eq!(summary.total_expense, 5000);
        assert_eq!(summary.budget, -5000);
        assert_eq!(summary.overall_expense_percentage, None);
        assert_eq!(ledger.expense_percentages(), vec![(0, None)]);
    }

    #[test]
    fn test_stale_percentage_kept_when_income_drops_to_zero() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 100000).unwrap();
        ledger.add_entry(EntryKind::Expense, "Rent", 25000).unwrap();
        ledger.recalculate();
        assert_eq!(ledger.expense_percentages(), vec![(0, Some(25))]);

        ledger.delete_entry(EntryKind::Income, 0);
        ledger.recalculate();
        assert_eq!(ledger.snapshot().total_income, 0);
        assert_eq!(ledger.expense_percentages(), vec![(0, Some(25))]);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 123456).unwrap();
        ledger.add_entry(EntryKind::Expense, "Rent", 33333).unwrap();
        ledger.recalculate();
        let first = (ledger.snapshot(), ledger.expense_percentages());
        ledger.recalculate();
        let second = (ledger.snapshot(), ledger.expense_percentages());
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_is_stale_until_recalculate() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 1000).unwrap();
        assert_eq!(ledger.snapshot().total_income, 0);
        ledger.recalculate();
        assert_eq!(ledger.snapshot().total_income, 1000);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        assert_eq!(percent_of(1, 8), 13); // 12.5
        assert_eq!(percent_of(1, 3), 33); // 33.33
        assert_eq!(percent_of(2, 3), 67); // 66.67
        assert_eq!(percent_of(145, 1000), 15); // 14.5
        assert_eq!(percent_of(0, 1000), 0);
        assert_eq!(percent_of(1000, 1000), 100);
    }
}
