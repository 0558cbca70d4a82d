use std::io::{self, Write};

use crate::application::BudgetView;
use crate::domain::{
    Entry, EntryKind, format_amount, format_budget, format_cents, format_percentage,
};

const DESCRIPTION_WIDTH: usize = 24;

/// Summary panel followed by both entry lists.
pub fn write_view<W: Write>(out: &mut W, view: &BudgetView) -> io::Result<()> {
    write_summary(out, view)?;
    writeln!(out)?;
    write_entries(out, view)
}

/// Header, available budget, and the income/expense totals.
pub fn write_summary<W: Write>(out: &mut W, view: &BudgetView) -> io::Result<()> {
    let summary = &view.summary;

    writeln!(out, "Available budget in {}:", view.period)?;
    writeln!(out, "{}", format_budget(summary.budget))?;
    writeln!(
        out,
        "{:<10} {:>16}",
        "Income",
        format_amount(summary.total_income, EntryKind::Income)
    )?;
    writeln!(
        out,
        "{:<10} {:>16} {:>5}",
        "Expenses",
        format_amount(summary.total_expense, EntryKind::Expense),
        format_percentage(summary.overall_expense_percentage)
    )
}

/// Income and expense lists in display order.
pub fn write_entries<W: Write>(out: &mut W, view: &BudgetView) -> io::Result<()> {
    writeln!(out, "INCOME")?;
    if view.income.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for entry in &view.income {
        writeln!(out, "  {}", entry_row(entry))?;
    }

    writeln!(out, "EXPENSES")?;
    if view.expenses.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for entry in &view.expenses {
        writeln!(
            out,
            "  {} {:>5}",
            entry_row(entry),
            format_percentage(entry.percentage_of_income)
        )?;
    }
    Ok(())
}

/// One-line confirmation for a newly added entry.
pub fn added_message(entry: &Entry) -> String {
    format!(
        "Added {}: {} {}",
        entry.entry_ref(),
        entry.description,
        format_cents(entry.value_cents)
    )
}

fn entry_row(entry: &Entry) -> String {
    format!(
        "{:<12} {:<width$} {:>16}",
        entry.entry_ref().to_string(),
        truncate(&entry.description, DESCRIPTION_WIDTH),
        format_amount(entry.value_cents, entry.kind),
        width = DESCRIPTION_WIDTH
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
