// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use budgety::application::{BudgetService, EntryInput};
use budgety::cli::{OutputFormat, Session};
use budgety::domain::{Entry, EntryKind};
use chrono::NaiveDate;

/// Helper to create an empty service for October 2026
pub fn test_service() -> BudgetService {
    BudgetService::for_period(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
}

/// Helper to build a session that captures its output in memory
pub fn test_session(format: OutputFormat, quiet: bool) -> Session<Vec<u8>, Vec<u8>> {
    Session::new(test_service(), format, quiet, Vec::new(), Vec::new())
}

/// Run a script through a fresh session and return (stdout, stderr)
pub fn run_script(script: &str, format: OutputFormat, quiet: bool) -> Result<(String, String)> {
    let mut session = test_session(format, quiet);
    session.run(script.as_bytes())?;
    let (out, err) = session.into_writers();
    Ok((String::from_utf8(out)?, String::from_utf8(err)?))
}

/// Test fixture: the monthly budget used across tests
pub struct StandardBudget;

impl StandardBudget {
    /// Salary 1000, Rent 400, Food 100
    pub fn create(service: &mut BudgetService) -> Result<Vec<Entry>> {
        Ok(vec![
            service.add(EntryKind::Income, "Salary", 100000)?,
            service.add(EntryKind::Expense, "Rent", 40000)?,
            service.add(EntryKind::Expense, "Food", 10000)?,
        ])
    }

    /// Same budget, entered through the raw form path
    pub fn submit(service: &mut BudgetService) -> Result<Vec<Entry>> {
        Ok(vec![
            service.submit(EntryInput::new("income", "Salary", "1000"))?,
            service.submit(EntryInput::new("expense", "Rent", "400.00"))?,
            service.submit(EntryInput::new("expense", "Food", "100"))?,
        ])
    }
}
