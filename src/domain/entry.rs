use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Cents;

/// Per-kind entry identifier. Income and expense ids are independent sequences.
pub type EntryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out (rent, groceries, ...)
    Expense,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Income, EntryKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl FromStr for EntryKind {
    type Err = ParseKindError;

    /// Accepts the long names plus the short "inc"/"exp" and "+"/"-" toggles.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "inc" | "+" => Ok(EntryKind::Income),
            "expense" | "exp" | "-" => Ok(EntryKind::Expense),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entry type '{}' (expected income or expense)", self.0)
    }
}

impl std::error::Error for ParseKindError {}

/// Structured reference to an entry: its kind plus its per-kind id.
///
/// The textual form is `<kind>-<id>`, e.g. `expense-7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryRef {
    pub kind: EntryKind,
    pub id: EntryId,
}

impl EntryRef {
    pub fn new(kind: EntryKind, id: EntryId) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

impl FromStr for EntryRef {
    type Err = ParseEntryRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseEntryRefError(s.to_string());

        let (kind, id) = s.trim().split_once('-').ok_or_else(invalid)?;
        // Only the long kind names are valid in references
        let kind = match kind {
            "income" => EntryKind::Income,
            "expense" => EntryKind::Expense,
            _ => return Err(invalid()),
        };
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let id = id.parse().map_err(|_| invalid())?;

        Ok(EntryRef { kind, id })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntryRefError(pub String);

impl fmt::Display for ParseEntryRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid entry reference '{}' (expected income-<id> or expense-<id>)",
            self.0
        )
    }
}

impl std::error::Error for ParseEntryRefError {}

/// One income or expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub description: String,
    pub value_cents: Cents,
    /// Share of total income, only ever set on expenses.
    /// `None` until income is known.
    pub percentage_of_income: Option<u32>,
}

impl Entry {
    pub fn new(id: EntryId, kind: EntryKind, description: String, value_cents: Cents) -> Self {
        Self {
            id,
            kind,
            description,
            value_cents,
            percentage_of_income: None,
        }
    }

    pub fn with_percentage(mut self, percentage: Option<u32>) -> Self {
        self.percentage_of_income = percentage;
        self
    }

    pub fn entry_ref(&self) -> EntryRef {
        EntryRef::new(self.kind, self.id)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }
}
