use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single income or expense event. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub kind: RecordKind,
    pub amount: f64,
    pub category: String,
    /// Canonical Gregorian date; the Bikram Sambat view is derived from it.
    pub date: NaiveDate,
    pub calendar: CalendarSystem,
    /// The date string as originally shown to the user at entry time.
    pub display_date: String,
}

impl Record {
    pub fn new(
        kind: RecordKind,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        calendar: CalendarSystem,
        display_date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category: category.into(),
            date,
            calendar,
            display_date: display_date.into(),
        }
    }
}

/// Direction of a ledger record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }
}

/// Calendar the user entered a record in, kept for display only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CalendarSystem {
    #[default]
    Gregorian,
    BikramSambat,
}

impl CalendarSystem {
    pub fn label(&self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "Gregorian",
            CalendarSystem::BikramSambat => "Bikram Sambat",
        }
    }
}
