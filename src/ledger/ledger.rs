use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{period::Period, record::Record};

/// Append-only, insertion-ordered store of ledger records.
///
/// Owned by a single session; records live until the process exits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    #[serde(default)]
    pub records: Vec<Record>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            records: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a record at the end of the sequence and returns its id.
    pub fn append(&mut self, record: Record) -> Uuid {
        let id = record.id;
        self.records.push(record);
        self.touch();
        id
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records whose date falls in the period containing `reference`,
    /// insertion order preserved. An empty result is not an error.
    pub fn filter_by_period(&self, period: Period, reference: NaiveDate) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| period.matches(record.date, reference))
            .collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::record::{CalendarSystem, RecordKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(kind: RecordKind, amount: f64, day: NaiveDate) -> Record {
        Record::new(
            kind,
            amount,
            "Misc",
            day,
            CalendarSystem::Gregorian,
            day.format("%Y-%m-%d").to_string(),
        )
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut ledger = Ledger::new("Session");
        let first = ledger.append(record(RecordKind::Income, 10.0, date(2024, 1, 1)));
        let second = ledger.append(record(RecordKind::Expense, 5.0, date(2024, 1, 2)));
        assert_eq!(ledger.record_count(), 2);
        assert_eq!(ledger.records()[0].id, first);
        assert_eq!(ledger.records()[1].id, second);
    }

    #[test]
    fn filter_scopes_to_period_of_reference() {
        let mut ledger = Ledger::new("Session");
        ledger.append(record(RecordKind::Expense, 1.0, date(2024, 1, 2)));
        ledger.append(record(RecordKind::Expense, 2.0, date(2024, 2, 2)));
        ledger.append(record(RecordKind::Expense, 3.0, date(2023, 12, 31)));

        let january = ledger.filter_by_period(Period::Month, date(2024, 1, 15));
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].amount, 1.0);

        let year = ledger.filter_by_period(Period::Year, date(2024, 6, 1));
        assert_eq!(year.len(), 2);

        assert!(ledger
            .filter_by_period(Period::Week, date(2030, 5, 1))
            .is_empty());
    }
}
