//! Validated entry of ledger records.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::{self, BsDate};
use crate::core::services::ServiceResult;
use crate::errors::LedgerError;
use crate::ledger::{CalendarSystem, Ledger, Record, RecordKind};

/// A date as entered in the shell, in the calendar the user picked.
#[derive(Debug, Clone, Copy)]
pub enum DateInput {
    Gregorian { year: i32, month: u32, day: u32 },
    BikramSambat { year: i32, month: u32, day: u32 },
}

impl DateInput {
    /// Resolves the entry to the canonical Gregorian date.
    pub fn resolve(self) -> Result<NaiveDate, LedgerError> {
        match self {
            DateInput::Gregorian { year, month, day } => {
                calendar::parse_display_input(year, month, day, CalendarSystem::Gregorian)
            }
            DateInput::BikramSambat { year, month, day } => {
                calendar::parse_display_input(year, month, day, CalendarSystem::BikramSambat)
            }
        }
    }

    pub fn calendar(&self) -> CalendarSystem {
        match self {
            DateInput::Gregorian { .. } => CalendarSystem::Gregorian,
            DateInput::BikramSambat { .. } => CalendarSystem::BikramSambat,
        }
    }

    /// The entry string shown back to the user, in the entry calendar.
    fn display_string(&self, resolved: NaiveDate) -> String {
        match *self {
            DateInput::Gregorian { .. } => calendar::format_gregorian(resolved),
            DateInput::BikramSambat { year, month, day } => {
                calendar::format_bs(BsDate { year, month, day })
            }
        }
    }
}

/// Provides validated append helpers for ledger records.
pub struct RecordService;

impl RecordService {
    /// Validates raw shell input and appends a record, returning its id.
    ///
    /// Either the record is fully appended or the ledger is left untouched;
    /// a rejected amount or date never mutates state.
    pub fn add(
        ledger: &mut Ledger,
        kind: RecordKind,
        amount_text: &str,
        category: &str,
        input: DateInput,
    ) -> ServiceResult<Uuid> {
        let amount = parse_amount(amount_text)?;
        let date = input.resolve()?;
        let display_date = input.display_string(date);
        let record = Record::new(
            kind,
            amount,
            category.trim(),
            date,
            input.calendar(),
            display_date,
        );
        let id = ledger.append(record);
        tracing::debug!(%id, %date, "record appended");
        Ok(id)
    }

    /// Returns a snapshot of the ledger's records in insertion order.
    pub fn list(ledger: &Ledger) -> Vec<&Record> {
        ledger.records().iter().collect()
    }
}

fn parse_amount(text: &str) -> Result<f64, LedgerError> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(trimmed.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::InvalidAmount(trimmed.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;

    fn base_ledger() -> Ledger {
        Ledger::new("Session")
    }

    fn january_first() -> DateInput {
        DateInput::Gregorian {
            year: 2024,
            month: 1,
            day: 1,
        }
    }

    #[test]
    fn add_rejects_unparseable_amount_without_mutating() {
        let mut ledger = base_ledger();
        let err = RecordService::add(&mut ledger, RecordKind::Expense, "abc", "Food", january_first())
            .expect_err("amount text must be numeric");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(ledger.record_count(), 0);
    }

    #[test]
    fn add_rejects_negative_and_non_finite_amounts() {
        let mut ledger = base_ledger();
        for text in ["-5", "-0.01", "NaN", "inf"] {
            let result =
                RecordService::add(&mut ledger, RecordKind::Income, text, "", january_first());
            assert!(result.is_err(), "`{text}` should be rejected");
        }
        assert_eq!(ledger.record_count(), 0);
    }

    #[test]
    fn add_accepts_padded_amount_text() {
        let mut ledger = base_ledger();
        RecordService::add(&mut ledger, RecordKind::Income, " 12.50 ", "Salary", january_first())
            .unwrap();
        assert_eq!(ledger.records()[0].amount, 12.5);
    }

    #[test]
    fn add_rejects_invalid_gregorian_date() {
        let mut ledger = base_ledger();
        let input = DateInput::Gregorian {
            year: 2024,
            month: 2,
            day: 30,
        };
        let err = RecordService::add(&mut ledger, RecordKind::Expense, "10", "Food", input)
            .expect_err("February 30th does not exist");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::InvalidDate(_))
        ));
        assert_eq!(ledger.record_count(), 0);
    }

    #[test]
    fn bikram_sambat_entry_stores_canonical_gregorian_date() {
        let mut ledger = base_ledger();
        let input = DateInput::BikramSambat {
            year: 2081,
            month: 12,
            day: 1,
        };
        RecordService::add(&mut ledger, RecordKind::Expense, "40", "Travel", input).unwrap();

        let record = &ledger.records()[0];
        assert_eq!(
            record.date,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert_eq!(record.calendar, CalendarSystem::BikramSambat);
        assert_eq!(record.display_date, "2081 Chaitra 1");
    }

    #[test]
    fn category_is_trimmed_and_may_be_empty() {
        let mut ledger = base_ledger();
        RecordService::add(&mut ledger, RecordKind::Expense, "3", "  Food ", january_first())
            .unwrap();
        RecordService::add(&mut ledger, RecordKind::Expense, "4", "   ", january_first()).unwrap();
        assert_eq!(ledger.records()[0].category, "Food");
        assert_eq!(ledger.records()[1].category, "");
    }
}
