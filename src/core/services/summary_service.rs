//! Period totals and category aggregation.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::{Ledger, Period, Record, RecordKind};

/// Income and expense totals over a set of records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Folds records into income/expense totals. Empty input is all zeros.
    pub fn summarize<'a, I>(records: I) -> Summary
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut summary = Summary::default();
        for record in records {
            match record.kind {
                RecordKind::Income => summary.total_income += record.amount,
                RecordKind::Expense => summary.total_expense += record.amount,
            }
        }
        summary.balance = summary.total_income - summary.total_expense;
        summary
    }

    /// Totals over the period containing `reference`.
    pub fn period_summary(ledger: &Ledger, period: Period, reference: NaiveDate) -> Summary {
        let summary = Self::summarize(ledger.filter_by_period(period, reference));
        tracing::debug!(period = period.label(), %reference, "summary computed");
        summary
    }

    /// Sums amounts of `kind` per category. Buckets are case-sensitive exact
    /// matches; the empty category is a valid bucket. Unordered.
    pub fn category_breakdown<'a, I>(records: I, kind: RecordKind) -> HashMap<String, f64>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut buckets = HashMap::new();
        for record in records {
            if record.kind == kind {
                *buckets.entry(record.category.clone()).or_insert(0.0) += record.amount;
            }
        }
        buckets
    }

    /// Category breakdown scoped to the period containing `reference`.
    pub fn period_breakdown(
        ledger: &Ledger,
        period: Period,
        reference: NaiveDate,
        kind: RecordKind,
    ) -> HashMap<String, f64> {
        Self::category_breakdown(ledger.filter_by_period(period, reference), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CalendarSystem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(kind: RecordKind, amount: f64, category: &str, day: NaiveDate) -> Record {
        Record::new(
            kind,
            amount,
            category,
            day,
            CalendarSystem::Gregorian,
            day.format("%Y-%m-%d").to_string(),
        )
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new("Summary");
        ledger.append(record(RecordKind::Income, 100.0, "Salary", date(2024, 1, 1)));
        ledger.append(record(RecordKind::Expense, 30.0, "Food", date(2024, 1, 2)));
        ledger.append(record(RecordKind::Expense, 20.0, "Food", date(2024, 1, 3)));
        ledger
    }

    #[test]
    fn month_summary_totals_and_balance() {
        let ledger = sample_ledger();
        let summary = SummaryService::period_summary(&ledger, Period::Month, date(2024, 1, 15));
        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.total_expense, 50.0);
        assert_eq!(summary.balance, 50.0);
    }

    #[test]
    fn empty_ledger_summarizes_to_zero_for_every_period() {
        let ledger = Ledger::new("Empty");
        for period in [Period::Week, Period::Month, Period::Year] {
            let summary = SummaryService::period_summary(&ledger, period, date(2024, 6, 1));
            assert_eq!(summary, Summary::default());
        }
    }

    #[test]
    fn expense_breakdown_groups_by_exact_category() {
        let ledger = sample_ledger();
        let breakdown =
            SummaryService::period_breakdown(&ledger, Period::Month, date(2024, 1, 15), RecordKind::Expense);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown["Food"], 50.0);
    }

    #[test]
    fn breakdown_is_case_sensitive_and_keeps_empty_bucket() {
        let mut ledger = Ledger::new("Buckets");
        ledger.append(record(RecordKind::Expense, 1.0, "food", date(2024, 1, 1)));
        ledger.append(record(RecordKind::Expense, 2.0, "Food", date(2024, 1, 1)));
        ledger.append(record(RecordKind::Expense, 3.0, "", date(2024, 1, 1)));

        let breakdown = SummaryService::category_breakdown(ledger.records(), RecordKind::Expense);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown["food"], 1.0);
        assert_eq!(breakdown["Food"], 2.0);
        assert_eq!(breakdown[""], 3.0);
    }

    #[test]
    fn breakdown_ignores_other_kind() {
        let ledger = sample_ledger();
        let incomes = SummaryService::category_breakdown(ledger.records(), RecordKind::Income);
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes["Salary"], 100.0);
        assert!(!incomes.contains_key("Food"));
    }
}
