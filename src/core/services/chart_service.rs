//! Chart-ready data. The core computes the points; the shell renders them.

use serde::{Deserialize, Serialize};

use super::summary_service::{Summary, SummaryService};
use crate::ledger::{Period, Record, RecordKind};

/// One wedge of a per-category pie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the kind's total, in percent.
    pub share: f64,
}

/// Income vs expense pair for one reporting period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BarChartData {
    pub period: Period,
    pub income: f64,
    pub expense: f64,
}

pub struct ChartService;

impl ChartService {
    /// Per-category slices for `kind`, largest first, ties broken by label.
    /// Empty when no record of the kind is present.
    pub fn pie_data<'a, I>(records: I, kind: RecordKind) -> Vec<PieSlice>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let buckets = SummaryService::category_breakdown(records, kind);
        let total: f64 = buckets.values().sum();
        let mut slices: Vec<PieSlice> = buckets
            .into_iter()
            .map(|(label, value)| PieSlice {
                label,
                value,
                share: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            })
            .collect();
        slices.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.label.cmp(&b.label))
        });
        slices
    }

    pub fn bar_data(summary: Summary, period: Period) -> BarChartData {
        BarChartData {
            period,
            income: summary.total_income,
            expense: summary.total_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CalendarSystem, Ledger};
    use chrono::NaiveDate;

    fn record(kind: RecordKind, amount: f64, category: &str) -> Record {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Record::new(
            kind,
            amount,
            category,
            day,
            CalendarSystem::Gregorian,
            "2024-01-02",
        )
    }

    #[test]
    fn slices_carry_percentage_shares_largest_first() {
        let mut ledger = Ledger::new("Chart");
        ledger.append(record(RecordKind::Expense, 30.0, "Food"));
        ledger.append(record(RecordKind::Expense, 60.0, "Rent"));
        ledger.append(record(RecordKind::Expense, 10.0, "Misc"));
        ledger.append(record(RecordKind::Income, 500.0, "Salary"));

        let slices = ChartService::pie_data(ledger.records(), RecordKind::Expense);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, "Rent");
        assert_eq!(slices[0].share, 60.0);
        assert_eq!(slices[1].label, "Food");
        assert_eq!(slices[2].label, "Misc");
        let total_share: f64 = slices.iter().map(|slice| slice.share).sum();
        assert!((total_share - 100.0).abs() < 1e-9);
    }

    #[test]
    fn no_matching_records_yields_no_slices() {
        let mut ledger = Ledger::new("Chart");
        ledger.append(record(RecordKind::Income, 500.0, "Salary"));
        assert!(ChartService::pie_data(ledger.records(), RecordKind::Expense).is_empty());
    }

    #[test]
    fn zero_total_keeps_buckets_with_zero_share() {
        let mut ledger = Ledger::new("Chart");
        ledger.append(record(RecordKind::Expense, 0.0, "Food"));
        let slices = ChartService::pie_data(ledger.records(), RecordKind::Expense);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].share, 0.0);
    }

    #[test]
    fn bar_data_mirrors_summary_totals() {
        let summary = Summary {
            total_income: 100.0,
            total_expense: 50.0,
            balance: 50.0,
        };
        let bars = ChartService::bar_data(summary, Period::Week);
        assert_eq!(bars.income, 100.0);
        assert_eq!(bars.expense, 50.0);
        assert_eq!(bars.period, Period::Week);
    }
}
