use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reporting window scoped relative to a reference date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// True when `date` falls in the same period as `reference`.
    ///
    /// Weeks compare both the ISO week number and the ISO week-numbering
    /// year, so days at the turn of the year group with the week they belong
    /// to rather than their calendar year.
    pub fn matches(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Period::Week => {
                let (a, b) = (date.iso_week(), reference.iso_week());
                a.week() == b.week() && a.year() == b.year()
            }
            Period::Month => {
                date.year() == reference.year() && date.month() == reference.month()
            }
            Period::Year => date.year() == reference.year(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Year => "Year",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_uses_iso_week_numbering_year() {
        // 2024-12-30 belongs to ISO week 1 of 2025.
        assert!(Period::Week.matches(date(2024, 12, 30), date(2025, 1, 2)));
        assert!(!Period::Week.matches(date(2024, 12, 30), date(2024, 12, 25)));
    }

    #[test]
    fn month_requires_same_year() {
        assert!(Period::Month.matches(date(2024, 1, 3), date(2024, 1, 15)));
        assert!(!Period::Month.matches(date(2023, 1, 3), date(2024, 1, 15)));
        assert!(!Period::Month.matches(date(2024, 2, 3), date(2024, 1, 15)));
    }

    #[test]
    fn year_boundary_excludes_prior_december() {
        assert!(!Period::Year.matches(date(2023, 12, 31), date(2024, 6, 1)));
        assert!(Period::Year.matches(date(2023, 12, 31), date(2023, 6, 1)));
    }
}
