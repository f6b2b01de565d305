//! Approximate conversion between Gregorian and Bikram Sambat dates.
//!
//! Uses a fixed linear year/month offset, not a true Bikram Sambat calendar:
//! month numbers are cyclically relabeled and the day of month passes through
//! unchanged. Good enough for an entry form, not for an almanac.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::ledger::record::CalendarSystem;

/// Bikram Sambat month names, Baisakh through Chaitra.
const MONTH_NAMES: [&str; 12] = [
    "Baisakh", "Jestha", "Ashar", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// A Bikram Sambat (year, month, day) triple under the linear offset model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BsDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Maps a Gregorian date to its approximate Bikram Sambat triple.
///
/// Total for every valid Gregorian date. The resulting month is always in
/// `1..=12`; the day is carried over verbatim.
pub fn to_bikram_sambat(date: NaiveDate) -> BsDate {
    let year = if date.month() < 4 {
        date.year() + 56
    } else {
        date.year() + 57
    };
    let month = (date.month() + 8 - 1) % 12 + 1;
    BsDate {
        year,
        month,
        day: date.day(),
    }
}

/// Maps a Bikram Sambat triple back to the Gregorian date it was derived
/// from, the exact inverse of [`to_bikram_sambat`].
///
/// The year offset depends on which Gregorian month the triple lands in:
/// January through March sit 56 years behind, the rest 57. The day is carried
/// over verbatim and then checked against the Gregorian month, so a triple
/// whose day overflows the target month is rejected.
pub fn to_gregorian(bs: BsDate) -> Result<NaiveDate, LedgerError> {
    if !(1..=12).contains(&bs.month) {
        return Err(LedgerError::InvalidDate(format!(
            "month {} is out of range 1..=12",
            bs.month
        )));
    }
    let month = ((bs.month as i32 - 8 - 1).rem_euclid(12) + 1) as u32;
    let year = if month < 4 { bs.year - 56 } else { bs.year - 57 };
    NaiveDate::from_ymd_opt(year, month, bs.day).ok_or_else(|| {
        LedgerError::InvalidDate(format!(
            "{} maps to {:04}-{:02}-{:02}, which does not exist",
            format_bs(bs),
            year,
            month,
            bs.day
        ))
    })
}

/// Name of a Bikram Sambat month, or an empty string out of range.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[month as usize - 1],
        _ => "",
    }
}

/// Entry-form rendering of a Bikram Sambat date, e.g. `2081 Baisakh 15`.
pub fn format_bs(bs: BsDate) -> String {
    format!("{} {} {}", bs.year, month_name(bs.month), bs.day)
}

/// Entry-form rendering of a Gregorian date, e.g. `2024-04-15`.
pub fn format_gregorian(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Renders a canonical date in the calendar the shell wants to display.
pub fn convert_to_display(date: NaiveDate, calendar: CalendarSystem) -> String {
    match calendar {
        CalendarSystem::Gregorian => format_gregorian(date),
        CalendarSystem::BikramSambat => format_bs(to_bikram_sambat(date)),
    }
}

/// Resolves a (year, month, day) triple entered in either calendar to the
/// canonical Gregorian date.
pub fn parse_display_input(
    year: i32,
    month: u32,
    day: u32,
    calendar: CalendarSystem,
) -> Result<NaiveDate, LedgerError> {
    match calendar {
        CalendarSystem::Gregorian => NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            LedgerError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02} is not a valid date"
            ))
        }),
        CalendarSystem::BikramSambat => to_gregorian(BsDate { year, month, day }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn forward_year_offset_switches_in_april() {
        assert_eq!(to_bikram_sambat(date(2024, 3, 31)).year, 2024 + 56);
        assert_eq!(to_bikram_sambat(date(2024, 4, 1)).year, 2024 + 57);
        assert_eq!(to_bikram_sambat(date(1999, 1, 1)).year, 1999 + 56);
        assert_eq!(to_bikram_sambat(date(1999, 12, 31)).year, 1999 + 57);
    }

    #[test]
    fn forward_month_stays_in_range() {
        for month in 1..=12 {
            let bs = to_bikram_sambat(date(2023, month, 1));
            assert!((1..=12).contains(&bs.month), "month {month} -> {}", bs.month);
        }
    }

    #[test]
    fn forward_month_relabeling() {
        assert_eq!(to_bikram_sambat(date(2024, 1, 15)).month, 9);
        assert_eq!(to_bikram_sambat(date(2024, 4, 15)).month, 12);
        assert_eq!(to_bikram_sambat(date(2024, 5, 15)).month, 1);
        assert_eq!(to_bikram_sambat(date(2024, 12, 15)).month, 8);
    }

    #[test]
    fn round_trip_over_a_century() {
        for year in (1950..=2050).step_by(7) {
            let mut day = date(year, 1, 1);
            let end = date(year, 12, 31);
            while day <= end {
                let back = to_gregorian(to_bikram_sambat(day)).unwrap();
                assert_eq!(back, day);
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn round_trip_covers_leap_day() {
        let leap = date(2024, 2, 29);
        assert_eq!(to_gregorian(to_bikram_sambat(leap)).unwrap(), leap);
    }

    #[test]
    fn reverse_rejects_day_overflowing_target_month() {
        // Chaitra maps onto April, which has 30 days.
        let err = to_gregorian(BsDate {
            year: 2081,
            month: 12,
            day: 31,
        })
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate(_)));
    }

    #[test]
    fn reverse_rejects_month_out_of_range() {
        let err = to_gregorian(BsDate {
            year: 2081,
            month: 13,
            day: 1,
        })
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate(_)));
    }

    #[test]
    fn month_names_match_entry_form() {
        assert_eq!(month_name(1), "Baisakh");
        assert_eq!(month_name(9), "Poush");
        assert_eq!(month_name(12), "Chaitra");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn display_formats() {
        let d = date(2024, 4, 1);
        assert_eq!(format_gregorian(d), "2024-04-01");
        assert_eq!(
            convert_to_display(d, CalendarSystem::BikramSambat),
            "2081 Chaitra 1"
        );
    }

    #[test]
    fn parse_display_input_resolves_both_calendars() {
        let gregorian =
            parse_display_input(2024, 4, 1, CalendarSystem::Gregorian).unwrap();
        assert_eq!(gregorian, date(2024, 4, 1));

        let from_bs =
            parse_display_input(2081, 12, 1, CalendarSystem::BikramSambat).unwrap();
        assert_eq!(from_bs, date(2024, 4, 1));
    }
}
