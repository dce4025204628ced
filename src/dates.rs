/// calendar-month arithmetic shared by every calculator
use chrono::{Datelike, Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;

use crate::errors::{FinanceError, Result};

/// add calendar months, clamping to the last day of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| FinanceError::InvalidDate {
            message: format!("{date} + {months} months is out of range"),
        })
}

/// calendar month difference ignoring the day of month; negative when `to` is earlier
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

/// whole calendar months completed between `start` and `today` (truncating)
pub fn whole_months_elapsed(start: NaiveDate, today: NaiveDate) -> u32 {
    if today <= start {
        return 0;
    }

    let mut months = months_between(start, today);
    // the anniversary inside the final month may still be ahead
    match u32::try_from(months).ok().and_then(|m| start.checked_add_months(Months::new(m))) {
        Some(anniversary) if anniversary > today => months -= 1,
        Some(_) => {}
        None => months -= 1,
    }

    u32::try_from(months.max(0)).unwrap_or(0)
}

/// current calendar date according to the injected clock
pub fn today(time_provider: &SafeTimeProvider) -> NaiveDate {
    time_provider.now().date_naive()
}

/// parse a collaborator `start_date` column (`YYYY-MM-DD`, optionally followed by a time)
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| FinanceError::InvalidDate {
        message: format!("{value:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(add_months(date(2025, 1, 31), 1).unwrap(), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 1, 31), 3).unwrap(), date(2025, 4, 30));
        assert_eq!(add_months(date(2025, 11, 15), 2).unwrap(), date(2026, 1, 15));
        assert_eq!(add_months(date(2025, 1, 1), 0).unwrap(), date(2025, 1, 1));
    }

    #[test]
    fn test_add_months_out_of_range() {
        assert!(add_months(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn test_months_between_ignores_day() {
        assert_eq!(months_between(date(2025, 1, 31), date(2025, 2, 1)), 1);
        assert_eq!(months_between(date(2025, 3, 1), date(2030, 3, 1)), 60);
        assert_eq!(months_between(date(2026, 5, 1), date(2025, 5, 1)), -12);
    }

    #[test]
    fn test_whole_months_elapsed_truncates() {
        let start = date(2025, 1, 15);
        assert_eq!(whole_months_elapsed(start, date(2025, 2, 14)), 0);
        assert_eq!(whole_months_elapsed(start, date(2025, 2, 15)), 1);
        assert_eq!(whole_months_elapsed(start, date(2026, 1, 14)), 11);
        assert_eq!(whole_months_elapsed(start, date(2026, 1, 15)), 12);
        assert_eq!(whole_months_elapsed(start, date(2024, 12, 1)), 0);
    }

    #[test]
    fn test_whole_months_elapsed_month_end_start() {
        // clamped anniversary on Feb 28 counts as a completed month
        assert_eq!(whole_months_elapsed(date(2025, 1, 31), date(2025, 2, 28)), 1);
        assert_eq!(whole_months_elapsed(date(2025, 1, 31), date(2025, 2, 27)), 0);
    }

    #[test]
    fn test_today_reads_injected_clock() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
        ));
        assert_eq!(today(&time), date(2026, 10, 16));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2025-01-01").unwrap(), date(2025, 1, 1));
        assert_eq!(parse_iso_date("2025-01-01T00:00:00.000Z").unwrap(), date(2025, 1, 1));
        assert!(parse_iso_date("01/02/2025").is_err());
        assert!(parse_iso_date("").is_err());
    }
}
