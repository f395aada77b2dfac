//! Start time parsing for the ticker fragments on a race card.
//!
//! Fragments look like `7 Mar at 8:15pm` and carry no year. The year is picked
//! from the one before, the current and the next year (in the source
//! timezone) as whichever puts the instant closest to `now`, so a list
//! published across New Year is still dated correctly.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const FORMAT: &str = "%Y %d %b at %I:%M%p";

/// Parse one ticker fragment. Returns `None` for anything that does not match
/// the expected shape or names a local time that does not exist.
pub fn parse_timestamp(raw: &str, tz: Tz, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let local_now = now.with_timezone(&tz).naive_local();
    let year = local_now.year();

    let naive = [year - 1, year, year + 1]
        .into_iter()
        .filter_map(|year| NaiveDateTime::parse_from_str(&format!("{year} {raw}"), FORMAT).ok())
        .min_by_key(|naive| (*naive - local_now).num_seconds().abs())?;

    // DST overlap resolves to the earlier instant; a gap yields nothing
    tz.from_local_datetime(&naive).earliest().map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Rome;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_pm_in_winter() {
        let now = utc(2026, 3, 1, 10, 0);
        // CET is UTC+1
        assert_eq!(parse_timestamp("7 Mar at 8:15pm", Rome, now), Some(utc(2026, 3, 7, 19, 15)));
    }

    #[test]
    fn test_parse_am_in_summer() {
        let now = utc(2026, 7, 1, 10, 0);
        // CEST is UTC+2
        assert_eq!(parse_timestamp("12 Jul at 9:05am", Rome, now), Some(utc(2026, 7, 12, 7, 5)));
        assert_eq!(parse_timestamp("12 Jul at 12:00am", Rome, now), Some(utc(2026, 7, 11, 22, 0)));
    }

    #[test]
    fn test_surrounding_whitespace_and_case() {
        let now = utc(2026, 3, 1, 10, 0);
        assert_eq!(parse_timestamp("  7 MAR at 8:15PM \n", Rome, now), Some(utc(2026, 3, 7, 19, 15)));
    }

    #[test]
    fn test_rejects_other_shapes() {
        let now = utc(2026, 3, 1, 10, 0);
        assert_eq!(parse_timestamp("", Rome, now), None);
        assert_eq!(parse_timestamp("Starts soon", Rome, now), None);
        assert_eq!(parse_timestamp("7 Mar 8:15pm", Rome, now), None);
        assert_eq!(parse_timestamp("7 Mar at 20:15", Rome, now), None);
        assert_eq!(parse_timestamp("32 Mar at 8:15pm", Rome, now), None);
    }

    #[test]
    fn test_year_rolls_forward_in_december() {
        let now = utc(2026, 12, 30, 12, 0);
        assert_eq!(parse_timestamp("2 Jan at 9:00pm", Rome, now), Some(utc(2027, 1, 2, 20, 0)));
    }

    #[test]
    fn test_year_rolls_back_in_january() {
        let now = utc(2027, 1, 1, 9, 0);
        assert_eq!(parse_timestamp("31 Dec at 11:30pm", Rome, now), Some(utc(2026, 12, 31, 22, 30)));
    }

    #[test]
    fn test_leap_day_picks_leap_year() {
        let now = utc(2027, 12, 20, 12, 0);
        assert_eq!(parse_timestamp("29 Feb at 6:00pm", Rome, now), Some(utc(2028, 2, 29, 17, 0)));
    }

    #[test]
    fn test_nonexistent_local_time_is_skipped() {
        // clocks jump from 2:00 to 3:00 on 29 Mar 2026 in Rome
        let now = utc(2026, 3, 20, 12, 0);
        assert_eq!(parse_timestamp("29 Mar at 2:30am", Rome, now), None);
    }

    #[test]
    fn test_ambiguous_local_time_takes_earlier() {
        // 2:30 happens twice on 25 Oct 2026 in Rome
        let now = utc(2026, 10, 20, 12, 0);
        assert_eq!(parse_timestamp("25 Oct at 2:30am", Rome, now), Some(utc(2026, 10, 25, 0, 30)));
    }
}
