//! Date and time display utilities.

use std::fmt;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// A `Timestamp` shown in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A date written the Korean way, e.g. `2025년 06월 01일`.
pub struct KoreanDate(pub Date);

impl fmt::Display for KoreanDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y년 %m월 %d일"))
    }
}

/// Calendar header for the month containing the date, e.g. `2025년 06월`.
pub struct MonthTitle(pub Date);

impl fmt::Display for MonthTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y년 %m월"))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_korean_formats() {
        assert_eq!(KoreanDate(date(2025, 6, 1)).to_string(), "2025년 06월 01일");
        assert_eq!(MonthTitle(date(2025, 12, 31)).to_string(), "2025년 12월");
    }

    #[test]
    fn test_local_date_time_shape() {
        let ts: Timestamp = "2025-06-01T12:00:00Z".parse().unwrap();
        let text = LocalDateTime(&ts).to_string();
        // Date part depends on the host zone; the layout does not.
        assert_eq!(text.split(' ').count(), 3);
        assert_eq!(text.split(' ').nth(1).map(str::len), Some(8));
    }
}
