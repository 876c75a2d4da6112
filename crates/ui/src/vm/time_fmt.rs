use chrono::{DateTime, NaiveDateTime};

/// Task creation time as `YYYY-MM-DD HH:MM` (UTC); empty for legacy tasks
/// stored without a timestamp.
#[must_use]
pub fn format_created_at(millis: i64) -> String {
    if millis <= 0 {
        return String::new();
    }
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Header stamp such as `Mon 19 Oct, 14:05`.
#[must_use]
pub fn format_today_stamp(now: NaiveDateTime) -> String {
    now.format("%a %d %b, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn created_at_formats_utc_minutes() {
        assert_eq!(format_created_at(1_700_000_000_000), "2023-11-14 22:13");
        assert_eq!(format_created_at(0), "");
    }

    #[test]
    fn today_stamp_is_short() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(format_today_stamp(now), "Mon 19 Oct, 14:05");
    }
}
