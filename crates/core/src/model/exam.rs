use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("exam date must be an ISO calendar date (YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

/// Unvalidated exam input as typed by the user or received over the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExamDraft {
    pub label: String,
    pub date: String,
}

impl ExamDraft {
    #[must_use]
    pub fn new(label: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            date: date.into(),
        }
    }

    /// Trim the label and parse the date (an empty date means "not set").
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidDate` if the date is present but not `YYYY-MM-DD`.
    pub fn validate(self) -> Result<ExamInfo, ExamError> {
        Ok(ExamInfo {
            label: self.label.trim().to_owned(),
            date: parse_exam_date(&self.date)?,
        })
    }
}

/// The single upcoming exam. Replaced wholesale on every save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExamInfo {
    label: String,
    date: Option<NaiveDate>,
}

impl ExamInfo {
    #[must_use]
    pub fn new(label: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            label: label.into().trim().to_owned(),
            date,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The date as stored on the wire: `YYYY-MM-DD`, or empty when unset.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Label shown next to the countdown; falls back to "Next exam".
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "Next exam"
        } else {
            &self.label
        }
    }

    /// Days remaining until local midnight of the exam date, rounded up.
    #[must_use]
    pub fn countdown(&self, now: NaiveDateTime) -> ExamCountdown {
        let Some(date) = self.date else {
            return ExamCountdown::Unknown;
        };
        let target = date.and_time(NaiveTime::MIN);
        let millis = (target - now).num_milliseconds();
        let days = ceil_div(millis, MILLIS_PER_DAY);
        if days >= 0 {
            ExamCountdown::Days(days)
        } else {
            ExamCountdown::Passed
        }
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Parse a `YYYY-MM-DD` date; blank input means no date.
///
/// # Errors
///
/// Returns `ExamError::InvalidDate` for anything else.
pub fn parse_exam_date(raw: &str) -> Result<Option<NaiveDate>, ExamError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ExamError::InvalidDate(trimmed.to_owned()))
}

/// Derived exam countdown KPI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamCountdown {
    /// No exam date set.
    Unknown,
    /// Whole days left (0 on the day itself).
    Days(i64),
    Passed,
}

impl fmt::Display for ExamCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamCountdown::Unknown => f.write_str("—"),
            ExamCountdown::Days(days) => write!(f, "{days}d"),
            ExamCountdown::Passed => f.write_str("Passed"),
        }
    }
}

// ─── Serde ─────────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct ExamWire {
    #[serde(default)]
    label: String,
    #[serde(default)]
    date: String,
}

impl Serialize for ExamInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExamWire {
            label: self.label.clone(),
            date: self.date_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExamInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ExamWire::deserialize(deserializer)?;
        ExamDraft::new(wire.label, wire.date)
            .validate()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn countdown_rounds_up_partial_days() {
        let now = at("2026-10-19", "10:30:00");
        let exam = ExamInfo::new("Maths", NaiveDate::from_ymd_opt(2026, 10, 24));
        assert_eq!(exam.countdown(now), ExamCountdown::Days(5));
        assert_eq!(exam.countdown(now).to_string(), "5d");
    }

    #[test]
    fn countdown_at_midnight_is_exact() {
        let now = at("2026-10-19", "00:00:00");
        let date = now.date() + Duration::days(5);
        let exam = ExamInfo::new("", Some(date));
        assert_eq!(exam.countdown(now), ExamCountdown::Days(5));
    }

    #[test]
    fn countdown_on_exam_day_is_zero() {
        let now = at("2026-10-19", "15:00:00");
        let exam = ExamInfo::new("", Some(now.date()));
        assert_eq!(exam.countdown(now).to_string(), "0d");
    }

    #[test]
    fn countdown_for_yesterday_is_passed() {
        let now = at("2026-10-19", "08:00:00");
        let exam = ExamInfo::new("", Some(now.date() - Duration::days(1)));
        assert_eq!(exam.countdown(now), ExamCountdown::Passed);
        assert_eq!(exam.countdown(now).to_string(), "Passed");
    }

    #[test]
    fn countdown_without_date_is_unknown() {
        let exam = ExamInfo::default();
        let now = at("2026-10-19", "08:00:00");
        assert_eq!(exam.countdown(now), ExamCountdown::Unknown);
        assert_eq!(exam.countdown(now).to_string(), "—");
    }

    #[test]
    fn draft_trims_label_and_accepts_blank_date() {
        let exam = ExamDraft::new("  Physics  ", "").validate().unwrap();
        assert_eq!(exam.label(), "Physics");
        assert_eq!(exam.date(), None);
    }

    #[test]
    fn draft_rejects_non_iso_date() {
        let err = ExamDraft::new("x", "24/10/2026").validate().unwrap_err();
        assert!(matches!(err, ExamError::InvalidDate(_)));
    }

    #[test]
    fn serializes_to_label_and_date_strings() {
        let exam = ExamInfo::new("Bio", NaiveDate::from_ymd_opt(2026, 6, 1));
        let value = serde_json::to_value(&exam).unwrap();
        assert_eq!(value, serde_json::json!({"label": "Bio", "date": "2026-06-01"}));

        let empty = serde_json::to_value(ExamInfo::default()).unwrap();
        assert_eq!(empty, serde_json::json!({"label": "", "date": ""}));
    }

    #[test]
    fn display_label_falls_back() {
        assert_eq!(ExamInfo::default().display_label(), "Next exam");
        assert_eq!(ExamInfo::new("Chem", None).display_label(), "Chem");
    }
}
