use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u32),
}

/// Read-only progress entry for one subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSubject")]
pub struct SubjectProgress {
    name: String,
    progress: u8,
}

impl SubjectProgress {
    /// # Errors
    ///
    /// Returns `SubjectError::ProgressOutOfRange` if `progress > 100`.
    pub fn new(name: impl Into<String>, progress: u32) -> Result<Self, SubjectError> {
        let progress = u8::try_from(progress)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or(SubjectError::ProgressOutOfRange(progress))?;
        Ok(Self {
            name: name.into(),
            progress,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }
}

#[derive(Deserialize)]
struct RawSubject {
    name: String,
    progress: u32,
}

impl TryFrom<RawSubject> for SubjectProgress {
    type Error = SubjectError;

    fn try_from(raw: RawSubject) -> Result<Self, Self::Error> {
        SubjectProgress::new(raw.name, raw.progress)
    }
}

/// Seed subjects shown until real progress tracking exists.
#[must_use]
pub fn default_subjects() -> Vec<SubjectProgress> {
    [("Maths", 55), ("Science", 42), ("English", 68)]
        .into_iter()
        .map(|(name, progress)| SubjectProgress {
            name: name.to_owned(),
            progress,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_progress_above_hundred() {
        assert_eq!(
            SubjectProgress::new("Art", 101).unwrap_err(),
            SubjectError::ProgressOutOfRange(101)
        );
        assert!(serde_json::from_str::<SubjectProgress>(r#"{"name":"Art","progress":250}"#).is_err());
    }

    #[test]
    fn default_subjects_match_seed() {
        let subjects = default_subjects();
        let pairs: Vec<_> = subjects.iter().map(|s| (s.name(), s.progress())).collect();
        assert_eq!(pairs, [("Maths", 55), ("Science", 42), ("English", 68)]);
    }
}
