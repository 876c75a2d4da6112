//! Derived dashboard metrics.
//!
//! Everything here is a pure function of task/notes/exam state plus "now".
//! The time and streak heuristics are placeholders; callers should only rely
//! on the shape of [`Kpis`].

use chrono::NaiveDateTime;

use crate::model::{ExamCountdown, ExamInfo, Task};

/// Minutes credited per completed task.
pub const MINUTES_PER_DONE_TASK: u32 = 25;
/// Upper bound for the "time today" estimate.
pub const MAX_MINUTES_TODAY: u32 = 240;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kpis {
    pub total: usize,
    pub done: usize,
    pub minutes_today: u32,
    pub streak: u32,
    pub exam: ExamCountdown,
}

impl Kpis {
    /// "Time today" rendered as `Hh MMm`.
    #[must_use]
    pub fn time_today_label(&self) -> String {
        format_minutes(self.minutes_today)
    }
}

#[must_use]
pub fn compute_kpis(tasks: &[Task], notes: &str, exam: &ExamInfo, now: NaiveDateTime) -> Kpis {
    let done = tasks.iter().filter(|t| t.is_done()).count();
    let done_u32 = u32::try_from(done).unwrap_or(u32::MAX);
    let minutes_today = done_u32
        .saturating_mul(MINUTES_PER_DONE_TASK)
        .min(MAX_MINUTES_TODAY);
    let streak = u32::from(!notes.trim().is_empty());

    Kpis {
        total: tasks.len(),
        done,
        minutes_today,
        streak,
        exam: exam.countdown(now),
    }
}

#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn tasks(done: usize, open: usize) -> Vec<Task> {
        (0..done + open)
            .map(|i| {
                let mut t = Task::new(TaskId::new(format!("t{i}")), "task", i as i64).unwrap();
                t.set_done(i < done);
                t
            })
            .collect()
    }

    #[test]
    fn counts_and_time_estimate() {
        let kpis = compute_kpis(&tasks(3, 2), "", &ExamInfo::default(), now());
        assert_eq!(kpis.total, 5);
        assert_eq!(kpis.done, 3);
        assert_eq!(kpis.minutes_today, 75);
        assert_eq!(kpis.time_today_label(), "1h 15m");
        assert_eq!(kpis.streak, 0);
        assert_eq!(kpis.exam, ExamCountdown::Unknown);
    }

    #[test]
    fn time_estimate_is_capped() {
        let kpis = compute_kpis(&tasks(20, 0), "", &ExamInfo::default(), now());
        assert_eq!(kpis.minutes_today, MAX_MINUTES_TODAY);
        assert_eq!(kpis.time_today_label(), "4h 00m");
    }

    #[test]
    fn streak_follows_non_blank_notes() {
        let exam = ExamInfo::default();
        assert_eq!(compute_kpis(&[], "  \n", &exam, now()).streak, 0);
        assert_eq!(compute_kpis(&[], "went over ch. 2", &exam, now()).streak, 1);
    }

    #[test]
    fn is_pure_for_unchanged_state() {
        let tasks = tasks(1, 1);
        let exam = ExamInfo::new("Maths", NaiveDate::from_ymd_opt(2026, 10, 24));
        let first = compute_kpis(&tasks, "notes", &exam, now());
        let second = compute_kpis(&tasks, "notes", &exam, now());
        assert_eq!(first, second);
        assert_eq!(first.exam, ExamCountdown::Days(5));
    }

    #[test]
    fn empty_state_formats_zero_time() {
        assert_eq!(format_minutes(0), "0h 00m");
    }
}
