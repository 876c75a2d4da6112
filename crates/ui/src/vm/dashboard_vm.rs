use chrono::NaiveDateTime;

use desk_core::kpi::Kpis;
use desk_core::model::{ExamInfo, SubjectProgress, Task, TaskId, UspCard};
use services::StudyDesk;

use crate::vm::time_fmt::{format_created_at, format_today_stamp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KpiVm {
    pub time_today: String,
    pub streak: String,
    pub done: String,
    pub total: String,
    pub next_exam: String,
}

impl From<&Kpis> for KpiVm {
    fn from(kpis: &Kpis) -> Self {
        Self {
            time_today: kpis.time_today_label(),
            streak: kpis.streak.to_string(),
            done: kpis.done.to_string(),
            total: kpis.total.to_string(),
            next_exam: kpis.exam.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRowVm {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub created_at_str: String,
}

impl From<&Task> for TaskRowVm {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            title: task.title().to_owned(),
            done: task.is_done(),
            created_at_str: format_created_at(task.created_at()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectBarVm {
    pub name: String,
    pub progress: u8,
    pub bar_style: String,
}

impl From<&SubjectProgress> for SubjectBarVm {
    fn from(subject: &SubjectProgress) -> Self {
        Self {
            name: subject.name().to_owned(),
            progress: subject.progress(),
            bar_style: format!("width: {}%", subject.progress()),
        }
    }
}

/// Everything the dashboard renders, derived from one desk snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub today_stamp: String,
    pub kpis: KpiVm,
    pub tasks: Vec<TaskRowVm>,
    pub exam_hint: String,
    pub subjects: Vec<SubjectBarVm>,
    pub usp_cards: Vec<UspCard>,
    pub focus: bool,
}

impl DashboardVm {
    #[must_use]
    pub fn build(desk: &StudyDesk, now: NaiveDateTime) -> Self {
        Self {
            today_stamp: format_today_stamp(now),
            kpis: KpiVm::from(&desk.kpis_at(now)),
            tasks: desk.tasks().iter().map(TaskRowVm::from).collect(),
            exam_hint: exam_hint(desk.exam()),
            subjects: desk.subjects().iter().map(SubjectBarVm::from).collect(),
            usp_cards: desk.usp_cards().to_vec(),
            focus: desk.focus(),
        }
    }

    #[must_use]
    pub fn focus_button_label(&self) -> &'static str {
        if self.focus { "Exit Focus" } else { "Focus Mode" }
    }
}

/// `"<label> • <date>"`, or empty while no date is set.
#[must_use]
pub fn exam_hint(exam: &ExamInfo) -> String {
    if exam.date().is_none() {
        return String::new();
    }
    format!("{} • {}", exam.display_label(), exam.date_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use desk_core::time::fixed_clock;
    use storage::local::MemoryStore;

    fn desk() -> StudyDesk {
        StudyDesk::load(Arc::new(MemoryStore::new()), fixed_clock())
    }

    #[test]
    fn empty_desk_renders_zeroes_and_dash() {
        let now = fixed_clock().now_local();
        let vm = DashboardVm::build(&desk(), now);
        assert_eq!(
            vm.kpis,
            KpiVm {
                time_today: "0h 00m".into(),
                streak: "0".into(),
                done: "0".into(),
                total: "0".into(),
                next_exam: "—".into(),
            }
        );
        assert!(vm.tasks.is_empty());
        assert_eq!(vm.exam_hint, "");
        assert_eq!(vm.subjects.len(), 3);
        assert_eq!(vm.subjects[0].bar_style, "width: 55%");
        assert_eq!(vm.focus_button_label(), "Focus Mode");
    }

    #[test]
    fn rows_and_kpis_track_desk_state() {
        let mut desk = desk();
        let now = fixed_clock().now_local();
        let task = desk.add_task("Essay plan").unwrap().unwrap();
        desk.toggle_task(task.id(), true).unwrap();
        desk.save_notes("thesis first").unwrap();
        desk.set_focus(true).unwrap();

        let vm = DashboardVm::build(&desk, now);
        assert_eq!(vm.tasks.len(), 1);
        assert!(vm.tasks[0].done);
        assert_eq!(vm.tasks[0].title, "Essay plan");
        assert!(!vm.tasks[0].created_at_str.is_empty());
        assert_eq!(vm.kpis.time_today, "0h 25m");
        assert_eq!(vm.kpis.streak, "1");
        assert_eq!(vm.focus_button_label(), "Exit Focus");
    }

    #[test]
    fn exam_hint_uses_fallback_label() {
        let exam = ExamInfo::new("", NaiveDate::from_ymd_opt(2026, 6, 1));
        assert_eq!(exam_hint(&exam), "Next exam • 2026-06-01");
        assert_eq!(exam_hint(&ExamInfo::new("Maths", None)), "");
    }
}
