use dioxus::prelude::*;

use desk_core::model::TaskId;
use services::StudyDesk;

use crate::context::AppContext;
use crate::views::state::Notice;

/// Signals backing the dashboard. Copyable so every handler can own one.
#[derive(Clone, Copy, PartialEq)]
pub(super) struct DashboardState {
    pub desk: Signal<StudyDesk>,
    pub task_input: Signal<String>,
    pub notes_input: Signal<String>,
    pub exam_label: Signal<String>,
    pub exam_date: Signal<String>,
    pub notice: Signal<Notice>,
}

pub(super) fn use_dashboard_state(ctx: &AppContext) -> DashboardState {
    let desk = use_signal(|| ctx.load_desk());
    let task_input = use_signal(String::new);
    let notes_input = use_signal(|| desk.peek().notes().to_owned());
    let exam_label = use_signal(|| desk.peek().exam().label().to_owned());
    let exam_date = use_signal(|| desk.peek().exam().date_string());
    let notice = use_signal(Notice::default);
    DashboardState {
        desk,
        task_input,
        notes_input,
        exam_label,
        exam_date,
        notice,
    }
}

impl DashboardState {
    pub fn set_task_input(mut self, value: String) {
        self.task_input.set(value);
    }

    pub fn set_notes_input(mut self, value: String) {
        self.notes_input.set(value);
    }

    pub fn set_exam_label(mut self, value: String) {
        self.exam_label.set(value);
    }

    pub fn set_exam_date(mut self, value: String) {
        self.exam_date.set(value);
    }

    pub fn add_task(mut self) {
        let title = self.task_input.peek().clone();
        let result = self.desk.write().add_task(&title);
        match result {
            Ok(Some(_)) => {
                self.task_input.set(String::new());
                self.notice.set(Notice::Idle);
            }
            Ok(None) => {}
            Err(err) => {
                self.task_input.set(String::new());
                self.notice.set(Notice::not_persisted(&err));
            }
        }
    }

    pub fn toggle_task(mut self, id: &TaskId, done: bool) {
        let result = self.desk.write().toggle_task(id, done);
        if let Err(err) = result {
            self.notice.set(Notice::not_persisted(&err));
        }
    }

    pub fn delete_task(mut self, id: &TaskId) {
        let result = self.desk.write().delete_task(id);
        if let Err(err) = result {
            self.notice.set(Notice::not_persisted(&err));
        }
    }

    pub fn save_notes(mut self) {
        let text = self.notes_input.peek().clone();
        let result = self.desk.write().save_notes(&text);
        self.notice.set(match result {
            Ok(()) => Notice::Saved("Notes"),
            Err(err) => Notice::not_persisted(&err),
        });
    }

    pub fn save_exam(mut self) {
        let label = self.exam_label.peek().clone();
        let date = self.exam_date.peek().clone();
        let result = self
            .desk
            .write()
            .save_exam(&label, &date)
            .map(|exam| exam.label().to_owned());
        match result {
            Ok(trimmed) => {
                self.exam_label.set(trimmed);
                self.notice.set(Notice::Saved("Exam"));
            }
            Err(err) => self.notice.set(Notice::from_exam_error(&err)),
        }
    }

    pub fn toggle_focus(mut self) {
        let on = !self.desk.peek().focus();
        let result = self.desk.write().set_focus(on);
        if let Err(err) = result {
            self.notice.set(Notice::not_persisted(&err));
        }
    }

    pub fn reset(mut self) {
        let result = self.desk.write().reset();
        self.task_input.set(String::new());
        self.notes_input.set(String::new());
        self.exam_label.set(String::new());
        self.exam_date.set(String::new());
        self.notice.set(match result {
            Ok(()) => Notice::Idle,
            Err(err) => Notice::not_persisted(&err),
        });
    }
}
