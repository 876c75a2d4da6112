use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::DashboardVm;

use super::actions::use_dashboard_state;
use super::components::{KpiStrip, SubjectBars, TaskRow, UspGrid};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_dashboard_state(&ctx);

    let vm = DashboardVm::build(&state.desk.read(), ctx.clock().now_local());
    let root_class = if vm.focus { "desk focus" } else { "desk" };
    let focus_label = vm.focus_button_label();
    let notice = state.notice.read().clone();
    let notice_class = notice.class();

    let task_value = state.task_input.read().clone();
    let notes_value = state.notes_input.read().clone();
    let exam_label_value = state.exam_label.read().clone();
    let exam_date_value = state.exam_date.read().clone();

    rsx! {
        div { class: "{root_class}",
            header { class: "desk-header",
                div {
                    h1 { "Exam Desk" }
                    p { class: "stamp", "{vm.today_stamp}" }
                }
                div { class: "header-actions",
                    button {
                        class: "btn",
                        onclick: move |_| state.toggle_focus(),
                        "{focus_label}"
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| state.reset(),
                        "Reset"
                    }
                }
            }

            if let Some(message) = notice.message() {
                p { class: "{notice_class}", "{message}" }
            }

            KpiStrip { kpis: vm.kpis.clone() }

            div { class: "grid",
                section { class: "card tasks",
                    h2 { "Tasks" }
                    div { class: "task-entry",
                        input {
                            r#type: "text",
                            placeholder: "Add a small task",
                            value: "{task_value}",
                            oninput: move |evt| state.set_task_input(evt.value()),
                            onkeydown: move |evt| match evt.data.key() {
                                Key::Enter => {
                                    evt.prevent_default();
                                    state.add_task();
                                }
                                _ => {}
                            },
                        }
                        button { class: "btn", onclick: move |_| state.add_task(), "Add" }
                    }
                    if vm.tasks.is_empty() {
                        p { class: "empty", "No tasks yet. Add one and keep it small." }
                    } else {
                        ul { class: "task-list",
                            for row in vm.tasks.clone() {
                                TaskRow { key: "{row.id}", row: row.clone(), state }
                            }
                        }
                    }
                }

                section { class: "card notes",
                    h2 { "Notes" }
                    textarea {
                        rows: "8",
                        value: "{notes_value}",
                        oninput: move |evt| state.set_notes_input(evt.value()),
                    }
                    button { class: "btn", onclick: move |_| state.save_notes(), "Save notes" }
                }

                section { class: "card exam",
                    h2 { "Exam" }
                    input {
                        r#type: "text",
                        placeholder: "Exam name",
                        value: "{exam_label_value}",
                        oninput: move |evt| state.set_exam_label(evt.value()),
                    }
                    input {
                        r#type: "date",
                        value: "{exam_date_value}",
                        oninput: move |evt| state.set_exam_date(evt.value()),
                    }
                    button { class: "btn", onclick: move |_| state.save_exam(), "Save exam" }
                    if !vm.exam_hint.is_empty() {
                        p { class: "exam-hint", "{vm.exam_hint}" }
                    }
                }
            }

            SubjectBars { subjects: vm.subjects.clone() }

            if !vm.focus {
                UspGrid { cards: vm.usp_cards.clone() }
            }
        }
    }
}
