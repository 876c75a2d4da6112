use dioxus::prelude::*;

use desk_core::model::UspCard;

use crate::vm::{KpiVm, SubjectBarVm, TaskRowVm};

use super::actions::DashboardState;

#[component]
pub(super) fn KpiStrip(kpis: KpiVm) -> Element {
    rsx! {
        section { class: "kpis",
            Kpi { label: "Time today", value: kpis.time_today.clone() }
            Kpi { label: "Streak", value: kpis.streak.clone() }
            Kpi { label: "Done", value: kpis.done.clone() }
            Kpi { label: "Total", value: kpis.total.clone() }
            Kpi { label: "Next exam", value: kpis.next_exam.clone() }
        }
    }
}

#[component]
fn Kpi(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "kpi",
            span { class: "kpi-label", "{label}" }
            span { class: "kpi-value", "{value}" }
        }
    }
}

#[component]
pub(super) fn TaskRow(row: TaskRowVm, state: DashboardState) -> Element {
    let done = row.done;
    let id_for_toggle = row.id.clone();
    let id_for_delete = row.id.clone();
    let title_class = if done { "task-title done" } else { "task-title" };

    rsx! {
        li { class: "task-row",
            input {
                r#type: "checkbox",
                checked: done,
                onchange: move |_| state.toggle_task(&id_for_toggle, !done),
            }
            div { class: "{title_class}",
                "{row.title}"
                if !row.created_at_str.is_empty() {
                    span { class: "task-meta", "{row.created_at_str}" }
                }
            }
            button {
                class: "btn btn-small",
                onclick: move |_| state.delete_task(&id_for_delete),
                "Delete"
            }
        }
    }
}

#[component]
pub(super) fn SubjectBars(subjects: Vec<SubjectBarVm>) -> Element {
    rsx! {
        section { class: "card subjects",
            h2 { "Subject progress" }
            for subject in subjects {
                div { class: "subject",
                    span { class: "subject-name", "{subject.name}" }
                    div { class: "bar-track",
                        div { class: "bar-fill", style: "{subject.bar_style}" }
                    }
                    span { class: "subject-value", "{subject.progress}%" }
                }
            }
        }
    }
}

#[component]
pub(super) fn UspGrid(cards: Vec<UspCard>) -> Element {
    rsx! {
        footer { class: "usp-grid",
            for card in cards {
                div { class: "usp-card",
                    p { class: "usp-title", "{card.title}" }
                    p { class: "usp-body", "{card.body}" }
                }
            }
        }
    }
}
