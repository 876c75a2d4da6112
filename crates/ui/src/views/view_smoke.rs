use chrono::Duration;
use desk_core::time::fixed_clock;
use storage::local::{LocalStore, StoreKey};

use super::test_harness::setup_dashboard;

#[test]
fn empty_dashboard_renders_defaults() {
    let mut harness = setup_dashboard(|_| {});
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No tasks yet"), "missing empty state in {html}");
    assert!(html.contains("0h 00m"), "missing time KPI in {html}");
    assert!(html.contains("—"), "missing exam placeholder in {html}");
    for subject in ["Maths", "Science", "English"] {
        assert!(html.contains(subject), "missing {subject} in {html}");
    }
    assert!(html.contains("width: 55%"), "missing bar width in {html}");
    assert!(html.contains("Clarity under pressure"), "missing USP in {html}");
    assert!(html.contains("Focus Mode"), "missing focus button in {html}");
}

#[test]
fn dashboard_renders_persisted_state() {
    let exam_day = (fixed_clock().now_local().date() + Duration::days(4))
        .format("%Y-%m-%d")
        .to_string();
    let mut harness = setup_dashboard(|desk| {
        let task = desk.add_task("Past paper 2021").unwrap().unwrap();
        desk.add_task("Flashcards: organelles").unwrap();
        desk.toggle_task(task.id(), true).unwrap();
        desk.save_notes("watch the units").unwrap();
        desk.save_exam("Biology", &exam_day).unwrap();
    });
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Past paper 2021"), "missing task in {html}");
    assert!(html.contains("Flashcards: organelles"), "missing task in {html}");
    assert!(html.contains("task-title done"), "missing done style in {html}");
    assert!(html.contains("0h 25m"), "missing time KPI in {html}");
    assert!(html.contains("4d"), "missing countdown in {html}");
    assert!(html.contains("watch the units"), "missing notes in {html}");
    assert!(
        html.contains(&format!("Biology • {exam_day}")),
        "missing exam hint in {html}"
    );
}

#[test]
fn focus_mode_hides_usp_cards() {
    let mut harness = setup_dashboard(|desk| desk.set_focus(true).unwrap());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("desk focus"), "missing focus class in {html}");
    assert!(html.contains("Exit Focus"), "missing focus label in {html}");
    assert!(!html.contains("Clarity under pressure"), "USP shown in {html}");
}

#[test]
fn corrupt_store_still_renders() {
    let mut harness = setup_dashboard(|_| {});
    harness
        .store
        .set_raw(StoreKey::Tasks.as_str(), "not json".to_string())
        .unwrap();
    harness
        .store
        .set_raw(StoreKey::Subjects.as_str(), "[{\"name\":\"Art\",\"progress\":500}]".to_string())
        .unwrap();
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No tasks yet"), "missing fallback in {html}");
    assert!(html.contains("Maths"), "missing default subjects in {html}");
}
