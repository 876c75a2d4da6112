use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use storage::local::{LocalStore, MemoryStore, StoreKey};

use crate::context::AppContext;
use crate::views::state::Notice;
use crate::views::test_harness::{drive_dom, memory_context};

use super::actions::{DashboardState, use_dashboard_state};

#[derive(Clone, Default)]
struct HarnessHandles {
    state: Rc<RefCell<Option<DashboardState>>>,
}

impl HarnessHandles {
    fn state(&self) -> DashboardState {
        (*self.state.borrow()).expect("state registered")
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    ctx: AppContext,
    handles: HarnessHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn DashboardActionHarness(props: HarnessProps) -> Element {
    let state = use_dashboard_state(&props.ctx);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *props.handles.state.borrow_mut() = Some(state);
    }
    rsx! { div {} }
}

fn mount(store: &MemoryStore) -> (VirtualDom, DashboardState) {
    let handles = HarnessHandles::default();
    let mut dom = VirtualDom::new_with_props(
        DashboardActionHarness,
        HarnessProps {
            ctx: memory_context(store),
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    let state = handles.state();
    (dom, state)
}

fn stored(store: &MemoryStore, key: StoreKey) -> Option<String> {
    store.get_raw(key.as_str()).unwrap()
}

#[test]
fn add_task_clears_input_only_when_a_task_is_created() {
    let store = MemoryStore::new();
    let (mut dom, state) = mount(&store);

    state.set_task_input("   ".to_string());
    state.add_task();
    drive_dom(&mut dom);
    assert_eq!(*state.task_input.peek(), "   ");
    assert!(state.desk.peek().tasks().is_empty());
    assert_eq!(stored(&store, StoreKey::Tasks), None);

    state.set_task_input("  Mock paper 2  ".to_string());
    state.add_task();
    drive_dom(&mut dom);
    assert_eq!(*state.task_input.peek(), "");
    assert_eq!(state.desk.peek().tasks()[0].title(), "Mock paper 2");
    assert!(stored(&store, StoreKey::Tasks).unwrap().contains("Mock paper 2"));
}

#[test]
fn toggle_and_delete_reach_the_store() {
    let store = MemoryStore::new();
    let (mut dom, state) = mount(&store);

    state.set_task_input("Glossary".to_string());
    state.add_task();
    let id = state.desk.peek().tasks()[0].id().clone();

    state.toggle_task(&id, true);
    drive_dom(&mut dom);
    assert!(state.desk.peek().tasks()[0].is_done());
    assert!(stored(&store, StoreKey::Tasks).unwrap().contains("\"done\":true"));

    state.delete_task(&id);
    drive_dom(&mut dom);
    assert!(state.desk.peek().tasks().is_empty());
    assert_eq!(stored(&store, StoreKey::Tasks).as_deref(), Some("[]"));
}

#[test]
fn save_exam_writes_back_trimmed_label_or_flags_bad_date() {
    let store = MemoryStore::new();
    let (mut dom, state) = mount(&store);

    state.set_exam_label("  Chemistry  ".to_string());
    state.set_exam_date("2026-06-10".to_string());
    state.save_exam();
    drive_dom(&mut dom);
    assert_eq!(*state.exam_label.peek(), "Chemistry");
    assert_eq!(*state.notice.peek(), Notice::Saved("Exam"));
    assert!(stored(&store, StoreKey::Exam).unwrap().contains("2026-06-10"));

    state.set_exam_label("Physics".to_string());
    state.set_exam_date("10/06/2026".to_string());
    state.save_exam();
    drive_dom(&mut dom);
    assert!(matches!(*state.notice.peek(), Notice::Invalid(_)));
    assert_eq!(state.desk.peek().exam().label(), "Chemistry");
}

#[test]
fn notes_focus_and_reset() {
    let store = MemoryStore::new();
    let (mut dom, state) = mount(&store);

    state.set_notes_input("ionic vs covalent".to_string());
    state.save_notes();
    assert_eq!(*state.notice.peek(), Notice::Saved("Notes"));
    assert_eq!(
        stored(&store, StoreKey::Notes).as_deref(),
        Some("\"ionic vs covalent\"")
    );

    state.toggle_focus();
    drive_dom(&mut dom);
    assert!(state.desk.peek().focus());
    assert_eq!(stored(&store, StoreKey::Focus).as_deref(), Some("true"));
    state.toggle_focus();
    assert!(!state.desk.peek().focus());

    state.set_task_input("draft".to_string());
    state.set_exam_label("Biology".to_string());
    state.set_exam_date("2026-07-01".to_string());
    state.reset();
    drive_dom(&mut dom);

    assert_eq!(*state.task_input.peek(), "");
    assert_eq!(*state.notes_input.peek(), "");
    assert_eq!(*state.exam_label.peek(), "");
    assert_eq!(*state.exam_date.peek(), "");
    assert_eq!(*state.notice.peek(), Notice::Idle);
    assert!(store.is_empty().unwrap());
    assert!(!state.desk.peek().focus());
}
