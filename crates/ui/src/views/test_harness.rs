use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use desk_core::time::fixed_clock;
use services::{Clock, StudyDesk};
use storage::local::{LocalStore, MemoryStore};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::DashboardView;

#[derive(Clone)]
struct TestApp {
    store: MemoryStore,
    clock: Clock,
}

impl UiApp for TestApp {
    fn local_store(&self) -> Arc<dyn LocalStore> {
        Arc::new(self.store.clone())
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn DashboardHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { DashboardView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: MemoryStore,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a dashboard over a fresh in-memory store, letting `seed` prepare
/// the persisted state first.
pub fn setup_dashboard(seed: impl FnOnce(&mut StudyDesk)) -> ViewHarness {
    let store = MemoryStore::new();
    let clock = fixed_clock();
    let mut desk = StudyDesk::load(Arc::new(store.clone()), clock);
    seed(&mut desk);

    let app = Arc::new(TestApp {
        store: store.clone(),
        clock,
    });
    let dom = VirtualDom::new_with_props(DashboardHarness, HarnessProps { app });
    ViewHarness { dom, store }
}

/// Context over `store` with the fixed test clock.
pub fn memory_context(store: &MemoryStore) -> AppContext {
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        store: store.clone(),
        clock: fixed_clock(),
    });
    build_app_context(&app)
}
