use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use mathgen_core::model::AiSettings;
use mathgen_core::time::fixed_clock;
use services::{
    AppServices, GenerationError, GenerationRequest, PracticeService, ProgressService,
    TextGenerator,
};
use storage::{DEFAULT_EXPIRY, Storage};
use tokio::sync::Notify;

use crate::context::{ProgressRevision, UiApp, build_app_context};
use crate::routes::Route;
use crate::views::{HistoryView, SolveSession, SolveView, StatsView};

const PROBLEM_REPLY: &str = r#"{"problem_text": "What is 6 x 7?", "final_answer": 42, "hint": "Count by sevens.", "steps": ["6 x 7 = 42"]}"#;
pub const FEEDBACK_REPLY: &str = "Six groups of seven is one more seven than you counted.";

struct StaticGenerator;

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Ok(PROBLEM_REPLY.to_string())
    }
}

/// Answers problem requests at once; feedback requests wait until `gate` is notified.
struct GatedGenerator {
    gate: Arc<Notify>,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if request.max_tokens.is_some() {
            self.gate.notified().await;
            return Ok(FEEDBACK_REPLY.to_string());
        }
        Ok(PROBLEM_REPLY.to_string())
    }
}

#[derive(Clone)]
struct TestApp {
    generation_enabled: bool,
    services: AppServices,
}

impl UiApp for TestApp {
    fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }

    fn practice(&self) -> Arc<PracticeService> {
        self.services.practice()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Solve,
    History,
    Stats,
    /// The full router, tab bar included.
    App,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(ProgressRevision::new);
    use_context_provider(SolveSession::new);
    use_context_provider(|| props.view);
    if props.view == ViewKind::App {
        rsx! { Router::<Route> {} }
    } else {
        rsx! { Router::<TestRoute> {} }
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Solve => rsx! { SolveView {} },
        ViewKind::History => rsx! { HistoryView {} },
        ViewKind::Stats | ViewKind::App => rsx! { StatsView {} },
    }
}

/// Handles into a [`ToggledSolveHarness`], registered on its first render.
#[derive(Clone, Default)]
pub struct SolveHandles {
    session: Rc<RefCell<Option<SolveSession>>>,
    revision: Rc<RefCell<Option<ProgressRevision>>>,
    visible: Rc<RefCell<Option<Signal<bool>>>>,
}

impl SolveHandles {
    pub fn session(&self) -> SolveSession {
        self.session.borrow().expect("session registered")
    }

    pub fn revision(&self) -> ProgressRevision {
        self.revision.borrow().expect("revision registered")
    }

    pub fn set_visible(&self, visible: bool) {
        let mut signal = self.visible.borrow().expect("visibility registered");
        signal.set(visible);
    }
}

#[derive(Props, Clone)]
struct ToggledSolveProps {
    app: Arc<TestApp>,
    handles: SolveHandles,
}

impl PartialEq for ToggledSolveProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Provides the solve session above a `SolveView` that can be unmounted,
/// the way the layout keeps it while the user is on another tab.
#[component]
fn ToggledSolveHarness(props: ToggledSolveProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let revision = use_context_provider(ProgressRevision::new);
    let session = use_context_provider(SolveSession::new);
    let visible = use_signal(|| true);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *props.handles.session.borrow_mut() = Some(session);
        *props.handles.revision.borrow_mut() = Some(revision);
        *props.handles.visible.borrow_mut() = Some(visible);
    }

    rsx! {
        if visible() {
            SolveView {}
        } else {
            p { "Away from the solve tab" }
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Build, then let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
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

pub async fn test_services() -> AppServices {
    AppServices::with_generator(
        &Storage::in_memory(),
        fixed_clock(),
        DEFAULT_EXPIRY,
        &AiSettings::default(),
        Arc::new(StaticGenerator),
    )
    .await
}

pub fn setup_view_harness(
    view: ViewKind,
    services: AppServices,
    generation_enabled: bool,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        generation_enabled,
        services,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}

/// Services whose feedback requests block until the returned gate is notified.
pub async fn gated_services() -> (AppServices, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let services = AppServices::with_generator(
        &Storage::in_memory(),
        fixed_clock(),
        DEFAULT_EXPIRY,
        &AiSettings::default(),
        Arc::new(GatedGenerator {
            gate: Arc::clone(&gate),
        }),
    )
    .await;
    (services, gate)
}

pub fn setup_toggled_solve(services: AppServices) -> (ViewHarness, SolveHandles) {
    let app = Arc::new(TestApp {
        generation_enabled: true,
        services,
    });
    let handles = SolveHandles::default();
    let dom = VirtualDom::new_with_props(
        ToggledSolveHarness,
        ToggledSolveProps {
            app,
            handles: handles.clone(),
        },
    );
    (ViewHarness { dom }, handles)
}
