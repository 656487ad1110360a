use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::{AppContext, ProgressRevision};
use crate::views::{HistoryView, SolveSession, SolveView, StatsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", SolveView)] Solve {},
        #[route("/history", HistoryView)] History {},
        #[route("/stats", StatsView)] Stats {},
}

#[component]
fn Layout() -> Element {
    use_context_provider(ProgressRevision::new);
    use_context_provider(SolveSession::new);

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Math Problem Generator" }
                p { class: "subtitle", "Primary 5 word problems" }
            }
            TabBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TabBar() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<ProgressRevision>();
    let progress = ctx.progress();

    let history_len = use_resource(move || {
        let progress = progress.clone();
        let _ = revision.current();
        async move { progress.snapshot().await.history.len() }
    });
    let history_label = match *history_len.read() {
        Some(count) => format!("History ({count})"),
        None => "History".to_string(),
    };

    rsx! {
        nav { class: "tabs",
            Link { class: "tab", active_class: "active", to: Route::Solve {}, "Solve" }
            Link { class: "tab", active_class: "active", to: Route::History {}, "{history_label}" }
            Link { class: "tab", active_class: "active", to: Route::Stats {}, "Stats" }
        }
    }
}
