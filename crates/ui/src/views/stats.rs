use dioxus::prelude::*;

use crate::context::{AppContext, ProgressRevision};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StatsVm, TierRowVm, map_stats};

#[component]
pub fn StatsView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<ProgressRevision>();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let _ = revision.current();
        async move {
            let snapshot = progress.snapshot().await;
            Ok::<_, ViewError>(map_stats(&snapshot.scores))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page stats",
            h2 { "Statistics" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(stats) => rsx! {
                    StatsBody { stats }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn StatsBody(stats: StatsVm) -> Element {
    if stats.is_empty() {
        return rsx! {
            p { class: "empty", "No attempts yet. Solve a problem to see your statistics." }
        };
    }

    rsx! {
        section { class: "overall",
            div { class: "stat",
                span { class: "stat-label", "Attempts" }
                span { class: "stat-value", "{stats.total}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Correct" }
                span { class: "stat-value", "{stats.correct}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Accuracy" }
                span { class: "stat-value", "{stats.accuracy}%" }
            }
        }
        section { class: "tiers",
            h3 { "By difficulty" }
            for tier in stats.tiers {
                TierRow { key: "{tier.class}", tier }
            }
        }
    }
}

#[component]
fn TierRow(tier: TierRowVm) -> Element {
    rsx! {
        div { class: "tier tier-{tier.class}",
            span { class: "badge badge-{tier.class}", "{tier.label}" }
            span { class: "tier-score", "{tier.correct}/{tier.total}" }
            span { class: "tier-accuracy", "{tier.accuracy}%" }
            div { class: "bar",
                div { class: "bar-fill", style: "width: {tier.accuracy}%" }
            }
        }
    }
}
