use dioxus::prelude::*;

use crate::context::{AppContext, ProgressRevision};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, map_history_rows};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClearState {
    Idle,
    Clearing,
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<ProgressRevision>();
    let progress = ctx.progress();
    let mut clear_state = use_signal(|| ClearState::Idle);

    let resource = {
        let progress = progress.clone();
        use_resource(move || {
            let progress = progress.clone();
            let _ = revision.current();
            async move {
                let snapshot = progress.snapshot().await;
                Ok::<_, ViewError>(map_history_rows(&snapshot.history))
            }
        })
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page history",
            div { class: "page-header",
                h2 { "History" }
                if let ViewState::Ready(rows) = &state {
                    if !rows.is_empty() {
                        button {
                            class: "danger",
                            disabled: clear_state() == ClearState::Clearing,
                            onclick: move |_| {
                                let progress = progress.clone();
                                clear_state.set(ClearState::Clearing);
                                spawn(async move {
                                    progress.clear().await;
                                    tracing::info!("history cleared");
                                    clear_state.set(ClearState::Idle);
                                    revision.bump();
                                });
                            },
                            "Clear History"
                        }
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No problems solved yet. Head to Solve to get started." }
                    } else {
                        ul { class: "history-list",
                            for row in rows {
                                HistoryRow { key: "{row.id}", row }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm) -> Element {
    let outcome_class = if row.is_correct { "correct" } else { "wrong" };
    let outcome_label = if row.is_correct { "Correct" } else { "Incorrect" };

    rsx! {
        li { class: "history-item {outcome_class}",
            div { class: "history-meta",
                span { class: "badge badge-{row.difficulty_class}", "{row.difficulty_label}" }
                span { class: "history-time", "{row.submitted_at_str}" }
                span { class: "history-outcome", "{outcome_label}" }
            }
            p { class: "history-problem", "{row.problem}" }
            p { class: "history-answers",
                "Your answer: {row.user_answer_str}"
                if let Some(correct) = row.correct_answer_str {
                    " | Correct answer: {correct}"
                }
            }
        }
    }
}
