use dioxus::prelude::*;
use mathgen_core::model::Difficulty;

use crate::context::{AppContext, ProgressRevision};

use super::session::SolveSession;
use super::state::{Banner, Pending, SolveAction};

#[component]
pub fn SolveView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<ProgressRevision>();
    let session = use_context::<SolveSession>();
    let practice = ctx.practice();
    let generation_enabled = ctx.generation_enabled();

    let generate = {
        let practice = practice.clone();
        use_callback(move |()| session.generate(practice.clone()))
    };
    let submit = use_callback(move |()| session.submit(practice.clone(), revision));

    let current = session.state();
    let busy = current.is_busy();
    let selected = current.difficulty();
    let generate_label = if current.pending() == Some(Pending::Generating) {
        "Generating..."
    } else {
        "Generate Problem"
    };

    rsx! {
        div { class: "page solve",
            if !generation_enabled {
                p { class: "notice warning",
                    "Problem generation is not configured. Set MATHGEN_AI_API_KEY to enable it."
                }
            }

            section { class: "controls",
                div { class: "difficulty",
                    for difficulty in Difficulty::ALL {
                        button {
                            key: "{difficulty}",
                            class: if difficulty == selected { "difficulty-option selected" } else { "difficulty-option" },
                            disabled: busy,
                            onclick: move |_| {
                                session.apply(SolveAction::SelectDifficulty(difficulty));
                            },
                            "{difficulty.label()}"
                        }
                    }
                }
                button {
                    id: "generate",
                    class: "primary",
                    disabled: busy,
                    onclick: move |_| generate.call(()),
                    "{generate_label}"
                }
            }

            match current.banner() {
                Some(Banner::Notice(message)) => rsx! {
                    p { class: "notice error", "{message}" }
                },
                _ => rsx! {},
            }

            match current.attempt() {
                None => rsx! {
                    p { class: "empty", "Choose a difficulty and generate a problem to begin." }
                },
                Some(attempt) => {
                    let problem = attempt.problem();
                    let text = problem.problem_text().to_string();
                    let hint = problem.hint().map(str::to_string);
                    let steps = problem.steps().to_vec();
                    let tier = attempt.difficulty();
                    let answer = current.answer().to_string();
                    let can_submit = current.can_submit();
                    let checking = current.pending() == Some(Pending::Checking);
                    let show_hint = current.show_hint();
                    let show_steps = current.show_steps();
                    rsx! {
                        article { class: "problem",
                            span { class: "badge badge-{tier}", "{tier.label()}" }
                            p { class: "problem-text", "{text}" }

                            form {
                                class: "answer",
                                onsubmit: move |evt: FormEvent| {
                                    evt.prevent_default();
                                    submit.call(());
                                },
                                input {
                                    id: "answer",
                                    r#type: "text",
                                    placeholder: "Your answer",
                                    value: "{answer}",
                                    disabled: busy,
                                    oninput: move |evt| {
                                        session.apply(SolveAction::EditAnswer(evt.value()));
                                    },
                                }
                                button {
                                    r#type: "submit",
                                    class: "primary",
                                    disabled: !can_submit,
                                    if checking { "Checking..." } else { "Submit Answer" }
                                }
                            }

                            FeedbackBanner {
                                banner: current.banner().cloned(),
                                on_try_again: move |()| {
                                    session.apply(SolveAction::TryAgain);
                                },
                            }

                            div { class: "disclosure",
                                if hint.is_some() {
                                    button {
                                        class: "secondary",
                                        onclick: move |_| {
                                            session.apply(SolveAction::ToggleHint);
                                        },
                                        if show_hint { "Hide Hint" } else { "Show Hint" }
                                    }
                                }
                                if !steps.is_empty() {
                                    button {
                                        class: "secondary",
                                        onclick: move |_| {
                                            session.apply(SolveAction::ToggleSteps);
                                        },
                                        if show_steps { "Hide Solution Steps" } else { "Show Solution Steps" }
                                    }
                                }
                            }
                            if show_hint {
                                if let Some(hint) = hint {
                                    p { class: "hint", "Hint: {hint}" }
                                }
                            }
                            if show_steps {
                                ol { class: "steps",
                                    for step in steps {
                                        li { "{step}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FeedbackBanner(banner: Option<Banner>, on_try_again: EventHandler<()>) -> Element {
    let Some(Banner::Feedback(feedback)) = banner else {
        return rsx! {};
    };
    let class = if feedback.is_correct {
        "feedback correct"
    } else {
        "feedback wrong"
    };

    rsx! {
        div { class: "{class}",
            p { "{feedback.message}" }
            if !feedback.is_correct {
                button {
                    class: "secondary",
                    onclick: move |_| on_try_again.call(()),
                    "Try Again"
                }
            }
        }
    }
}
