use mathgen_core::model::Difficulty;

use super::solve::{Banner, Pending, SolveAction};
use super::test_harness::{
    FEEDBACK_REPLY, ViewKind, gated_services, setup_toggled_solve, setup_view_harness,
    test_services,
};

#[tokio::test(flavor = "current_thread")]
async fn solve_view_smoke_renders_selector_and_prompt() {
    let mut harness = setup_view_harness(ViewKind::Solve, test_services().await, true);
    harness.settle().await;
    let html = harness.render();

    for label in ["Easy", "Medium", "Hard", "Generate Problem"] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
    assert!(
        html.contains("Choose a difficulty and generate a problem to begin."),
        "missing empty prompt in {html}"
    );
    assert!(!html.contains("not configured"), "unexpected notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn solve_view_smoke_warns_without_generation() {
    let mut harness = setup_view_harness(ViewKind::Solve, test_services().await, false);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Problem generation is not configured."),
        "missing notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_lists_newest_first() {
    let services = test_services().await;
    let progress = services.progress();
    progress
        .record_submission("First problem", 41.0, 42.0, Difficulty::Easy, false)
        .await;
    progress
        .record_submission("Second problem", 9.0, 9.0, Difficulty::Hard, true)
        .await;

    let mut harness = setup_view_harness(ViewKind::History, services, true);
    harness.settle().await;
    let html = harness.render();

    let first = html.find("First problem").expect("first entry");
    let second = html.find("Second problem").expect("second entry");
    assert!(second < first, "entries out of order in {html}");
    assert!(html.contains("Your answer: 41"), "missing user answer in {html}");
    assert!(html.contains("Correct answer: 42"), "missing correct answer in {html}");
    assert!(html.contains("Clear History"), "missing clear button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::History, test_services().await, true);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No problems solved yet."), "missing empty state in {html}");
    assert!(!html.contains("Clear History"), "unexpected clear button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_renders_overall_and_tiers() {
    let services = test_services().await;
    let progress = services.progress();
    progress
        .record_submission("a", 1.0, 2.0, Difficulty::Easy, false)
        .await;
    progress
        .record_submission("b", 3.0, 3.0, Difficulty::Hard, true)
        .await;

    let mut harness = setup_view_harness(ViewKind::Stats, services, true);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Accuracy"), "missing accuracy label in {html}");
    assert!(html.contains("50%"), "missing overall accuracy in {html}");
    assert!(html.contains("0/1"), "missing easy tier in {html}");
    assert!(html.contains("0/0"), "missing medium tier in {html}");
    assert!(html.contains("1/1"), "missing hard tier in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tab_bar_smoke_counts_history_entries() {
    let services = test_services().await;
    services
        .progress()
        .record_submission("a", 1.0, 1.0, Difficulty::Medium, true)
        .await;

    let mut harness = setup_view_harness(ViewKind::App, services, true);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("History (1)"), "missing history count in {html}");
    assert!(html.contains("Stats"), "missing stats tab in {html}");
    assert!(html.contains("Generate Problem"), "missing solve view in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn pending_submit_completes_after_leaving_the_solve_tab() {
    let (services, gate) = gated_services().await;
    let practice = services.practice();
    let progress = services.progress();
    let (mut harness, handles) = setup_toggled_solve(services);
    harness.settle().await;

    let session = handles.session();
    harness
        .dom
        .in_runtime(|| session.generate(practice.clone()));
    for _ in 0..3 {
        harness.drive_async().await;
    }
    assert!(harness.dom.in_runtime(|| session.state().attempt().is_some()));

    harness.dom.in_runtime(|| {
        session.apply(SolveAction::EditAnswer("41".to_string()));
        session.submit(practice.clone(), handles.revision());
    });
    harness.drive_async().await;
    assert_eq!(
        harness.dom.in_runtime(|| session.state().pending()),
        Some(Pending::Checking)
    );

    harness.dom.in_runtime(|| handles.set_visible(false));
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("What is 6 x 7?"), "solve view still mounted: {html}");

    gate.notify_one();
    for _ in 0..5 {
        harness.drive_async().await;
    }

    let snapshot = progress.snapshot().await;
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.history[0].user_answer(), 41.0);
    let state = harness.dom.in_runtime(|| session.state());
    assert_eq!(state.pending(), None);
    assert_eq!(
        state.attempt().and_then(|attempt| attempt.last_submitted()),
        Some("41")
    );
    assert!(matches!(
        state.banner(),
        Some(Banner::Feedback(feedback)) if feedback.message == FEEDBACK_REPLY
    ));

    harness.dom.in_runtime(|| handles.set_visible(true));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("What is 6 x 7?"), "missing problem in {html}");
    assert!(html.contains(FEEDBACK_REPLY), "missing feedback in {html}");
}
