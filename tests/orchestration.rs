mod common;

use common::{FakeCalendar, FakeTaskStore, now, task, test_config, today};
use notionCalSync::runtime::{Job, run_daily_sync_and_review, run_job};

#[tokio::test]
async fn full_run_syncs_then_reviews() {
    let store = FakeTaskStore::new(vec![task("t1", "Pay rent", Some(today()))]);
    let calendar = FakeCalendar::new();

    let outcome = run_daily_sync_and_review(&store, &calendar, &test_config(), now()).await;

    assert!(outcome.is_success());
    let events = calendar.events().await;
    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay rent", "Daily Task Review"]);
    assert!(events[1]
        .description
        .as_deref()
        .unwrap()
        .contains("• Pay rent — Mon, Oct 19 (Due today)"));
}

#[tokio::test]
async fn failing_sync_does_not_stop_review() {
    let mut store = FakeTaskStore::new(Vec::new());
    store.fail_query = true;
    let calendar = FakeCalendar::new();

    let outcome = run_daily_sync_and_review(&store, &calendar, &test_config(), now()).await;

    assert!(!outcome.is_success());
    assert!(matches!(outcome.sync, Some(Err(_))));
    // The review also queries and fails, but it was still attempted.
    assert!(matches!(outcome.review, Some(Err(_))));
    assert_eq!(store.queries.lock().await.len(), 2);
}

#[tokio::test]
async fn single_job_runs_only_that_component() {
    let store = FakeTaskStore::new(vec![task("t1", "Pay rent", Some(today()))]);
    let calendar = FakeCalendar::new();

    let outcome = run_job(Job::Review, &store, &calendar, &test_config(), now()).await;

    assert!(outcome.sync.is_none());
    assert!(matches!(outcome.review, Some(Ok(_))));
    assert!(!store.task("t1").await.synced);
}
