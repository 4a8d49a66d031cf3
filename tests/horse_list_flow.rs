//! Horse list: debounced filtering and confirm-gated deletion

mod helpers;

use std::time::Duration;

use chrono::{Days, Utc};
use helpers::{stable, Harness};
use pedigree::types::{ErrorPayload, Sex};
use pedigree::ui::NotificationKind;
use pedigree::{ApiError, HorseList};

fn names(list: &HorseList) -> Vec<&str> {
    list.horses().iter().map(|h| h.name.as_str()).collect()
}

#[tokio::test]
async fn test_open_loads_unfiltered_list() {
    let h = Harness::new(stable(), true);
    let list = HorseList::open(h.ctx.clone()).await;

    assert_eq!(list.horses().len(), 5);
    assert_eq!(h.backend.horse_searches(), vec![Default::default()]);
    assert!(list.banner_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_filter_changes_are_debounced() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;

    list.set_name("W");
    tokio::time::advance(Duration::from_millis(300)).await;
    list.set_name("Wi");
    assert!(list.is_search_pending());

    let started = tokio::time::Instant::now();
    assert!(list.settle().await.unwrap());
    assert!(tokio::time::Instant::now() - started >= Duration::from_millis(500));

    let searches = h.backend.horse_searches();
    assert_eq!(searches.len(), 2);
    assert_eq!(searches[1].name.as_deref(), Some("Wi"));
    assert_eq!(names(&list), vec!["Willow"]);
}

#[tokio::test(start_paused = true)]
async fn test_run_due_searches_only_after_window() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;
    let typed = tokio::time::Instant::now();

    list.set_name("Sto");
    assert!(!list.run_due(typed + Duration::from_millis(499)).await.unwrap());
    assert_eq!(h.backend.horse_searches().len(), 1);

    assert!(list.run_due(typed + Duration::from_millis(500)).await.unwrap());
    assert!(!list.is_search_pending());
    assert_eq!(names(&list), vec!["Storm"]);

    // nothing left to run
    assert!(!list.run_due(typed + Duration::from_secs(5)).await.unwrap());
    assert_eq!(h.backend.horse_searches().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_equivalent_filter_is_not_searched_again() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;

    list.set_sex(Some(Sex::Male));
    assert!(list.settle().await.unwrap());
    // trims to the same filter as before
    list.set_name("  ");
    list.set_name("");
    assert!(!list.settle().await.unwrap());
    assert_eq!(h.backend.horse_searches().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_filter_suppresses_search() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;

    list.set_name("Storm");
    list.set_limit(Some(0));
    assert!(!list.is_search_pending());
    assert!(!list.settle().await.unwrap());

    let tomorrow = Utc::now().date_naive().checked_add_days(Days::new(1));
    list.set_limit(None);
    list.set_date_of_birth(tomorrow);
    assert!(!list.settle().await.unwrap());
    assert!(list.form().date_of_birth.error().is_some());

    assert_eq!(h.backend.horse_searches().len(), 1);
}

#[tokio::test]
async fn test_search_failure_shows_banner_and_notification() {
    let h = Harness::new(stable(), true);
    h.backend.fail_with(ApiError::server(
        500,
        ErrorPayload::new("Internal error", vec![]),
    ));
    let list = HorseList::open(h.ctx.clone()).await;

    assert!(list.horses().is_empty());
    assert_eq!(
        list.banner_error(),
        Some("Could not fetch horses: Internal error")
    );
    let note = h.notes.last().unwrap();
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(note.title, "Could Not Fetch Horses");
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let h = Harness::new(stable(), false);
    let mut list = HorseList::open(h.ctx.clone()).await;

    assert!(!list.delete(4).await.unwrap());
    assert!(h.backend.deletes().is_empty());
    assert_eq!(h.backend.horse_searches().len(), 1);
    assert_eq!(list.horses().len(), 5);
}

#[tokio::test]
async fn test_confirmed_delete_refreshes_once() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;

    assert!(list.delete(4).await.unwrap());
    assert_eq!(h.backend.deletes(), vec![4]);
    assert_eq!(h.backend.horse_searches().len(), 2);
    assert!(!names(&list).contains(&"Willow"));
    assert_eq!(
        h.confirmer.prompts(),
        vec!["Are you sure you want to delete the horse \"Willow\"".to_string()]
    );
    assert_eq!(
        h.notes.last().unwrap().body,
        "Horse Willow successfully deleted."
    );
}

#[tokio::test]
async fn test_failed_delete_keeps_list() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;
    h.backend.fail_with(ApiError::server(
        404,
        ErrorPayload::new("Horse to be deleted doesn't exist", vec![]),
    ));

    assert!(list.delete(4).await.is_err());
    assert_eq!(h.backend.deletes(), vec![4]);
    assert_eq!(h.backend.horse_searches().len(), 1);
    assert_eq!(list.horses().len(), 5);

    let note = h.notes.last().unwrap();
    assert_eq!(note.title, "Could not delete horse.");
    assert_eq!(note.body, "Horse to be deleted doesn't exist");
}

#[tokio::test]
async fn test_delete_of_unlisted_horse_is_rejected() {
    let h = Harness::new(stable(), true);
    let mut list = HorseList::open(h.ctx.clone()).await;

    assert!(list.delete(42).await.is_err());
    assert!(h.confirmer.prompts().is_empty());
    assert!(h.backend.deletes().is_empty());
}
