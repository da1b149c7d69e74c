mod common;

use common::{FakeTodoApi, mounted, page_with, server_error, task};
use tasklist::client::StateAction;
use tasklist::config::ClientConfig;
use tasklist::error::{AppError, ValidationError};
use tasklist::models::{Priority, TaskDraft};
use tasklist::state::PageEvent;

#[tokio::test]
async fn create_with_empty_text_never_reaches_service() {
    let (mut page, api, _) = mounted(vec![task(1, "existing", false)], 1).await;

    let err = page
        .cache_mut()
        .create(&TaskDraft::new("", Some(Priority::High)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(ValidationError::EmptyText)));
    assert_eq!(api.network_calls(), 0);
    assert_eq!(page.cache().len(), 1);
    assert!(page.cache().last_error().is_none());
}

#[tokio::test]
async fn create_without_priority_never_reaches_service() {
    let (mut page, api, _) = mounted(vec![], 0).await;

    let err = page
        .cache_mut()
        .create(&TaskDraft::new("Water plants", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(ValidationError::MissingPriority)));
    assert_eq!(api.network_calls(), 0);
}

#[tokio::test]
async fn create_appends_returned_task() {
    let (mut page, _, observer) = mounted(vec![task(1, "existing", false)], 1).await;

    let created = page
        .cache_mut()
        .create(&TaskDraft::new("Water plants", Some(Priority::Low)))
        .await
        .unwrap();

    assert_eq!(created.id, 2);
    assert_eq!(page.cache().len(), 2);
    assert_eq!(page.cache().items()[1].text, "Water plants");
    assert!(observer.events().contains(&PageEvent::ItemInserted { id: 2 }));
}

#[tokio::test]
async fn create_failure_keeps_items_and_returns_error() {
    let (mut page, api, _) = mounted(vec![task(1, "existing", false)], 1).await;
    api.with(|s| s.fail_create = true);

    let err = page
        .cache_mut()
        .create(&TaskDraft::new("Water plants", Some(Priority::Low)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Transport(_)));
    assert_eq!(page.cache().len(), 1);
    assert_eq!(page.cache().last_error(), Some(&server_error()));
}

#[tokio::test]
async fn update_replaces_item_in_place() {
    let (mut page, api, observer) =
        mounted(vec![task(1, "first", false), task(2, "second", false)], 1).await;

    let mut draft = TaskDraft::from_task(page.cache().get(1).unwrap());
    draft.text = "first, renamed".to_string();
    draft.priority = Some(Priority::High);
    page.cache_mut().update(1, &draft).await.unwrap();

    let items = page.cache().items();
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].text, "first, renamed");
    assert_eq!(items[0].priority, Priority::High);
    assert_eq!(items[1].text, "second");
    assert!(observer.events().contains(&PageEvent::ItemUpdated { id: 1 }));

    let sent = api.state.lock().unwrap().updated[0].1.clone();
    assert_eq!(sent.id, Some(1));
    assert_eq!(sent.creation_date.as_deref(), Some("2024-01-01T10:00:00"));
}

#[tokio::test]
async fn update_failure_leaves_items_unchanged() {
    let (mut page, api, _) = mounted(vec![task(1, "first", false)], 1).await;
    api.with(|s| s.fail_update = true);

    let draft = TaskDraft::new("changed", Some(Priority::Low));
    assert!(page.cache_mut().update(1, &draft).await.is_err());
    assert_eq!(page.cache().items()[0].text, "first");
}

#[tokio::test]
async fn toggle_state_sets_done_and_sends_action_token() {
    let (mut page, api, _) = mounted(vec![task(1, "first", false)], 1).await;

    page.cache_mut().toggle_state(1, true).await;

    assert!(page.cache().get(1).unwrap().state);
    assert_eq!(api.patches(), vec![(1, StateAction::Done)]);
    assert!(!page.cache().pending());
}

#[tokio::test]
async fn failed_toggle_is_not_rolled_back_by_default() {
    let (mut page, api, observer) = mounted(vec![task(1, "first", false)], 1).await;
    api.with(|s| {
        s.fail_patch_ids.insert(1);
    });

    page.cache_mut().toggle_state(1, true).await;

    assert!(page.cache().get(1).unwrap().state);
    assert_eq!(page.cache().last_error(), Some(&server_error()));
    let events = observer.events();
    assert_eq!(events[0], PageEvent::StateChanged { id: 1, done: true });
    assert!(events.contains(&PageEvent::ErrorRecorded(server_error())));
}

#[tokio::test]
async fn failed_toggle_rolls_back_when_configured() {
    let api = FakeTodoApi::with_tasks(vec![task(1, "first", false)], 1);
    api.with(|s| {
        s.fail_patch_ids.insert(1);
    });
    let config = ClientConfig {
        rollback_failed_toggles: true,
        ..ClientConfig::default()
    };
    let (mut page, _) = page_with(api, config);
    page.mount().await.unwrap();

    page.cache_mut().toggle_state(1, true).await;

    assert!(!page.cache().get(1).unwrap().state);
    assert!(page.cache().last_error().is_some());
}

#[tokio::test]
async fn toggle_of_unknown_task_issues_nothing() {
    let (mut page, api, _) = mounted(vec![task(1, "first", false)], 1).await;

    page.cache_mut().toggle_state(99, true).await;

    assert!(api.patches().is_empty());
}

#[tokio::test]
async fn toggle_all_patches_every_task() {
    let tasks = vec![task(1, "a", false), task(2, "b", true), task(3, "c", false)];
    let (mut page, api, _) = mounted(tasks, 1).await;

    page.cache_mut().toggle_all(true).await;

    let mut patched: Vec<i64> = api.patches().into_iter().map(|(id, _)| id).collect();
    patched.sort();
    assert_eq!(patched, vec![1, 2, 3]);
    assert!(api.patches().iter().all(|(_, a)| *a == StateAction::Done));
    assert!(page.cache().items().iter().all(|t| t.state));
    assert!(page.cache().select_all());
}

#[tokio::test]
async fn toggle_all_off_clears_every_state() {
    let (mut page, api, _) = mounted(vec![task(1, "a", false), task(2, "b", true)], 1).await;

    page.cache_mut().toggle_all(false).await;

    assert_eq!(api.patches().len(), 2);
    let states: Vec<(i64, bool)> = page.cache().items().iter().map(|t| (t.id, t.state)).collect();
    assert_eq!(states, vec![(1, false), (2, false)]);
}

#[tokio::test]
async fn toggle_all_partial_failure_leaves_items_but_flips_header() {
    let (mut page, api, _) = mounted(vec![task(1, "a", false), task(2, "b", false)], 1).await;
    api.with(|s| {
        s.fail_patch_ids.insert(2);
    });

    page.cache_mut().toggle_all(true).await;

    assert_eq!(api.patches().len(), 2);
    assert!(page.cache().items().iter().all(|t| !t.state));
    assert!(page.cache().select_all());
    assert!(page.cache().last_error().is_some());
}

#[tokio::test]
async fn delete_failure_keeps_item_count() {
    let (mut page, api, _) = mounted(vec![task(1, "a", false), task(2, "b", false)], 1).await;
    api.with(|s| s.fail_delete = true);

    page.cache_mut().delete(1).await;

    assert_eq!(page.cache().len(), 2);
    assert!(page.cache().last_error().is_some());
}

#[tokio::test]
async fn delete_removes_after_confirmation() {
    let (mut page, _, observer) = mounted(vec![task(1, "a", false), task(2, "b", false)], 1).await;

    page.cache_mut().delete(1).await;

    assert_eq!(page.cache().len(), 1);
    assert!(page.cache().get(1).is_none());
    assert_eq!(
        observer.events(),
        vec![
            PageEvent::PendingChanged(true),
            PageEvent::ItemRemoved { id: 1 },
            PageEvent::PendingChanged(false),
        ]
    );
}

#[tokio::test]
async fn pending_clears_only_after_mutation_lands() {
    let (mut page, _, observer) = mounted(vec![task(1, "a", false)], 1).await;

    page.cache_mut()
        .create(&TaskDraft::new("Pay rent", Some(Priority::High)))
        .await
        .unwrap();
    page.cache_mut()
        .update(1, &TaskDraft::new("a, edited", Some(Priority::Low)))
        .await
        .unwrap();

    assert_eq!(
        observer.events(),
        vec![
            PageEvent::PendingChanged(true),
            PageEvent::ItemInserted { id: 2 },
            PageEvent::PendingChanged(false),
            PageEvent::PendingChanged(true),
            PageEvent::ItemUpdated { id: 1 },
            PageEvent::PendingChanged(false),
        ]
    );
}

#[tokio::test]
async fn next_success_clears_previous_error() {
    let (mut page, api, _) = mounted(vec![task(1, "a", false)], 1).await;
    api.with(|s| s.fail_delete = true);
    page.cache_mut().delete(1).await;
    assert!(page.cache().last_error().is_some());

    page.cache_mut().toggle_state(1, true).await;
    assert!(page.cache().last_error().is_none());
}
