use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::client::{StateAction, TodoApi};
use crate::error::{AppError, TransportError};
use crate::models::{Task, TaskDraft};
use crate::state::{PageEvent, SharedObserver};

/// Local mirror of the current page of tasks.
///
/// A successful fetch replaces the whole page. Between fetches the cache is
/// patched by its own mutations: creates, edits and deletes after the service
/// confirms them, checkbox toggles before it does.
pub struct ListCache {
    api: Arc<dyn TodoApi>,
    observer: SharedObserver,
    items: Vec<Task>,
    in_flight: usize,
    last_error: Option<TransportError>,
    select_all: bool,
    rollback_failed_toggles: bool,
}

impl ListCache {
    pub fn new(api: Arc<dyn TodoApi>, observer: SharedObserver, rollback_failed_toggles: bool) -> Self {
        Self {
            api,
            observer,
            items: Vec::new(),
            in_flight: 0,
            last_error: None,
            select_all: false,
            rollback_failed_toggles,
        }
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while any request issued through the page is unresolved.
    pub fn pending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// State of the header checkbox.
    pub fn select_all(&self) -> bool {
        self.select_all
    }

    pub(crate) fn replace_all(&mut self, items: Vec<Task>) {
        self.items = items;
        self.emit(PageEvent::ItemsReplaced {
            count: self.items.len(),
        });
    }

    pub(crate) fn begin_request(&mut self) {
        self.in_flight += 1;
        if self.in_flight == 1 {
            self.emit(PageEvent::PendingChanged(true));
        }
    }

    pub(crate) fn end_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.emit(PageEvent::PendingChanged(false));
        }
    }

    pub async fn create(&mut self, draft: &TaskDraft) -> Result<Task, AppError> {
        let payload = draft.validate()?;
        self.clear_error();

        self.begin_request();
        let result = self.api.create_todo(&payload).await;

        let outcome = match result {
            Ok(task) => {
                debug!("created task {}", task.id);
                self.items.push(task.clone());
                self.emit(PageEvent::ItemInserted { id: task.id });
                Ok(task)
            }
            Err(e) => {
                warn!("Failed to create task: {}", e);
                self.record_error(e.clone());
                Err(e.into())
            }
        };
        self.end_request();
        outcome
    }

    pub async fn update(&mut self, id: i64, draft: &TaskDraft) -> Result<Task, AppError> {
        let mut payload = draft.validate()?;
        payload.id = Some(id);
        self.clear_error();

        self.begin_request();
        let result = self.api.update_todo(id, &payload).await;

        let outcome = match result {
            Ok(task) => {
                match self.items.iter_mut().find(|t| t.id == id) {
                    Some(slot) => {
                        *slot = task.clone();
                        self.emit(PageEvent::ItemUpdated { id });
                    }
                    None => debug!("updated task {} is not on the current page", id),
                }
                Ok(task)
            }
            Err(e) => {
                warn!("Failed to update task {}: {}", id, e);
                self.record_error(e.clone());
                Err(e.into())
            }
        };
        self.end_request();
        outcome
    }

    /// Applies the new checkbox value locally, then tells the service.
    /// A failed patch leaves the local value in place unless rollback is
    /// configured; the next fetch brings back the service's view either way.
    pub async fn toggle_state(&mut self, id: i64, done: bool) {
        let Some(previous) = self.set_local_state(id, done) else {
            warn!("Cannot toggle task {}: not on the current page", id);
            return;
        };
        self.clear_error();

        self.begin_request();
        let result = self.api.patch_state(id, StateAction::from(done)).await;

        if let Err(e) = result {
            warn!("Failed to set task {} {}: {}", id, StateAction::from(done).as_str(), e);
            self.record_error(e);
            if self.rollback_failed_toggles {
                self.set_local_state(id, previous);
            }
        }
        self.end_request();
    }

    /// Patches every cached task concurrently. The page is rewritten only when
    /// every patch succeeds; the header checkbox flips regardless.
    pub async fn toggle_all(&mut self, done: bool) {
        let previous_select_all = self.select_all;
        self.select_all = done;
        self.emit(PageEvent::AllStatesChanged { done });
        self.clear_error();

        let api = Arc::clone(&self.api);
        let action = StateAction::from(done);
        let snapshot = self.items.clone();

        self.begin_request();
        let results = join_all(snapshot.iter().map(|task| api.patch_state(task.id, action))).await;

        let total = results.len();
        let failures: Vec<TransportError> = results.into_iter().filter_map(Result::err).collect();

        if failures.is_empty() {
            let updated = snapshot
                .into_iter()
                .map(|task| Task { state: done, ..task })
                .collect();
            self.replace_all(updated);
            self.end_request();
            return;
        }

        warn!(
            "Failed to set {} of {} tasks {}: {}",
            failures.len(),
            total,
            action.as_str(),
            failures[0]
        );
        if let Some(first) = failures.into_iter().next() {
            self.record_error(first);
        }
        if self.rollback_failed_toggles {
            self.select_all = previous_select_all;
            self.emit(PageEvent::AllStatesChanged {
                done: previous_select_all,
            });
        }
        self.end_request();
    }

    /// Removes the task once the service confirms the delete.
    pub async fn delete(&mut self, id: i64) {
        self.clear_error();

        self.begin_request();
        let result = self.api.delete_todo(id).await;

        match result {
            Ok(()) => {
                let before = self.items.len();
                self.items.retain(|t| t.id != id);
                if self.items.len() != before {
                    self.emit(PageEvent::ItemRemoved { id });
                }
            }
            Err(e) => {
                warn!("Failed to delete task {}: {}", id, e);
                self.record_error(e);
            }
        }
        self.end_request();
    }

    /// Returns the state the task had before, or `None` if it is not cached.
    fn set_local_state(&mut self, id: i64, done: bool) -> Option<bool> {
        let task = self.items.iter_mut().find(|t| t.id == id)?;
        let previous = std::mem::replace(&mut task.state, done);
        self.emit(PageEvent::StateChanged { id, done });
        Some(previous)
    }

    fn record_error(&mut self, err: TransportError) {
        self.last_error = Some(err.clone());
        self.emit(PageEvent::ErrorRecorded(err));
    }

    fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.emit(PageEvent::ErrorCleared);
        }
    }

    fn emit(&self, event: PageEvent) {
        self.observer.notify(&event);
    }
}
