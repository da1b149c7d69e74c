#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tasklist::client::{ListQuery, PageResponse, StateAction, TodoApi};
use tasklist::config::ClientConfig;
use tasklist::error::TransportError;
use tasklist::models::{Priority, Task, TaskPayload, TimeSummary};
use tasklist::state::{PageEvent, PageObserver};
use tasklist::TodoPage;

/// In-memory todo service with call recording and failure switches.
#[derive(Default)]
pub struct FakeTodoApi {
    pub state: Mutex<FakeState>,
}

#[derive(Default)]
pub struct FakeState {
    pub tasks: Vec<Task>,
    pub total_pages: u32,
    pub next_id: i64,
    pub list_queries: Vec<ListQuery>,
    pub created: Vec<TaskPayload>,
    pub updated: Vec<(i64, TaskPayload)>,
    pub patches: Vec<(i64, StateAction)>,
    pub deletes: Vec<i64>,
    pub time_summary: Option<TimeSummary>,
    pub fail_list: bool,
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_delete: bool,
    pub fail_patch_ids: HashSet<i64>,
}

pub fn server_error() -> TransportError {
    TransportError::Status {
        status: 500,
        body: "boom".to_string(),
    }
}

pub fn task(id: i64, text: &str, state: bool) -> Task {
    Task {
        id,
        text: text.to_string(),
        due_date: None,
        priority: Priority::Medium,
        state,
        creation_date: Some("2024-01-01T10:00:00".to_string()),
        done_date: None,
        time_frame: None,
    }
}

impl FakeTodoApi {
    pub fn with_tasks(tasks: Vec<Task>, total_pages: u32) -> Arc<Self> {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            state: Mutex::new(FakeState {
                tasks,
                total_pages,
                next_id,
                ..Default::default()
            }),
        })
    }

    pub fn with(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.state.lock().unwrap().list_queries.clone()
    }

    pub fn patches(&self) -> Vec<(i64, StateAction)> {
        self.state.lock().unwrap().patches.clone()
    }

    pub fn network_calls(&self) -> usize {
        let s = self.state.lock().unwrap();
        s.created.len() + s.updated.len() + s.patches.len() + s.deletes.len()
    }
}

#[async_trait]
impl TodoApi for FakeTodoApi {
    async fn list_todos(&self, query: &ListQuery) -> Result<PageResponse, TransportError> {
        let mut s = self.state.lock().unwrap();
        s.list_queries.push(query.clone());
        if s.fail_list {
            return Err(server_error());
        }
        Ok(PageResponse {
            content: s.tasks.clone(),
            total_pages: s.total_pages,
        })
    }

    async fn create_todo(&self, payload: &TaskPayload) -> Result<Task, TransportError> {
        let mut s = self.state.lock().unwrap();
        s.created.push(payload.clone());
        if s.fail_create {
            return Err(server_error());
        }
        let id = s.next_id;
        s.next_id += 1;
        let created = Task {
            id,
            text: payload.text.clone(),
            due_date: payload.due_date,
            priority: payload.priority,
            state: payload.state,
            creation_date: Some("2024-02-02T08:00:00".to_string()),
            done_date: None,
            time_frame: None,
        };
        s.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_todo(&self, id: i64, payload: &TaskPayload) -> Result<Task, TransportError> {
        let mut s = self.state.lock().unwrap();
        s.updated.push((id, payload.clone()));
        if s.fail_update {
            return Err(server_error());
        }
        let mut updated = task(id, &payload.text, payload.state);
        updated.priority = payload.priority;
        updated.due_date = payload.due_date;
        Ok(updated)
    }

    async fn patch_state(&self, id: i64, action: StateAction) -> Result<(), TransportError> {
        let mut s = self.state.lock().unwrap();
        s.patches.push((id, action));
        if s.fail_patch_ids.contains(&id) {
            return Err(server_error());
        }
        Ok(())
    }

    async fn delete_todo(&self, id: i64) -> Result<(), TransportError> {
        let mut s = self.state.lock().unwrap();
        s.deletes.push(id);
        if s.fail_delete {
            return Err(server_error());
        }
        s.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn time_summary(&self) -> Result<TimeSummary, TransportError> {
        self.state
            .lock()
            .unwrap()
            .time_summary
            .clone()
            .ok_or_else(server_error)
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PageEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<PageEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl PageObserver for RecordingObserver {
    fn notify(&self, event: &PageEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn page_with(api: Arc<FakeTodoApi>, config: ClientConfig) -> (TodoPage, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let page = TodoPage::new(api, &config, observer.clone());
    (page, observer)
}

/// A page already mounted against `tasks`.
pub async fn mounted(tasks: Vec<Task>, total_pages: u32) -> (TodoPage, Arc<FakeTodoApi>, Arc<RecordingObserver>) {
    let api = FakeTodoApi::with_tasks(tasks, total_pages);
    let (mut page, observer) = page_with(api.clone(), ClientConfig::default());
    page.mount().await.expect("mount should succeed");
    observer.clear();
    (page, api, observer)
}
