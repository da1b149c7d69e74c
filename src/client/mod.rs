pub mod dto;

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{AppError, TransportError};
use crate::models::{Task, TaskPayload, TimeSummary};

pub use dto::{ListQuery, PageResponse, StateAction};

#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list_todos(&self, query: &ListQuery) -> Result<PageResponse, TransportError>;
    async fn create_todo(&self, payload: &TaskPayload) -> Result<Task, TransportError>;
    async fn update_todo(&self, id: i64, payload: &TaskPayload) -> Result<Task, TransportError>;
    async fn patch_state(&self, id: i64, action: StateAction) -> Result<(), TransportError>;
    async fn delete_todo(&self, id: i64) -> Result<(), TransportError>;
    async fn time_summary(&self) -> Result<TimeSummary, TransportError>;
}

pub struct TodoHttpClient {
    client: Client,
    config: ClientConfig,
}

impl TodoHttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Network(format!("{} cannot be a base url", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn ensure_success(response: Response) -> Result<Response, TransportError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        let body_text = Self::ensure_success(response).await?.text().await?;
        serde_json::from_str::<T>(&body_text).map_err(|e| {
            tracing::error!("Failed to parse: {}", e);
            TransportError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl TodoApi for TodoHttpClient {
    async fn list_todos(&self, query: &ListQuery) -> Result<PageResponse, TransportError> {
        let mut url = self.endpoint(&["todos"])?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn create_todo(&self, payload: &TaskPayload) -> Result<Task, TransportError> {
        let url = self.endpoint(&["todos"])?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(payload).send().await?;
        Self::decode(response).await
    }

    async fn update_todo(&self, id: i64, payload: &TaskPayload) -> Result<Task, TransportError> {
        let url = self.endpoint(&["todos", &id.to_string()])?;
        debug!("PUT {}", url);

        let response = self.client.put(url).json(payload).send().await?;
        Self::decode(response).await
    }

    async fn patch_state(&self, id: i64, action: StateAction) -> Result<(), TransportError> {
        let url = self.endpoint(&["todos", &id.to_string(), action.as_str()])?;
        debug!("PATCH {}", url);

        // The body may be a full task or a bare state projection; the caller
        // already holds the new state.
        let response = self.client.patch(url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_todo(&self, id: i64) -> Result<(), TransportError> {
        let url = self.endpoint(&["todos", &id.to_string()])?;
        debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn time_summary(&self) -> Result<TimeSummary, TransportError> {
        let url = self.endpoint(&["todos", "time"])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }
}

/// Accepts everything and stores nothing. Created tasks still get distinct ids.
pub struct NoopTodoApi {
    next_id: AtomicI64,
}

impl NoopTodoApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for NoopTodoApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoApi for NoopTodoApi {
    async fn list_todos(&self, _query: &ListQuery) -> Result<PageResponse, TransportError> {
        Ok(PageResponse::default())
    }

    async fn create_todo(&self, payload: &TaskPayload) -> Result<Task, TransportError> {
        Ok(echo(self.next_id.fetch_add(1, Ordering::Relaxed), payload))
    }

    async fn update_todo(&self, id: i64, payload: &TaskPayload) -> Result<Task, TransportError> {
        Ok(echo(id, payload))
    }

    async fn patch_state(&self, _id: i64, _action: StateAction) -> Result<(), TransportError> {
        Ok(())
    }

    async fn delete_todo(&self, _id: i64) -> Result<(), TransportError> {
        Ok(())
    }

    async fn time_summary(&self) -> Result<TimeSummary, TransportError> {
        Ok(TimeSummary::default())
    }
}

fn echo(id: i64, payload: &TaskPayload) -> Task {
    Task {
        id,
        text: payload.text.clone(),
        due_date: payload.due_date,
        priority: payload.priority,
        state: payload.state,
        creation_date: payload.creation_date.clone(),
        done_date: payload.done_date.clone(),
        time_frame: payload.time_frame.clone(),
    }
}
