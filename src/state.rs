use std::sync::Arc;

use tracing::debug;

use crate::error::TransportError;
use crate::sort::SortDirective;

/// State transitions reported to the page view, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    ItemsReplaced { count: usize },
    ItemInserted { id: i64 },
    ItemUpdated { id: i64 },
    ItemRemoved { id: i64 },
    StateChanged { id: i64, done: bool },
    AllStatesChanged { done: bool },
    PendingChanged(bool),
    ErrorRecorded(TransportError),
    ErrorCleared,
    CursorChanged { current_page: u32, total_pages: u32 },
    SortChanged(SortDirective),
    FetchFailed(TransportError),
}

/// The single consumer of list, cursor and sort changes. Called synchronously
/// right after each transition.
pub trait PageObserver: Send + Sync {
    fn notify(&self, event: &PageEvent);
}

pub type SharedObserver = Arc<dyn PageObserver>;

pub struct NoopObserver;

impl PageObserver for NoopObserver {
    fn notify(&self, _event: &PageEvent) {}
}

pub struct TracingObserver;

impl PageObserver for TracingObserver {
    fn notify(&self, event: &PageEvent) {
        debug!("page event: {:?}", event);
    }
}
