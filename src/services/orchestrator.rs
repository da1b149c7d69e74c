use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::{ListQuery, PageResponse, TodoApi};
use crate::config::ClientConfig;
use crate::error::{AppError, TransportError};
use crate::filter::{FilterSpecification, FilterToolbar};
use crate::models::TimeSummaryView;
use crate::services::list_cache::ListCache;
use crate::services::pagination::PaginationCursor;
use crate::sort::{SortColumn, SortDirective};
use crate::state::{PageEvent, SharedObserver};

/// A list request in flight. Tickets are numbered in issue order and only a
/// response newer than every one already applied may touch the cache.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageStatus {
    /// Nothing fetched and nothing in flight.
    Idle,
    /// A fetch is in flight and there is no good page to show yet, either
    /// because none has arrived or because the newest one failed.
    Loading,
    /// The newest applied fetch failed; the list area should not render.
    Failed(TransportError),
    Ready,
}

/// The list page: owns the cache, the cursor, the sort directive and the
/// filter toolbar, and decides when to go back to the service for an
/// authoritative page.
pub struct TodoPage {
    api: Arc<dyn TodoApi>,
    observer: SharedObserver,
    cache: ListCache,
    cursor: PaginationCursor,
    sort: SortDirective,
    filter: FilterSpecification,
    toolbar: FilterToolbar,
    page_size: u32,
    issued_seq: u64,
    applied_seq: u64,
    fetch_error: Option<TransportError>,
    loaded: bool,
}

impl TodoPage {
    pub fn new(api: Arc<dyn TodoApi>, config: &ClientConfig, observer: SharedObserver) -> Self {
        Self {
            cache: ListCache::new(api.clone(), observer.clone(), config.rollback_failed_toggles),
            cursor: PaginationCursor::new(observer.clone()),
            api,
            observer,
            sort: SortDirective::default(),
            filter: FilterSpecification::default(),
            toolbar: FilterToolbar::new(),
            page_size: config.page_size,
            issued_seq: 0,
            applied_seq: 0,
            fetch_error: None,
            loaded: false,
        }
    }

    pub fn cache(&self) -> &ListCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ListCache {
        &mut self.cache
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    /// The filter applied to every fetch: the last one submitted.
    pub fn filter(&self) -> &FilterSpecification {
        &self.filter
    }

    pub fn toolbar(&self) -> &FilterToolbar {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut FilterToolbar {
        &mut self.toolbar
    }

    pub fn fetch_error(&self) -> Option<&TransportError> {
        self.fetch_error.as_ref()
    }

    pub fn status(&self) -> PageStatus {
        let fetch_in_flight = self.cache.pending() && self.issued_seq > self.applied_seq;
        if fetch_in_flight && (!self.loaded || self.fetch_error.is_some()) {
            return PageStatus::Loading;
        }
        match &self.fetch_error {
            Some(e) => PageStatus::Failed(e.clone()),
            None if !self.loaded => PageStatus::Idle,
            None => PageStatus::Ready,
        }
    }

    /// First load: page 0, no filter, no sort.
    pub async fn mount(&mut self) -> Result<(), TransportError> {
        self.cursor.reset();
        if !self.sort.is_empty() {
            self.sort = SortDirective::default();
            self.observer.notify(&PageEvent::SortChanged(self.sort.clone()));
        }
        self.filter = self.toolbar.reset();
        self.fetch_page().await
    }

    pub async fn refresh(&mut self) -> Result<(), TransportError> {
        self.fetch_page().await
    }

    pub async fn next_page(&mut self) -> Result<(), TransportError> {
        if self.cursor.next() {
            self.fetch_page().await?;
        }
        Ok(())
    }

    pub async fn previous_page(&mut self) -> Result<(), TransportError> {
        if self.cursor.previous() {
            self.fetch_page().await?;
        }
        Ok(())
    }

    /// Column header click.
    pub async fn toggle_sort(&mut self, column: SortColumn) -> Result<(), TransportError> {
        self.sort.toggle(column);
        debug!("sort directive is now {:?}", self.sort.to_string());
        self.observer.notify(&PageEvent::SortChanged(self.sort.clone()));
        self.fetch_page().await
    }

    /// "Search": fetch with the toolbar's criterion at the current page and sort.
    pub async fn submit_filter(&mut self) -> Result<(), TransportError> {
        self.filter = self.toolbar.submit();
        self.fetch_page().await
    }

    /// "Clean": drop the filter and clear the toolbar, keeping page and sort.
    pub async fn reset_filter(&mut self) -> Result<(), TransportError> {
        self.filter = self.toolbar.reset();
        self.fetch_page().await
    }

    /// Fetches the page described by the current cursor, sort and filter and
    /// applies it unless a newer response got there first.
    pub async fn fetch_page(&mut self) -> Result<(), TransportError> {
        let ticket = self.begin_fetch();
        let outcome = self.api.list_todos(ticket.query()).await;
        let err = outcome.as_ref().err().cloned();
        self.complete_fetch(ticket, outcome);
        match err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        self.cache.begin_request();

        let query = ListQuery {
            page: self.cursor.current_page(),
            size: self.page_size,
            filter: self.filter.clone(),
            sort: self.sort.clone(),
        };
        debug!("fetch #{} issued: {:?}", self.issued_seq, query.query_pairs());
        FetchTicket {
            seq: self.issued_seq,
            query,
        }
    }

    /// Returns whether the response was applied.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageResponse, TransportError>,
    ) -> bool {
        if ticket.seq <= self.applied_seq {
            debug!(
                "discarding fetch #{}: #{} already applied",
                ticket.seq, self.applied_seq
            );
            self.cache.end_request();
            return false;
        }
        self.applied_seq = ticket.seq;

        match outcome {
            Ok(page) => {
                info!(
                    "fetch #{} applied: {} tasks, {} pages",
                    ticket.seq,
                    page.content.len(),
                    page.total_pages
                );
                self.fetch_error = None;
                self.loaded = true;
                self.cache.replace_all(page.content);
                self.cursor.set_total_pages(page.total_pages);
            }
            Err(e) => {
                warn!("fetch #{} failed: {}", ticket.seq, e);
                self.fetch_error = Some(e.clone());
                self.observer.notify(&PageEvent::FetchFailed(e));
            }
        }
        self.cache.end_request();
        true
    }

    /// Average completion times. Any failure hides the summary instead of
    /// reporting an error.
    pub async fn time_summary(&self) -> Option<TimeSummaryView> {
        match self.api.time_summary().await {
            Ok(summary) => Some(TimeSummaryView::from(&summary)),
            Err(e) => {
                warn!("{}", AppError::AggregationUnavailable(e));
                None
            }
        }
    }
}
