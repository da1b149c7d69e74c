use serde::{Deserialize, Serialize};

use crate::filter::FilterSpecification;
use crate::models::Task;
use crate::sort::SortDirective;

/// One page of `GET /todos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<Task>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Path segment of `PATCH /todos/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    Done,
    Undone,
}

impl StateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateAction::Done => "done",
            StateAction::Undone => "undone",
        }
    }
}

impl From<bool> for StateAction {
    fn from(done: bool) -> Self {
        if done { StateAction::Done } else { StateAction::Undone }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub filter: FilterSpecification,
    pub sort: SortDirective,
}

impl ListQuery {
    /// Unset filters and an empty sort are omitted rather than sent as `key=`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        pairs.extend(self.filter.query_pairs());
        if !self.sort.is_empty() {
            pairs.push(("sort", self.sort.to_string()));
        }
        pairs
    }
}
