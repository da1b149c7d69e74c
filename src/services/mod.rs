pub mod list_cache;
pub mod orchestrator;
pub mod pagination;

pub use list_cache::ListCache;
pub use orchestrator::{FetchTicket, PageStatus, TodoPage};
pub use pagination::PaginationCursor;
