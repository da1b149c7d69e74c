pub mod time;
pub mod todo;

pub use time::{ElapsedTime, TimeSummary, TimeSummaryView};
pub use todo::{Priority, Task, TaskDraft, TaskPayload, UnknownPriority, Urgency};
