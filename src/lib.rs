pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod services;
pub mod sort;
pub mod state;

pub use client::{NoopTodoApi, TodoApi, TodoHttpClient};
pub use config::ClientConfig;
pub use error::{AppError, TransportError, ValidationError};
pub use services::{ListCache, PageStatus, PaginationCursor, TodoPage};
