use std::env;

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub page_size: u32,
    /// Revert an optimistic checkbox toggle when the patch request fails.
    pub rollback_failed_toggles: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            rollback_failed_toggles: false,
        }
    }
}

impl ClientConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let page_size = env::var("TODO_PAGE_SIZE").ok();
        let rollback = env::var("TODO_ROLLBACK_TOGGLES").ok();

        Self::from_values(&base_url, page_size.as_deref(), rollback.as_deref())
    }

    fn from_values(
        base_url: &str,
        page_size: Option<&str>,
        rollback: Option<&str>,
    ) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("TODO_API_URL is not a valid url: {}", e)))?;

        let page_size = match page_size {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("TODO_PAGE_SIZE must be a positive integer, got {:?}", raw))
                })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let rollback_failed_toggles = match rollback.map(|s| s.trim().to_ascii_lowercase()) {
            None => false,
            Some(v) if v == "true" || v == "1" => true,
            Some(v) if v == "false" || v == "0" || v.is_empty() => false,
            Some(v) => {
                return Err(AppError::Config(format!(
                    "TODO_ROLLBACK_TOGGLES must be true or false, got {:?}",
                    v
                )));
            }
        };

        Ok(Self {
            base_url,
            page_size,
            rollback_failed_toggles,
        })
    }
}
