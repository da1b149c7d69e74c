use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority: {0}")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

/// A todo record as the service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub text: String,
    #[serde(default, with = "wire_date")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(default)]
    pub state: bool,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub done_date: Option<String>,
    #[serde(default)]
    pub time_frame: Option<String>,
}

/// How close a task is to its due date, used to colour table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Due within a week, or already overdue.
    Urgent,
    /// Due within two weeks.
    Soon,
    Later,
}

impl Task {
    pub fn urgency(&self, today: NaiveDate) -> Option<Urgency> {
        let due = self.due_date?;
        let days = (due - today).num_days();
        Some(if days <= 7 {
            Urgency::Urgent
        } else if days <= 14 {
            Urgency::Soon
        } else {
            Urgency::Later
        })
    }

    pub fn due_date_label(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Contents of the create/edit form before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub text: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub state: bool,
    pub creation_date: Option<String>,
    pub done_date: Option<String>,
    pub time_frame: Option<String>,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>, priority: Option<Priority>) -> Self {
        Self {
            text: text.into(),
            priority,
            ..Default::default()
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Pre-fills an edit form. Server-assigned fields are carried so a full
    /// update does not blank them.
    pub fn from_task(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            due_date: task.due_date,
            priority: Some(task.priority),
            state: task.state,
            creation_date: task.creation_date.clone(),
            done_date: task.done_date.clone(),
            time_frame: task.time_frame.clone(),
        }
    }

    pub fn validate(&self) -> Result<TaskPayload, ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let priority = self.priority.ok_or(ValidationError::MissingPriority)?;

        Ok(TaskPayload {
            id: None,
            text: self.text.clone(),
            due_date: self.due_date,
            priority,
            state: self.state,
            creation_date: self.creation_date.clone(),
            done_date: self.done_date.clone(),
            time_frame: self.time_frame.clone(),
        })
    }
}

/// Request body for `POST /todos` and `PUT /todos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    #[serde(default, with = "wire_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(default)]
    pub state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<String>,
}

/// Due dates are date-only; the service stores a timestamp fixed at midnight.
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&format!("{}T00:00:00", d.format("%Y-%m-%d"))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let date_part = s.split('T').next().unwrap_or(s);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}
