use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)H").expect("valid hours pattern"));
static MINUTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)M").expect("valid minutes pattern"));

/// Response of `GET /todos/time`: average completion durations as
/// ISO-8601-like strings (`PT2H15M`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSummary {
    #[serde(rename = "AvgTotalTime", alias = "avgTotalTime", default)]
    pub avg_total_time: Option<String>,
    #[serde(rename = "avgTimeLowPriority", default)]
    pub avg_time_low_priority: Option<String>,
    #[serde(rename = "avgTimeMediumPriority", default)]
    pub avg_time_medium_priority: Option<String>,
    #[serde(rename = "avgTimeHighPriority", default)]
    pub avg_time_high_priority: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTime {
    pub hours: u64,
    pub minutes: u64,
}

impl ElapsedTime {
    /// Missing components, a missing `PT` prefix, or no input at all read as zero.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(body) = raw.and_then(|s| s.strip_prefix("PT")) else {
            return Self::default();
        };

        let component = |re: &Regex| {
            re.captures(body)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };

        Self {
            hours: component(&HOURS),
            minutes: component(&MINUTES),
        }
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} mins", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSummaryView {
    pub total: ElapsedTime,
    pub low: ElapsedTime,
    pub medium: ElapsedTime,
    pub high: ElapsedTime,
}

impl From<&TimeSummary> for TimeSummaryView {
    fn from(summary: &TimeSummary) -> Self {
        Self {
            total: ElapsedTime::parse(summary.avg_total_time.as_deref()),
            low: ElapsedTime::parse(summary.avg_time_low_priority.as_deref()),
            medium: ElapsedTime::parse(summary.avg_time_medium_priority.as_deref()),
            high: ElapsedTime::parse(summary.avg_time_high_priority.as_deref()),
        }
    }
}
