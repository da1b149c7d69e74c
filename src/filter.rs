use crate::models::{Priority, UnknownPriority};

/// The toolbar narrows to one criterion at a time; picking one discards the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterInput {
    #[default]
    None,
    Text(String),
    Priority(Priority),
    State(bool),
}

/// Criteria sent with a list query. Every field is optional and an empty
/// specification means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpecification {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub state: Option<bool>,
}

pub fn build_filter(
    text: Option<&str>,
    priority: Option<Priority>,
    state: Option<bool>,
) -> FilterSpecification {
    let text = text
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    FilterSpecification {
        text,
        priority,
        state,
    }
}

impl FilterSpecification {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.priority.is_none() && self.state.is_none()
    }

    /// Query-string pairs; unset criteria are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(text) = &self.text {
            pairs.push(("text", text.clone()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.to_string()));
        }
        if let Some(state) = self.state {
            pairs.push(("state", state.to_string()));
        }
        pairs
    }
}

impl From<&FilterInput> for FilterSpecification {
    fn from(input: &FilterInput) -> Self {
        match input {
            FilterInput::None => FilterSpecification::default(),
            FilterInput::Text(text) => build_filter(Some(text), None, None),
            FilterInput::Priority(p) => build_filter(None, Some(*p), None),
            FilterInput::State(s) => build_filter(None, None, Some(*s)),
        }
    }
}

/// Editing state behind the filter toolbar.
#[derive(Debug, Clone, Default)]
pub struct FilterToolbar {
    input: FilterInput,
}

impl FilterToolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &FilterInput {
        &self.input
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = FilterInput::Text(text.into());
    }

    /// `None` is the select's empty option.
    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.input = priority.map_or(FilterInput::None, FilterInput::Priority);
    }

    /// Takes the raw value of the priority select: `""` (None), `LOW`,
    /// `MEDIUM` or `HIGH`. An unknown value leaves the input untouched.
    pub fn select_priority(&mut self, value: &str) -> Result<(), UnknownPriority> {
        let priority = match value.trim() {
            "" => None,
            other => Some(other.parse::<Priority>()?),
        };
        self.set_priority(priority);
        Ok(())
    }

    pub fn set_state(&mut self, done: Option<bool>) {
        self.input = done.map_or(FilterInput::None, FilterInput::State);
    }

    pub fn submit(&self) -> FilterSpecification {
        FilterSpecification::from(&self.input)
    }

    pub fn reset(&mut self) -> FilterSpecification {
        self.input = FilterInput::None;
        FilterSpecification::default()
    }
}
