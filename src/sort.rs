//! Multi-column sort directive.
//!
//! On the wire a directive is a comma-joined token list: a bare column name
//! sorts ascending, `column,desc` sorts descending, e.g. `priority,desc,dueDate`.
//! A column appears at most once. Clicking a column header cycles that column
//! through unsorted -> ascending -> descending -> unsorted without touching
//! any other column's token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SortColumn {
    Priority,
    DueDate,
}

impl SortColumn {
    pub const ALL: [SortColumn; 2] = [SortColumn::Priority, SortColumn::DueDate];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Priority => "priority",
            SortColumn::DueDate => "dueDate",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        SortColumn::ALL.into_iter().find(|c| c.as_str() == token)
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SortKey {
    column: SortColumn,
    direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortParseError {
    #[error("unknown sort token: {0:?}")]
    UnknownToken(String),

    #[error("column {0} appears more than once")]
    DuplicateColumn(SortColumn),
}

/// Keys are held in column order (`priority` before `dueDate`), so cycling a
/// column three times always restores the directive it started from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortDirective {
    keys: Vec<SortKey>,
}

impl SortDirective {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn direction(&self, column: SortColumn) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    pub fn has_ascending(&self, column: SortColumn) -> bool {
        self.direction(column) == Some(SortDirection::Ascending)
    }

    pub fn has_descending(&self, column: SortColumn) -> bool {
        self.direction(column) == Some(SortDirection::Descending)
    }

    /// Advances `column` one step through its tri-state cycle.
    pub fn cycle(&self, column: SortColumn) -> SortDirective {
        let mut next = self.clone();
        next.toggle(column);
        next
    }

    pub fn toggle(&mut self, column: SortColumn) {
        match self.keys.iter().position(|k| k.column == column) {
            None => {
                let at = self
                    .keys
                    .iter()
                    .position(|k| k.column > column)
                    .unwrap_or(self.keys.len());
                self.keys.insert(
                    at,
                    SortKey {
                        column,
                        direction: SortDirection::Ascending,
                    },
                );
            }
            Some(i) => match self.keys[i].direction {
                SortDirection::Ascending => self.keys[i].direction = SortDirection::Descending,
                SortDirection::Descending => {
                    self.keys.remove(i);
                }
            },
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(key.column.as_str())?;
            if key.direction == SortDirection::Descending {
                f.write_str(",desc")?;
            }
        }
        Ok(())
    }
}

impl FromStr for SortDirective {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }

        let mut keys: Vec<SortKey> = Vec::new();
        let mut tokens = s.split(',').map(str::trim).peekable();

        while let Some(token) = tokens.next() {
            let column = SortColumn::from_token(token)
                .ok_or_else(|| SortParseError::UnknownToken(token.to_string()))?;
            if keys.iter().any(|k| k.column == column) {
                return Err(SortParseError::DuplicateColumn(column));
            }

            let direction = match tokens.peek() {
                Some(&"desc") => {
                    tokens.next();
                    SortDirection::Descending
                }
                Some(&"asc") => {
                    tokens.next();
                    SortDirection::Ascending
                }
                _ => SortDirection::Ascending,
            };
            keys.push(SortKey { column, direction });
        }

        keys.sort_by_key(|k| k.column);
        Ok(Self { keys })
    }
}

impl Serialize for SortDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SortDirective {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
