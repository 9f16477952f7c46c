use std::fmt;

use jiff::civil::Date;
use thiserror::Error;

pub mod dashboard;
pub mod members;
pub mod projects;
pub mod tasks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Member,
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Project => "Project",
            EntityKind::Member => "Member",
            EntityKind::Task => "Task",
        })
    }
}

/// Failure of a store mutation. The store is left untouched whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{entity} '{id}' not found")]
    NotFound { entity: EntityKind, id: String },
}

impl StoreError {
    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation {
            field,
            reason: String::from("must not be empty"),
        });
    }
    Ok(())
}

pub(crate) fn require<T>(field: &'static str, value: Option<T>) -> Result<T, StoreError> {
    value.ok_or(StoreError::Validation {
        field,
        reason: String::from("is required"),
    })
}

/// Parses a `YYYY-MM-DD` calendar date, rejecting blanks and impossible days.
pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<Date, StoreError> {
    require_text(field, value)?;
    value
        .trim()
        .parse::<Date>()
        .map_err(|e| StoreError::Validation {
            field,
            reason: format!("'{}' is not a valid date ({})", value, e),
        })
}
