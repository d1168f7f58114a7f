//! Domain error model.

use thiserror::Error;

use crate::entity::EntityKind;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Measurement dimension a unit belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dimension {
    Length,
    Weight,
}

impl core::fmt::Display for Dimension {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Dimension::Length => f.write_str("length"),
            Dimension::Weight => f.write_str("weight"),
        }
    }
}

/// Domain-level error.
///
/// Every variant is deterministic: the same rows always produce the same error.
/// Ingestion errors abort the current load; they never leave a partially built
/// graph behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A measurement unit is not in the configured factor table.
    #[error("invalid {dimension} unit: {unit:?}")]
    InvalidUnit { unit: String, dimension: Dimension },

    /// A non-empty date string did not match the configured format.
    #[error("invalid date {value:?} (expected format {format:?})")]
    InvalidDate { value: String, format: String },

    /// An entity references an id that is not present in the store.
    #[error("{referenced_by} references missing {kind} {id}")]
    DanglingReference {
        kind: EntityKind,
        id: String,
        referenced_by: String,
    },

    /// An entity with the same identity is already stored.
    #[error("duplicate {kind} key: {id}")]
    DuplicateKey { kind: EntityKind, id: String },

    /// A mutation targeted an entity that does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// A row value failed validation (e.g. empty id, unknown direction).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_unit(unit: impl Into<String>, dimension: Dimension) -> Self {
        Self::InvalidUnit {
            unit: unit.into(),
            dimension,
        }
    }

    pub fn invalid_date(value: impl Into<String>, format: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            format: format.into(),
        }
    }

    pub fn dangling(
        kind: EntityKind,
        id: impl ToString,
        referenced_by: impl ToString,
    ) -> Self {
        Self::DanglingReference {
            kind,
            id: id.to_string(),
            referenced_by: referenced_by.to_string(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        Self::DuplicateKey {
            kind,
            id: id.to_string(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_reference_message_names_both_sides() {
        let err = DomainError::dangling(EntityKind::Location, "L1", "inventory 2023-01-01-L1-I1");
        assert_eq!(
            err.to_string(),
            "inventory 2023-01-01-L1-I1 references missing location L1"
        );
    }

    #[test]
    fn unit_and_date_messages_name_the_offending_value() {
        assert_eq!(
            DomainError::invalid_unit("inch", Dimension::Length).to_string(),
            "invalid length unit: \"inch\""
        );
        assert_eq!(
            DomainError::invalid_date("2023-13-01", "%d.%m.%Y").to_string(),
            "invalid date \"2023-13-01\" (expected format \"%d.%m.%Y\")"
        );
    }
}
