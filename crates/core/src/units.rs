//! Unit normalization: every stored measurement is in meters / kilograms and
//! every stored date is a parsed calendar date.

use chrono::NaiveDate;

use crate::config::UnitConfig;
use crate::error::{Dimension, DomainError, DomainResult};

/// Converts raw row values into canonical units at entity-construction time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitNormalizer {
    config: UnitConfig,
}

impl UnitNormalizer {
    pub fn new(config: UnitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    /// Convert a length into meters.
    ///
    /// With no unit (or an empty one) the value is assumed canonical already.
    pub fn normalize_length(&self, value: f64, unit: Option<&str>) -> DomainResult<f64> {
        self.normalize(value, unit, Dimension::Length)
    }

    /// Convert a weight into kilograms.
    pub fn normalize_weight(&self, value: f64, unit: Option<&str>) -> DomainResult<f64> {
        self.normalize(value, unit, Dimension::Weight)
    }

    /// Parse a date with the configured format.
    pub fn parse_date(&self, text: Option<&str>) -> DomainResult<Option<NaiveDate>> {
        parse_date(text, &self.config.date_format)
    }

    /// Parse a date that must be present.
    pub fn parse_required_date(&self, text: &str) -> DomainResult<NaiveDate> {
        self.parse_date(Some(text))?
            .ok_or_else(|| DomainError::invalid_date(text, &self.config.date_format))
    }

    fn normalize(&self, value: f64, unit: Option<&str>, dimension: Dimension) -> DomainResult<f64> {
        let unit = match unit.map(str::trim) {
            Some(u) if !u.is_empty() => u,
            _ => return Ok(value),
        };
        let table = match dimension {
            Dimension::Length => &self.config.length,
            Dimension::Weight => &self.config.weight,
        };
        table
            .factor(unit)
            .map(|factor| value * factor)
            .ok_or_else(|| DomainError::invalid_unit(unit, dimension))
    }
}

/// Parse `text` with a `chrono` format string.
///
/// Absent or blank input yields `Ok(None)`; anything else must match `format`.
pub fn parse_date(text: Option<&str>, format: &str) -> DomainResult<Option<NaiveDate>> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(None),
    };
    NaiveDate::parse_from_str(text, format)
        .map(Some)
        .map_err(|_| DomainError::invalid_date(text, format))
}
