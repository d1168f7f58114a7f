//! Static normalization configuration: unit factor tables and the date format.

use std::collections::HashMap;

/// Environment variable overriding the input date format.
pub const DATE_FORMAT_ENV: &str = "WAREHOUSE_DATE_FORMAT";

/// Date format used by the source spreadsheets (`31.12.2023`).
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Conversion factors from a unit spelling to the canonical unit.
///
/// Keys are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitTable {
    factors: HashMap<String, f64>,
}

impl UnitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, unit: &str, factor: f64) -> Self {
        self.insert(unit, factor);
        self
    }

    pub fn insert(&mut self, unit: &str, factor: f64) {
        self.factors.insert(unit.trim().to_lowercase(), factor);
    }

    /// Factor for `unit`, ignoring case and surrounding whitespace.
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.factors.get(&unit.trim().to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Canonical length table (meters).
    pub fn lengths() -> Self {
        Self::new()
            .with("m", 1.0)
            .with("meter", 1.0)
            .with("meters", 1.0)
            .with("metre", 1.0)
            .with("dm", 0.1)
            .with("decimeter", 0.1)
            .with("decimeters", 0.1)
            .with("cm", 0.01)
            .with("centimeter", 0.01)
            .with("centimeters", 0.01)
            .with("mm", 0.001)
            .with("millimeter", 0.001)
            .with("millimeters", 0.001)
    }

    /// Canonical weight table (kilograms).
    pub fn weights() -> Self {
        Self::new()
            .with("kg", 1.0)
            .with("kilogram", 1.0)
            .with("kilograms", 1.0)
            .with("g", 0.001)
            .with("gram", 0.001)
            .with("grams", 0.001)
    }
}

/// Normalization configuration supplied once per process.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConfig {
    pub length: UnitTable,
    pub weight: UnitTable,
    pub date_format: String,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            length: UnitTable::lengths(),
            weight: UnitTable::weights(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl UnitConfig {
    /// Default tables, with the date format taken from `WAREHOUSE_DATE_FORMAT`
    /// when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        match std::env::var(DATE_FORMAT_ENV) {
            Ok(fmt) if !fmt.trim().is_empty() => {
                tracing::info!(date_format = %fmt, "using date format from {DATE_FORMAT_ENV}");
                config.date_format = fmt;
            }
            _ => {
                tracing::debug!(date_format = %config.date_format, "using default date format");
            }
        }
        config
    }

    pub fn with_date_format(mut self, fmt: impl Into<String>) -> Self {
        self.date_format = fmt.into();
        self
    }

    pub fn with_length_unit(mut self, unit: &str, factor: f64) -> Self {
        self.length.insert(unit, factor);
        self
    }

    pub fn with_weight_unit(mut self, unit: &str, factor: f64) -> Self {
        self.weight.insert(unit, factor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let table = UnitTable::lengths();
        assert_eq!(table.factor("CM"), Some(0.01));
        assert_eq!(table.factor(" Meters "), Some(1.0));
        assert_eq!(table.factor("inch"), None);
    }

    #[test]
    fn extra_spellings_are_stored_lowercase() {
        let config = UnitConfig::default().with_length_unit("KM", 1000.0);
        assert_eq!(config.length.factor("km"), Some(1000.0));
    }
}
