use serde::{Deserialize, Serialize};

use warehouse_core::{
    Coordinates, Dimensions, DomainError, DomainResult, Entity, EntityKind, LocationId,
    UnitNormalizer,
};

/// Raw location row, as extracted from the source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub id: String,
    pub ltype: String,
    pub lclass: String,
    pub lsubclass: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub dim_uom: Option<String>,
    #[serde(default)]
    pub max_weight: Option<f64>,
    #[serde(default)]
    pub weight_uom: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
}

/// A storage location (rack slot, floor area, dock, ...).
///
/// Everything except `freq` and the coordinates is fixed at construction.
/// `freq` is credited by the frequency aggregation pass only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    id: LocationId,
    ltype: String,
    lclass: String,
    lsubclass: String,
    dimensions: Dimensions,
    max_weight: Option<f64>,
    zone: Option<String>,
    coordinates: Option<Coordinates>,
    freq: u64,
}

impl Location {
    /// Build a location from a raw row, normalizing dimensions to meters and
    /// the weight limit to kilograms.
    pub fn from_row(row: &LocationRow, units: &UnitNormalizer) -> DomainResult<Self> {
        let id = LocationId::parse(&row.id)?;
        let dim_uom = row.dim_uom.as_deref();
        let dimensions = Dimensions::new(
            units.normalize_length(row.length, dim_uom)?,
            units.normalize_length(row.width, dim_uom)?,
            units.normalize_length(row.height, dim_uom)?,
        );
        let max_weight = row
            .max_weight
            .map(|w| units.normalize_weight(w, row.weight_uom.as_deref()))
            .transpose()?;

        let coordinates = match (row.x, row.y, row.z) {
            (Some(x), Some(y), Some(z)) => Some(Coordinates::new(x, y, z)),
            (None, None, None) => None,
            _ => {
                return Err(DomainError::validation(format!(
                    "location {id}: x, y and z must be given together"
                )));
            }
        };

        Ok(Self {
            id,
            ltype: normalize_type(&row.ltype),
            lclass: row.lclass.trim().to_string(),
            lsubclass: row.lsubclass.trim().to_string(),
            dimensions,
            max_weight,
            zone: row
                .zone
                .as_deref()
                .map(str::trim)
                .filter(|z| !z.is_empty())
                .map(str::to_string),
            coordinates,
            freq: 0,
        })
    }

    pub fn id_typed(&self) -> &LocationId {
        &self.id
    }

    /// Normalized location type (`rack`, `floor`, ...).
    pub fn ltype(&self) -> &str {
        &self.ltype
    }

    pub fn lclass(&self) -> &str {
        &self.lclass
    }

    pub fn lsubclass(&self) -> &str {
        &self.lsubclass
    }

    /// Dimensions in meters.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Weight limit in kilograms.
    pub fn max_weight(&self) -> Option<f64> {
        self.max_weight
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }

    pub fn is_rack(&self) -> bool {
        self.ltype == "rack"
    }

    /// Place the location on the map (layout step, after construction).
    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    /// Add order quantity to the visit frequency. Never decreases `freq`.
    pub fn credit_frequency(&mut self, amount: u64) {
        self.freq = self.freq.saturating_add(amount);
    }
}

impl Entity for Location {
    type Id = LocationId;
    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Location type labels differ in case and padding between exports.
pub fn normalize_type(raw: &str) -> String {
    raw.trim().to_lowercase()
}
