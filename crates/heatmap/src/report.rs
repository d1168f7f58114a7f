use serde::Serialize;

use warehouse_core::{Coordinates, LocationId};
use warehouse_graph::EntityStore;
use warehouse_inventory::Location;

use crate::palette::color_for;

/// Smallest and largest `freq` over all locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyRange {
    pub min: u64,
    pub max: u64,
}

impl FrequencyRange {
    /// `None` when the store holds no locations.
    pub fn from_store(store: &EntityStore) -> Option<Self> {
        let mut freqs = store.all::<Location>().map(Location::freq);
        let first = freqs.next()?;
        Some(freqs.fold(Self { min: first, max: first }, |range, f| Self {
            min: range.min.min(f),
            max: range.max.max(f),
        }))
    }

    /// Min-max normalize `freq` into `[0, 1]`. A degenerate range maps
    /// everything to `0.0`.
    pub fn normalize(&self, freq: u64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let span = (self.max - self.min) as f64;
        (freq.clamp(self.min, self.max) - self.min) as f64 / span
    }
}

/// One location's entry in the heat map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationHeat {
    pub id: LocationId,
    pub freq: u64,
    pub intensity: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatMap {
    pub range: Option<FrequencyRange>,
    pub locations: Vec<LocationHeat>,
}

impl HeatMap {
    /// Heat entry for every location, sorted by id.
    pub fn from_store(store: &EntityStore) -> Self {
        let range = FrequencyRange::from_store(store);
        let mut locations: Vec<LocationHeat> = store
            .all::<Location>()
            .map(|location| {
                let intensity = range.map_or(0.0, |r| r.normalize(location.freq()));
                LocationHeat {
                    id: location.id_typed().clone(),
                    freq: location.freq(),
                    intensity,
                    color: color_for(intensity),
                    coordinates: location.coordinates(),
                }
            })
            .collect();
        locations.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(locations = locations.len(), ?range, "built heat map");
        Self { range, locations }
    }

    pub fn get(&self, id: &LocationId) -> Option<&LocationHeat> {
        self.locations
            .binary_search_by(|heat| heat.id.cmp(id))
            .ok()
            .map(|i| &self.locations[i])
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
