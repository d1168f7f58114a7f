use serde::Serialize;

use warehouse_core::Coordinates;
use warehouse_inventory::Location;

use crate::store::EntityStore;

/// Extent of the placed locations on the map.
///
/// The maximum on each axis includes the far edge of the location placed
/// there: width along x, length along y, height along z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub min: Coordinates,
    pub max: Coordinates,
}

impl MapBounds {
    /// `None` when no location has coordinates yet.
    pub fn from_store(store: &EntityStore) -> Option<Self> {
        let mut placed = store
            .all::<Location>()
            .filter_map(|l| l.coordinates().map(|c| (c, l.dimensions())));

        let (first, dims) = placed.next()?;
        let mut bounds = Self {
            min: first,
            max: Coordinates::new(
                first.x + dims.width,
                first.y + dims.length,
                first.z + dims.height,
            ),
        };
        for (c, dims) in placed {
            bounds.min.x = bounds.min.x.min(c.x);
            bounds.min.y = bounds.min.y.min(c.y);
            bounds.min.z = bounds.min.z.min(c.z);
            bounds.max.x = bounds.max.x.max(c.x + dims.width);
            bounds.max.y = bounds.max.y.max(c.y + dims.length);
            bounds.max.z = bounds.max.z.max(c.z + dims.height);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn depth(&self) -> f64 {
        self.max.y - self.min.y
    }
}
