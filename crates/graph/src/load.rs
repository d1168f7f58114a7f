//! Load pipeline: raw rows in, a fully built and aggregated graph out.
//!
//! A load builds a fresh [`EntityStore`] and only hands it back once every row
//! has been ingested and frequencies have been applied. The first failing row
//! aborts the load; the caller's previous graph is never touched.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use warehouse_core::{
    Coordinates, DomainError, DomainResult, EntityKind, LocationId, OrderId, UnitNormalizer,
};
use warehouse_inventory::{Inventory, InventoryRow, Item, ItemRow, Location, LocationRow};
use warehouse_orders::{Order, OrderRow, OrderedItem};

use crate::frequency::FrequencyAggregator;
use crate::layout::MapBounds;
use crate::query::QueryEngine;
use crate::store::EntityStore;

/// One complete input: every row of every kind, in ingestion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub locations: Vec<LocationRow>,
    #[serde(default)]
    pub items: Vec<ItemRow>,
    #[serde(default)]
    pub inventory: Vec<InventoryRow>,
    #[serde(default)]
    pub orders: Vec<OrderRow>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.items.is_empty()
            && self.inventory.is_empty()
            && self.orders.is_empty()
    }
}

/// The first row that could not be ingested.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to load {kind} row {row} ({row_id}): {source}")]
pub struct LoadError {
    pub kind: EntityKind,
    /// Zero-based position in that kind's row sequence.
    pub row: usize,
    pub row_id: String,
    #[source]
    pub source: DomainError,
}

impl LoadError {
    fn at(
        kind: EntityKind,
        row: usize,
        row_id: impl Into<String>,
    ) -> impl FnOnce(DomainError) -> Self {
        let row_id = row_id.into();
        move |source| Self {
            kind,
            row,
            row_id,
            source,
        }
    }
}

/// A loaded warehouse graph with frequencies applied.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    store: EntityStore,
    snapshot: Option<NaiveDate>,
}

impl Warehouse {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ingest `dataset` in dependency order (locations, items, inventory,
    /// orders), then run frequency aggregation once.
    pub fn load(dataset: &Dataset, units: &UnitNormalizer) -> Result<Self, LoadError> {
        let mut store = EntityStore::new();

        let result = ingest(&mut store, dataset, units);
        if let Err(err) = &result {
            tracing::warn!(
                kind = %err.kind,
                row = err.row,
                row_id = %err.row_id,
                error = %err.source,
                "load rejected"
            );
        }
        result?;

        let table = FrequencyAggregator::compute(&store);
        store.apply_frequencies(&table);

        tracing::info!(
            locations = store.count(EntityKind::Location),
            items = store.count(EntityKind::Item),
            inventory = store.count(EntityKind::Inventory),
            orders = store.count(EntityKind::Order),
            ordered_items = store.count(EntityKind::OrderedItem),
            snapshot = ?table.snapshot(),
            credited_locations = table.iter().count(),
            "warehouse loaded"
        );

        Ok(Self {
            store,
            snapshot: table.snapshot(),
        })
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn query(&self) -> QueryEngine<'_> {
        self.store.query()
    }

    /// Snapshot date the frequencies were computed for.
    pub fn snapshot_date(&self) -> Option<NaiveDate> {
        self.snapshot
    }

    /// Layout step before the graph is shared. Once it sits behind a
    /// [`WarehouseHandle`], use [`WarehouseHandle::place`].
    pub fn set_location_coordinates(
        &mut self,
        id: &LocationId,
        coordinates: Coordinates,
    ) -> DomainResult<()> {
        self.store.set_location_coordinates(id, coordinates)
    }

    pub fn bounds(&self) -> Option<MapBounds> {
        MapBounds::from_store(&self.store)
    }
}

fn ingest(
    store: &mut EntityStore,
    dataset: &Dataset,
    units: &UnitNormalizer,
) -> Result<(), LoadError> {
    for (i, row) in dataset.locations.iter().enumerate() {
        Location::from_row(row, units)
            .and_then(|location| store.insert(location))
            .map_err(LoadError::at(EntityKind::Location, i, row.id.as_str()))?;
    }
    tracing::debug!(count = dataset.locations.len(), "locations ingested");

    for (i, row) in dataset.items.iter().enumerate() {
        Item::from_row(row, units)
            .and_then(|(item, item_units)| store.insert_item(item, item_units))
            .map_err(LoadError::at(EntityKind::Item, i, row.id.as_str()))?;
    }
    tracing::debug!(count = dataset.items.len(), "items ingested");

    for (i, row) in dataset.inventory.iter().enumerate() {
        let row_id = format!("{}-{}-{}", row.date, row.location_id, row.item_id);
        Inventory::from_row(row, units)
            .and_then(|record| store.insert(record))
            .map_err(LoadError::at(EntityKind::Inventory, i, row_id))?;
    }
    tracing::debug!(count = dataset.inventory.len(), "inventory ingested");

    for (i, row) in dataset.orders.iter().enumerate() {
        let row_id = format!("{}-{}", row.id, row.item_id);
        ingest_order_row(store, row, units)
            .map_err(LoadError::at(EntityKind::Order, i, row_id))?;
    }
    tracing::debug!(count = dataset.orders.len(), "order rows ingested");

    Ok(())
}

/// The first row of an order creates it; every row adds one item line.
fn ingest_order_row(
    store: &mut EntityStore,
    row: &OrderRow,
    units: &UnitNormalizer,
) -> DomainResult<()> {
    let order_id = OrderId::parse(&row.id)?;
    if !store.contains::<Order>(&order_id) {
        store.insert(Order::from_row(row, units)?)?;
    }
    store.add_order_item(OrderedItem::from_row(row)?)
}

/// Shared access to the current warehouse, replaced wholesale on reload.
#[derive(Debug)]
pub struct WarehouseHandle {
    current: RwLock<Arc<Warehouse>>,
    units: UnitNormalizer,
}

impl WarehouseHandle {
    pub fn new(units: UnitNormalizer) -> Self {
        Self {
            current: RwLock::new(Arc::new(Warehouse::empty())),
            units,
        }
    }

    /// The graph as of the last successful load.
    pub fn current(&self) -> Arc<Warehouse> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a new graph from `dataset` and swap it in. On failure the
    /// current graph stays in place.
    pub fn reload(&self, dataset: &Dataset) -> Result<Arc<Warehouse>, LoadError> {
        let next = Arc::new(Warehouse::load(dataset, &self.units)?);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::clone(&next);
        Ok(next)
    }

    /// Layout step on the published graph: place a location on a copy of the
    /// current warehouse and swap the copy in. Readers holding the previous
    /// `Arc` keep seeing the old coordinates.
    pub fn place(
        &self,
        id: &LocationId,
        coordinates: Coordinates,
    ) -> DomainResult<Arc<Warehouse>> {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Warehouse::clone(&slot);
        next.set_location_coordinates(id, coordinates)?;
        let next = Arc::new(next);
        *slot = Arc::clone(&next);
        Ok(next)
    }
}
