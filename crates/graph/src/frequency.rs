//! Location visit frequency from order lines and the latest inventory snapshot.
//!
//! The computation is split from its application: [`FrequencyAggregator::compute`]
//! is a pure reduction over the store, and the resulting table is written to
//! the locations in one step by the loader. No partial credit is ever visible.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use warehouse_core::{ItemId, LocationId};
use warehouse_inventory::Inventory;
use warehouse_orders::{Order, OrderedItem};

use crate::store::EntityStore;

/// Frequency credit per location for one snapshot date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    snapshot: Option<NaiveDate>,
    credits: HashMap<LocationId, u64>,
}

impl FrequencyTable {
    /// Date the table was computed for; `None` when there was no inventory.
    pub fn snapshot(&self) -> Option<NaiveDate> {
        self.snapshot
    }

    /// Credit for one location; locations never credited read as zero.
    pub fn get(&self, location: &LocationId) -> u64 {
        self.credits.get(location).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, u64)> {
        self.credits.iter().map(|(id, credit)| (id, *credit))
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.credits
            .values()
            .fold(0u64, |acc, credit| acc.saturating_add(*credit))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyAggregator;

impl FrequencyAggregator {
    /// Most recent inventory date, by calendar value.
    pub fn latest_snapshot(store: &EntityStore) -> Option<NaiveDate> {
        store.latest_snapshot()
    }

    /// Which locations hold each item on `date`.
    pub fn item_locations(
        store: &EntityStore,
        date: NaiveDate,
    ) -> HashMap<ItemId, HashSet<LocationId>> {
        let mut map: HashMap<ItemId, HashSet<LocationId>> = HashMap::new();
        for record in store.all::<Inventory>().filter(|r| r.date() == date) {
            map.entry(record.item().clone())
                .or_default()
                .insert(record.location().clone());
        }
        map
    }

    /// Credit every order line's total quantity to each location holding
    /// its item on the latest snapshot date.
    ///
    /// An item with no inventory on that date credits nothing. A store with
    /// no inventory yields an empty table.
    pub fn compute(store: &EntityStore) -> FrequencyTable {
        let Some(snapshot) = Self::latest_snapshot(store) else {
            tracing::debug!("no inventory snapshot, skipping frequency aggregation");
            return FrequencyTable::default();
        };

        let presence = Self::item_locations(store, snapshot);
        let mut credits: HashMap<LocationId, u64> = HashMap::new();
        for order in store.all::<Order>() {
            for line_id in order.ordered_items() {
                let Some(line) = store.get::<OrderedItem>(line_id) else {
                    continue;
                };
                let Some(locations) = presence.get(line.item()) else {
                    continue;
                };
                for location in locations {
                    let credit = credits.entry(location.clone()).or_insert(0);
                    *credit = credit.saturating_add(line.total_qty());
                }
            }
        }

        tracing::debug!(
            %snapshot,
            items_present = presence.len(),
            locations_credited = credits.len(),
            "computed location frequencies"
        );
        FrequencyTable {
            snapshot: Some(snapshot),
            credits,
        }
    }
}

impl EntityStore {
    /// Write a computed table onto the locations. This is the only place
    /// `Location::freq` changes.
    pub(crate) fn apply_frequencies(&mut self, table: &FrequencyTable) {
        for (id, credit) in table.iter() {
            if let Some(location) = self.location_mut(id) {
                location.credit_frequency(credit);
            }
        }
    }
}
