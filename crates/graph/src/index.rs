//! Derived adjacency sets for multi-hop joins.
//!
//! The index only ever holds pairs implied by stored Inventory and
//! OrderedItem records. It is updated on insert and rebuilt after bulk
//! removal, so it matches the store after every mutation.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use warehouse_core::{ItemId, LocationId, OrderId};
use warehouse_inventory::Inventory;
use warehouse_orders::OrderedItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipIndex {
    item_locations: HashMap<ItemId, HashSet<LocationId>>,
    location_items: HashMap<LocationId, HashSet<ItemId>>,
    item_orders: HashMap<ItemId, HashSet<OrderId>>,
    order_items: HashMap<OrderId, HashSet<ItemId>>,
}

impl RelationshipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from scratch.
    pub fn rebuild<'a>(
        inventory: impl IntoIterator<Item = &'a Inventory>,
        lines: impl IntoIterator<Item = &'a OrderedItem>,
    ) -> Self {
        let mut index = Self::new();
        for record in inventory {
            index.link_inventory(record);
        }
        for line in lines {
            index.link_ordered_item(line);
        }
        index
    }

    /// Record that the item is (or was) stocked at the location.
    pub fn link_inventory(&mut self, record: &Inventory) {
        link(
            &mut self.item_locations,
            &mut self.location_items,
            record.item(),
            record.location(),
        );
    }

    /// Record that the order contains the item.
    pub fn link_ordered_item(&mut self, line: &OrderedItem) {
        link(
            &mut self.item_orders,
            &mut self.order_items,
            line.item(),
            line.order(),
        );
    }

    pub fn locations_of_item<'a>(
        &'a self,
        item: &ItemId,
    ) -> impl Iterator<Item = &'a LocationId> + use<'a> {
        self.item_locations.get(item).into_iter().flatten()
    }

    pub fn items_at_location<'a>(
        &'a self,
        location: &LocationId,
    ) -> impl Iterator<Item = &'a ItemId> + use<'a> {
        self.location_items.get(location).into_iter().flatten()
    }

    pub fn orders_of_item<'a>(
        &'a self,
        item: &ItemId,
    ) -> impl Iterator<Item = &'a OrderId> + use<'a> {
        self.item_orders.get(item).into_iter().flatten()
    }

    pub fn items_of_order<'a>(
        &'a self,
        order: &OrderId,
    ) -> impl Iterator<Item = &'a ItemId> + use<'a> {
        self.order_items.get(order).into_iter().flatten()
    }

    /// Number of distinct (item, location) pairs.
    pub fn stock_links(&self) -> usize {
        self.item_locations.values().map(HashSet::len).sum()
    }

    /// Number of distinct (item, order) pairs.
    pub fn order_links(&self) -> usize {
        self.item_orders.values().map(HashSet::len).sum()
    }
}

fn link<A, B>(
    forward: &mut HashMap<A, HashSet<B>>,
    backward: &mut HashMap<B, HashSet<A>>,
    a: &A,
    b: &B,
) where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
{
    forward.entry(a.clone()).or_default().insert(b.clone());
    backward.entry(b.clone()).or_default().insert(a.clone());
}
