//! Test builders shared by the unit tests of this crate.

use warehouse_core::UnitNormalizer;
use warehouse_inventory::{
    Inventory, InventoryRow, Item, ItemRow, ItemUnit, ItemUnitRow, Location, LocationRow,
};
use warehouse_orders::{Order, OrderRow, OrderedItem};

use crate::store::EntityStore;

pub(crate) fn units() -> UnitNormalizer {
    UnitNormalizer::default()
}

pub(crate) fn location_row(id: &str) -> LocationRow {
    LocationRow {
        id: id.to_string(),
        ltype: "rack".to_string(),
        lclass: "A".to_string(),
        lsubclass: "A1".to_string(),
        length: 1.0,
        width: 1.0,
        height: 2.0,
        dim_uom: Some("m".to_string()),
        max_weight: None,
        weight_uom: None,
        zone: None,
        x: None,
        y: None,
        z: None,
    }
}

pub(crate) fn item_row(id: &str) -> ItemRow {
    ItemRow {
        id: id.to_string(),
        description: format!("item {id}"),
        gtype: "STD".to_string(),
        zone: None,
        base_level: 1,
        units: vec![ItemUnitRow {
            level: 1,
            conversion_qty: 1,
            qty_uom: "PCE".to_string(),
            length: 10.0,
            width: 10.0,
            height: 10.0,
            dim_uom: Some("cm".to_string()),
            weight: 1.0,
            weight_uom: Some("kg".to_string()),
        }],
    }
}

pub(crate) fn inventory_row(date: &str, location: &str, item: &str) -> InventoryRow {
    InventoryRow {
        date: date.to_string(),
        location_id: location.to_string(),
        ltype: "rack".to_string(),
        item_id: item.to_string(),
        expiry_date: None,
        available_qty: 1,
        onhand_qty: 1,
        transit_qty: 0,
        allocated_qty: 0,
        suspense_qty: 0,
    }
}

pub(crate) fn order_row(order: &str, item: &str, total_qty: u64) -> OrderRow {
    OrderRow {
        id: order.to_string(),
        direction: "outbound".to_string(),
        country: "CZ".to_string(),
        delivery_date: None,
        s_ship_date: None,
        a_ship_date: None,
        line_num: 1,
        item_id: item.to_string(),
        requested_qty: total_qty,
        total_qty,
        qty_uom: "PCE".to_string(),
    }
}

pub(crate) fn location(id: &str) -> Location {
    Location::from_row(&location_row(id), &units()).unwrap()
}

pub(crate) fn item(id: &str) -> (Item, Vec<ItemUnit>) {
    Item::from_row(&item_row(id), &units()).unwrap()
}

pub(crate) fn inventory(date: &str, location: &str, item: &str) -> Inventory {
    Inventory::from_row(&inventory_row(date, location, item), &units()).unwrap()
}

pub(crate) fn order(id: &str) -> Order {
    Order::from_row(&order_row(id, "unused", 0), &units()).unwrap()
}

pub(crate) fn line(order: &str, item: &str, total_qty: u64) -> OrderedItem {
    OrderedItem::from_row(&order_row(order, item, total_qty)).unwrap()
}

/// Store with the given locations and items and nothing else.
pub(crate) fn store_with(locations: &[&str], items: &[&str]) -> EntityStore {
    let mut store = EntityStore::new();
    for id in locations {
        store.insert(location(id)).unwrap();
    }
    for id in items {
        let (item, units) = item(id);
        store.insert_item(item, units).unwrap();
    }
    store
}

/// Add an order with one line per `(item, total_qty)`.
pub(crate) fn add_order(store: &mut EntityStore, id: &str, lines: &[(&str, u64)]) {
    store.insert(order(id)).unwrap();
    for (item, qty) in lines {
        store.add_order_item(line(id, item, *qty)).unwrap();
    }
}
