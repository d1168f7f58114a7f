//! Warehouse inventory entities: locations, items with their packaging units,
//! and inventory balances.
//!
//! Entities are built from raw rows through the unit normalizer, so every
//! stored dimension is in meters, every weight in kilograms and every date a
//! calendar date. Cross-entity references are ids; resolving them is the
//! store's job.

pub mod item;
pub mod location;
pub mod stock;

pub use item::{Item, ItemRow, ItemUnit, ItemUnitRow};
pub use location::{Location, LocationRow};
pub use stock::{Inventory, InventoryRow, StockQuantities};
