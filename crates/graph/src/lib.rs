//! `warehouse-graph`: the in-memory warehouse entity graph.
//!
//! Entities live by value in per-kind arenas inside [`EntityStore`] and refer
//! to each other by id. The [`RelationshipIndex`] keeps the item/location and
//! item/order adjacency in step with the store, [`QueryEngine`] answers the
//! six cross-referencing joins over it, and [`FrequencyAggregator`] credits
//! order volume to locations once per load.

pub mod frequency;
pub mod index;
pub mod layout;
pub mod load;
pub mod query;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use frequency::{FrequencyAggregator, FrequencyTable};
pub use index::RelationshipIndex;
pub use layout::MapBounds;
pub use load::{Dataset, LoadError, Warehouse, WarehouseHandle};
pub use query::QueryEngine;
pub use store::{Arena, EntityRef, EntityStore, Stored};
