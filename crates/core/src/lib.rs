//! `warehouse-core`: shared building blocks for the warehouse graph.
//!
//! This crate contains **pure domain** primitives (no IO): identifiers, the
//! error taxonomy, and unit normalization.

pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod units;
pub mod value_object;

pub use config::{UnitConfig, UnitTable};
pub use entity::{Entity, EntityKind};
pub use error::{Dimension, DomainError, DomainResult};
pub use id::{InventoryId, ItemId, ItemUnitId, LocationId, OrderId, OrderedItemId};
pub use units::{UnitNormalizer, parse_date};
pub use value_object::{Coordinates, Dimensions, ValueObject};
