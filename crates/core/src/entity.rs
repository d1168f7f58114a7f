//! Entity trait: identity + continuity across state changes.

use serde::{Deserialize, Serialize};

/// The six entity kinds held by the warehouse graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Location,
    Item,
    ItemUnit,
    Inventory,
    Order,
    OrderedItem,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Location,
        EntityKind::Item,
        EntityKind::ItemUnit,
        EntityKind::Inventory,
        EntityKind::Order,
        EntityKind::OrderedItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Location => "location",
            EntityKind::Item => "item",
            EntityKind::ItemUnit => "item_unit",
            EntityKind::Inventory => "inventory",
            EntityKind::Order => "order",
            EntityKind::OrderedItem => "ordered_item",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Kind tag used in errors and store-wide operations.
    const KIND: EntityKind;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
