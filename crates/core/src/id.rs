//! Strongly-typed identifiers used across the domain.
//!
//! Source rows identify locations, items and orders by opaque strings. The
//! remaining kinds are identified by the ids they are composed of; their
//! `Display` output is the flat string form (`item_id-level`,
//! `date-location_id-item_id`, `order_id-item_id`).

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a storage location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

/// Identifier of an item (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap an already-validated identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse a raw row value: surrounding whitespace is dropped and an
            /// empty identifier is rejected.
            pub fn parse(raw: &str) -> DomainResult<Self> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl_string_newtype!(LocationId, "LocationId");
impl_string_newtype!(ItemId, "ItemId");
impl_string_newtype!(OrderId, "OrderId");

/// Identifier of one packaging level of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemUnitId {
    item: ItemId,
    level: u32,
}

impl ItemUnitId {
    pub fn new(item: ItemId, level: u32) -> Self {
        Self { item, level }
    }

    /// The item owning this unit.
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl core::fmt::Display for ItemUnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.item, self.level)
    }
}

/// Identifier of an inventory record: one per (date, location, item).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InventoryId {
    date: NaiveDate,
    location: LocationId,
    item: ItemId,
}

impl InventoryId {
    pub fn new(date: NaiveDate, location: LocationId, item: ItemId) -> Self {
        Self {
            date,
            location,
            item,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }
}

impl core::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.date.format("%Y-%m-%d"),
            self.location,
            self.item
        )
    }
}

/// Identifier of an item line inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderedItemId {
    order: OrderId,
    item: ItemId,
}

impl OrderedItemId {
    pub fn new(order: OrderId, item: ItemId) -> Self {
        Self { order, item }
    }

    /// The order owning this line.
    pub fn order(&self) -> &OrderId {
        &self.order
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }
}

impl core::fmt::Display for OrderedItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.order, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_empty() {
        assert_eq!(LocationId::parse("  A-01 ").unwrap().as_str(), "A-01");
        assert!(matches!(
            ItemId::parse("   "),
            Err(DomainError::Validation(msg)) if msg.contains("ItemId")
        ));
    }

    #[test]
    fn composite_ids_render_flat_form() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let inv = InventoryId::new(date, LocationId::from("L1"), ItemId::from("I1"));
        assert_eq!(inv.to_string(), "2023-01-01-L1-I1");

        let unit = ItemUnitId::new(ItemId::from("I1"), 2);
        assert_eq!(unit.to_string(), "I1-2");

        let line = OrderedItemId::new(OrderId::from("O7"), ItemId::from("I1"));
        assert_eq!(line.to_string(), "O7-I1");
    }

    #[test]
    fn typed_ids_stay_distinct_when_flat_forms_match() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let a = InventoryId::new(date, LocationId::from("A-B"), ItemId::from("C"));
        let b = InventoryId::new(date, LocationId::from("A"), ItemId::from("B-C"));
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }
}
