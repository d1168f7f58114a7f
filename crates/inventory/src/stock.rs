use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use warehouse_core::{
    DomainResult, Entity, EntityKind, InventoryId, ItemId, LocationId, UnitNormalizer,
};

use crate::location::normalize_type;

/// Raw inventory balance row: one item at one location on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub date: String,
    pub location_id: String,
    #[serde(default)]
    pub ltype: String,
    pub item_id: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub available_qty: i64,
    #[serde(default)]
    pub onhand_qty: i64,
    #[serde(default)]
    pub transit_qty: i64,
    #[serde(default)]
    pub allocated_qty: i64,
    #[serde(default)]
    pub suspense_qty: i64,
}

/// Quantities reported by an inventory balance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockQuantities {
    pub available: i64,
    pub onhand: i64,
    pub transit: i64,
    pub allocated: i64,
    pub suspense: i64,
}

/// Inventory balance for a (date, location, item) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    id: InventoryId,
    ltype: String,
    expiry_date: Option<NaiveDate>,
    quantities: StockQuantities,
}

impl Inventory {
    /// Build an inventory record; the date is required, the expiry date is optional.
    ///
    /// Only the row is validated here. Whether the location and item exist is
    /// checked when the record is inserted into a store.
    pub fn from_row(row: &InventoryRow, units: &UnitNormalizer) -> DomainResult<Self> {
        let date = units.parse_required_date(&row.date)?;
        let location = LocationId::parse(&row.location_id)?;
        let item = ItemId::parse(&row.item_id)?;
        Ok(Self {
            id: InventoryId::new(date, location, item),
            ltype: normalize_type(&row.ltype),
            expiry_date: units.parse_date(row.expiry_date.as_deref())?,
            quantities: StockQuantities {
                available: row.available_qty,
                onhand: row.onhand_qty,
                transit: row.transit_qty,
                allocated: row.allocated_qty,
                suspense: row.suspense_qty,
            },
        })
    }

    /// Snapshot date.
    pub fn date(&self) -> NaiveDate {
        self.id.date()
    }

    pub fn location(&self) -> &LocationId {
        self.id.location()
    }

    pub fn item(&self) -> &ItemId {
        self.id.item()
    }

    /// Location type label as reported in the balance sheet.
    pub fn ltype(&self) -> &str {
        &self.ltype
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    pub fn quantities(&self) -> StockQuantities {
        self.quantities
    }
}

impl Entity for Inventory {
    type Id = InventoryId;
    const KIND: EntityKind = EntityKind::Inventory;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
