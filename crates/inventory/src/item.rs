use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use warehouse_core::{
    Dimensions, DomainError, DomainResult, Entity, EntityKind, ItemId, ItemUnitId,
    UnitNormalizer,
};

/// Raw packaging-level row nested under an item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUnitRow {
    pub level: u32,
    pub conversion_qty: u32,
    pub qty_uom: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub dim_uom: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub weight_uom: Option<String>,
}

/// Raw item row with all of its packaging levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gtype: String,
    #[serde(default)]
    pub zone: Option<String>,
    /// Level of the base unit among `units`.
    pub base_level: u32,
    pub units: Vec<ItemUnitRow>,
}

/// One packaging level of an item (piece, carton, pallet, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemUnit {
    id: ItemUnitId,
    conversion_qty: u32,
    qty_uom: String,
    dimensions: Dimensions,
    weight: f64,
}

impl ItemUnit {
    pub fn from_row(item: &ItemId, row: &ItemUnitRow, units: &UnitNormalizer) -> DomainResult<Self> {
        let dim_uom = row.dim_uom.as_deref();
        Ok(Self {
            id: ItemUnitId::new(item.clone(), row.level),
            conversion_qty: row.conversion_qty,
            qty_uom: row.qty_uom.trim().to_string(),
            dimensions: Dimensions::new(
                units.normalize_length(row.length, dim_uom)?,
                units.normalize_length(row.width, dim_uom)?,
                units.normalize_length(row.height, dim_uom)?,
            ),
            weight: units.normalize_weight(row.weight, row.weight_uom.as_deref())?,
        })
    }

    /// Number of base units packed inside this unit.
    pub fn conversion_qty(&self) -> u32 {
        self.conversion_qty
    }

    pub fn qty_uom(&self) -> &str {
        &self.qty_uom
    }

    /// Dimensions in meters.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Entity for ItemUnit {
    type Id = ItemUnitId;
    const KIND: EntityKind = EntityKind::ItemUnit;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An item (SKU) and references to its packaging levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: ItemId,
    description: String,
    gtype: String,
    zone: Option<String>,
    base_unit: ItemUnitId,
    unit_levels: Vec<ItemUnitId>,
}

impl Item {
    /// Build an item together with the units it owns.
    ///
    /// Units are returned ordered by level; the item references them by id.
    pub fn from_row(row: &ItemRow, units: &UnitNormalizer) -> DomainResult<(Self, Vec<ItemUnit>)> {
        let id = ItemId::parse(&row.id)?;
        if row.units.is_empty() {
            return Err(DomainError::validation(format!(
                "item {id} has no packaging units"
            )));
        }

        let mut levels = BTreeSet::new();
        for unit in &row.units {
            if !levels.insert(unit.level) {
                return Err(DomainError::duplicate(
                    EntityKind::ItemUnit,
                    ItemUnitId::new(id.clone(), unit.level),
                ));
            }
        }
        if !levels.contains(&row.base_level) {
            return Err(DomainError::validation(format!(
                "item {id}: base unit level {} is not among its units",
                row.base_level
            )));
        }

        let mut owned = row
            .units
            .iter()
            .map(|u| ItemUnit::from_row(&id, u, units))
            .collect::<DomainResult<Vec<_>>>()?;
        owned.sort_by_key(|u| u.id.level());

        let item = Self {
            base_unit: ItemUnitId::new(id.clone(), row.base_level),
            unit_levels: owned.iter().map(|u| u.id.clone()).collect(),
            description: row.description.trim().to_string(),
            gtype: row.gtype.trim().to_string(),
            zone: row
                .zone
                .as_deref()
                .map(str::trim)
                .filter(|z| !z.is_empty())
                .map(str::to_string),
            id,
        };
        Ok((item, owned))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Goods type.
    pub fn gtype(&self) -> &str {
        &self.gtype
    }

    /// Zone the item must be stored in.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn base_unit(&self) -> &ItemUnitId {
        &self.base_unit
    }

    /// Packaging levels, ordered by level.
    pub fn unit_levels(&self) -> &[ItemUnitId] {
        &self.unit_levels
    }
}

impl Entity for Item {
    type Id = ItemId;
    const KIND: EntityKind = EntityKind::Item;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_row(level: u32, conversion_qty: u32) -> ItemUnitRow {
        ItemUnitRow {
            level,
            conversion_qty,
            qty_uom: "PCE".to_string(),
            length: 100.0,
            width: 50.0,
            height: 20.0,
            dim_uom: Some("MM".to_string()),
            weight: 250.0,
            weight_uom: Some("g".to_string()),
        }
    }

    fn item_row(id: &str) -> ItemRow {
        ItemRow {
            id: id.to_string(),
            description: "Widget".to_string(),
            gtype: "STD".to_string(),
            zone: Some("DRY".to_string()),
            base_level: 1,
            units: vec![unit_row(2, 12), unit_row(1, 1)],
        }
    }

    #[test]
    fn from_row_builds_owned_units_in_level_order() {
        let (item, units) = Item::from_row(&item_row("I1"), &UnitNormalizer::default()).unwrap();
        assert_eq!(item.id().as_str(), "I1");
        assert_eq!(item.base_unit().to_string(), "I1-1");
        let levels: Vec<String> = item.unit_levels().iter().map(|u| u.to_string()).collect();
        assert_eq!(levels, vec!["I1-1", "I1-2"]);

        assert_eq!(units.len(), 2);
        assert_eq!(units[1].conversion_qty(), 12);
        assert!((units[0].dimensions().length - 0.1).abs() < 1e-9);
        assert!((units[0].weight() - 0.25).abs() < 1e-9);
        assert!(units.iter().all(|u| u.id().item() == item.id()));
    }

    #[test]
    fn from_row_rejects_missing_base_level() {
        let mut row = item_row("I1");
        row.base_level = 3;
        let err = Item::from_row(&row, &UnitNormalizer::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn from_row_rejects_repeated_level() {
        let mut row = item_row("I1");
        row.units.push(unit_row(2, 24));
        let err = Item::from_row(&row, &UnitNormalizer::default()).unwrap_err();
        assert_eq!(err, DomainError::duplicate(EntityKind::ItemUnit, "I1-2"));
    }

    #[test]
    fn from_row_rejects_unknown_weight_unit() {
        let mut row = item_row("I1");
        row.units[0].weight_uom = Some("lb".to_string());
        let err = Item::from_row(&row, &UnitNormalizer::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidUnit { .. }));
    }
}
