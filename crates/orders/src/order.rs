use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use warehouse_core::{
    DomainError, DomainResult, Entity, EntityKind, ItemId, OrderId, OrderedItemId,
    UnitNormalizer,
};

/// Order direction relative to the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inbound" => Ok(Direction::Inbound),
            "outbound" => Ok(Direction::Outbound),
            other => Err(DomainError::validation(format!(
                "unknown order direction: {other:?}"
            ))),
        }
    }
}

/// Raw order row. Each row carries one item line; an order spans one or more rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: String,
    pub direction: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub s_ship_date: Option<String>,
    #[serde(default)]
    pub a_ship_date: Option<String>,
    #[serde(default)]
    pub line_num: u32,
    pub item_id: String,
    pub requested_qty: u64,
    pub total_qty: u64,
    #[serde(default)]
    pub qty_uom: String,
}

/// One item line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedItem {
    id: OrderedItemId,
    requested_qty: u64,
    total_qty: u64,
    qty_uom: String,
}

impl OrderedItem {
    pub fn new(
        order: OrderId,
        item: ItemId,
        requested_qty: u64,
        total_qty: u64,
        qty_uom: impl Into<String>,
    ) -> Self {
        Self {
            id: OrderedItemId::new(order, item),
            requested_qty,
            total_qty,
            qty_uom: qty_uom.into(),
        }
    }

    /// The item line described by an order row.
    pub fn from_row(row: &OrderRow) -> DomainResult<Self> {
        Ok(Self::new(
            OrderId::parse(&row.id)?,
            ItemId::parse(&row.item_id)?,
            row.requested_qty,
            row.total_qty,
            row.qty_uom.trim(),
        ))
    }

    /// Back-reference to the owning order.
    pub fn order(&self) -> &OrderId {
        self.id.order()
    }

    pub fn item(&self) -> &ItemId {
        self.id.item()
    }

    pub fn requested_qty(&self) -> u64 {
        self.requested_qty
    }

    /// Quantity actually provided; this is what frequency aggregation credits.
    pub fn total_qty(&self) -> u64 {
        self.total_qty
    }

    pub fn qty_uom(&self) -> &str {
        &self.qty_uom
    }
}

impl Entity for OrderedItem {
    type Id = OrderedItemId;
    const KIND: EntityKind = EntityKind::OrderedItem;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A warehouse order. Only its item list grows after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    direction: Direction,
    country: String,
    delivery_date: Option<NaiveDate>,
    scheduled_ship_date: Option<NaiveDate>,
    actual_ship_date: Option<NaiveDate>,
    line_num: u32,
    ordered_items: Vec<OrderedItemId>,
}

impl Order {
    /// Build the order header described by a row, with no item lines yet.
    ///
    /// The row's item line is built separately with [`OrderedItem::from_row`]
    /// and attached through [`Order::add_item`].
    pub fn from_row(row: &OrderRow, units: &UnitNormalizer) -> DomainResult<Self> {
        Ok(Self {
            id: OrderId::parse(&row.id)?,
            direction: row.direction.parse()?,
            country: row.country.trim().to_string(),
            delivery_date: units.parse_date(row.delivery_date.as_deref())?,
            scheduled_ship_date: units.parse_date(row.s_ship_date.as_deref())?,
            actual_ship_date: units.parse_date(row.a_ship_date.as_deref())?,
            line_num: row.line_num,
            ordered_items: Vec::new(),
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Destination country.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.delivery_date
    }

    pub fn scheduled_ship_date(&self) -> Option<NaiveDate> {
        self.scheduled_ship_date
    }

    pub fn actual_ship_date(&self) -> Option<NaiveDate> {
        self.actual_ship_date
    }

    /// ERP order line number.
    pub fn line_num(&self) -> u32 {
        self.line_num
    }

    pub fn ordered_items(&self) -> &[OrderedItemId] {
        &self.ordered_items
    }

    /// Attach an item line to this order.
    pub fn add_item(&mut self, line: &OrderedItem) -> DomainResult<()> {
        if line.order() != &self.id {
            return Err(DomainError::validation(format!(
                "ordered item {} does not belong to order {}",
                line.id(),
                self.id
            )));
        }
        if self.ordered_items.contains(line.id()) {
            return Err(DomainError::duplicate(EntityKind::OrderedItem, line.id()));
        }
        self.ordered_items.push(line.id().clone());
        Ok(())
    }

    /// Detach every item line. Used when the store drops all order lines.
    pub fn clear_items(&mut self) {
        self.ordered_items.clear();
    }
}

impl Entity for Order {
    type Id = OrderId;
    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
