//! Entity store: per-kind arenas addressed by id.
//!
//! Entities never hold references to each other, only ids. The store checks
//! on insert that every referenced id already resolves, and keeps the
//! relationship index in step with the inventory and order-line arenas.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use chrono::NaiveDate;

use warehouse_core::{
    Coordinates, DomainError, DomainResult, Entity, EntityKind, InventoryId, ItemId, ItemUnitId,
    LocationId, OrderId, OrderedItemId,
};
use warehouse_inventory::{Inventory, Item, ItemUnit, Location};
use warehouse_orders::{Order, OrderedItem};

use crate::index::RelationshipIndex;
use crate::query::QueryEngine;

/// Insertion-ordered storage for one entity kind with an O(1) id lookup.
#[derive(Debug, Clone)]
pub struct Arena<K, V> {
    slots: Vec<V>,
    by_id: HashMap<K, usize>,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<K, V> Arena<K, V>
where
    K: Clone + Eq + Hash,
    V: Entity<Id = K>,
{
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &K) -> Option<&V> {
        self.by_id.get(id).and_then(|&slot| self.slots.get(slot))
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.slots.iter()
    }

    fn get_mut(&mut self, id: &K) -> Option<&mut V> {
        let slot = *self.by_id.get(id)?;
        self.slots.get_mut(slot)
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, V> {
        self.slots.iter_mut()
    }

    fn push(&mut self, entity: V) {
        self.by_id.insert(entity.id().clone(), self.slots.len());
        self.slots.push(entity);
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.by_id.clear();
    }
}

mod sealed {
    use super::*;

    pub trait ArenaAccess: Entity + Sized {
        fn arena_mut(store: &mut EntityStore) -> &mut Arena<Self::Id, Self>;

        /// Runs after reference checks and before the entity is stored.
        /// Must not mutate anything if it fails.
        fn on_insert(&self, _store: &mut EntityStore) -> DomainResult<()> {
            Ok(())
        }
    }
}

/// An entity kind the store can hold.
pub trait Stored: sealed::ArenaAccess {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self>;

    /// Fails with `DanglingReference` if a referenced id is not in `store`.
    fn check_references(&self, store: &EntityStore) -> DomainResult<()>;
}

/// Borrowed entity of any kind, for kind-driven listings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Location(&'a Location),
    Item(&'a Item),
    ItemUnit(&'a ItemUnit),
    Inventory(&'a Inventory),
    Order(&'a Order),
    OrderedItem(&'a OrderedItem),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Location(_) => EntityKind::Location,
            EntityRef::Item(_) => EntityKind::Item,
            EntityRef::ItemUnit(_) => EntityKind::ItemUnit,
            EntityRef::Inventory(_) => EntityKind::Inventory,
            EntityRef::Order(_) => EntityKind::Order,
            EntityRef::OrderedItem(_) => EntityKind::OrderedItem,
        }
    }

    /// Flat string form of the entity id.
    ///
    /// Composite ids join their parts with `-`, so two distinct ids can share
    /// a flat form when a part contains `-`. Compare typed ids for identity.
    pub fn id_string(&self) -> String {
        match self {
            EntityRef::Location(e) => e.id().to_string(),
            EntityRef::Item(e) => e.id().to_string(),
            EntityRef::ItemUnit(e) => e.id().to_string(),
            EntityRef::Inventory(e) => e.id().to_string(),
            EntityRef::Order(e) => e.id().to_string(),
            EntityRef::OrderedItem(e) => e.id().to_string(),
        }
    }
}

/// Owns every entity of one load.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    locations: Arena<LocationId, Location>,
    items: Arena<ItemId, Item>,
    item_units: Arena<ItemUnitId, ItemUnit>,
    inventory: Arena<InventoryId, Inventory>,
    orders: Arena<OrderId, Order>,
    ordered_items: Arena<OrderedItemId, OrderedItem>,
    index: RelationshipIndex,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity after checking identity and references.
    ///
    /// Nothing is mutated when this fails.
    pub fn insert<E: Stored>(&mut self, entity: E) -> DomainResult<()> {
        if E::arena(self).contains(entity.id()) {
            return Err(DomainError::duplicate(E::KIND, entity.id()));
        }
        entity.check_references(self)?;
        entity.on_insert(self)?;
        E::arena_mut(self).push(entity);
        Ok(())
    }

    /// Store an item together with the packaging units it owns.
    pub fn insert_item(&mut self, item: Item, units: Vec<ItemUnit>) -> DomainResult<()> {
        if self.items.contains(item.id()) {
            return Err(DomainError::duplicate(EntityKind::Item, item.id()));
        }

        let mut incoming = HashSet::new();
        for unit in &units {
            if unit.id().item() != item.id() {
                return Err(DomainError::validation(format!(
                    "item unit {} is not owned by item {}",
                    unit.id(),
                    item.id()
                )));
            }
            if self.item_units.contains(unit.id()) || !incoming.insert(unit.id()) {
                return Err(DomainError::duplicate(EntityKind::ItemUnit, unit.id()));
            }
        }
        for unit_id in item
            .unit_levels()
            .iter()
            .chain(std::iter::once(item.base_unit()))
        {
            if !incoming.contains(unit_id) && !self.item_units.contains(unit_id) {
                return Err(DomainError::dangling(
                    EntityKind::ItemUnit,
                    unit_id,
                    format!("item {}", item.id()),
                ));
            }
        }

        for unit in units {
            self.item_units.push(unit);
        }
        self.insert(item)
    }

    /// The "add item" operation on an order: attach a new line to an existing order.
    pub fn add_order_item(&mut self, line: OrderedItem) -> DomainResult<()> {
        self.insert(line)
    }

    pub fn get<E: Stored>(&self, id: &E::Id) -> Option<&E> {
        E::arena(self).get(id)
    }

    pub fn contains<E: Stored>(&self, id: &E::Id) -> bool {
        E::arena(self).contains(id)
    }

    /// All entities of one kind, in insertion order.
    pub fn all<E: Stored>(&self) -> std::slice::Iter<'_, E> {
        E::arena(self).iter()
    }

    pub fn all_of_type(&self, kind: EntityKind) -> Vec<EntityRef<'_>> {
        match kind {
            EntityKind::Location => self.locations.iter().map(EntityRef::Location).collect(),
            EntityKind::Item => self.items.iter().map(EntityRef::Item).collect(),
            EntityKind::ItemUnit => self.item_units.iter().map(EntityRef::ItemUnit).collect(),
            EntityKind::Inventory => self.inventory.iter().map(EntityRef::Inventory).collect(),
            EntityKind::Order => self.orders.iter().map(EntityRef::Order).collect(),
            EntityKind::OrderedItem => self
                .ordered_items
                .iter()
                .map(EntityRef::OrderedItem)
                .collect(),
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Location => self.locations.len(),
            EntityKind::Item => self.items.len(),
            EntityKind::ItemUnit => self.item_units.len(),
            EntityKind::Inventory => self.inventory.len(),
            EntityKind::Order => self.orders.len(),
            EntityKind::OrderedItem => self.ordered_items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|&kind| self.count(kind) == 0)
    }

    /// Remove every entity of `kind`, together with whatever would otherwise
    /// be left pointing at a removed id.
    ///
    /// - Location: inventory records stored there.
    /// - Item / ItemUnit: the items, their units, their inventory records and order lines.
    /// - Order: its order lines.
    /// - OrderedItem: the lines are also detached from their orders.
    pub fn remove_all_of_type(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Location => {
                self.locations.clear();
                self.inventory.clear();
            }
            EntityKind::Item | EntityKind::ItemUnit => {
                self.items.clear();
                self.item_units.clear();
                self.inventory.clear();
                self.clear_order_lines();
            }
            EntityKind::Inventory => self.inventory.clear(),
            EntityKind::Order => {
                self.orders.clear();
                self.ordered_items.clear();
            }
            EntityKind::OrderedItem => self.clear_order_lines(),
        }
        self.index = RelationshipIndex::rebuild(self.inventory.iter(), self.ordered_items.iter());
        tracing::debug!(%kind, "removed all entities of kind");
    }

    pub fn index(&self) -> &RelationshipIndex {
        &self.index
    }

    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(self)
    }

    /// Distinct inventory snapshot dates, in calendar order.
    pub fn snapshot_dates(&self) -> Vec<NaiveDate> {
        self.inventory
            .iter()
            .map(Inventory::date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The most recent inventory snapshot date.
    pub fn latest_snapshot(&self) -> Option<NaiveDate> {
        self.inventory.iter().map(Inventory::date).max()
    }

    /// Layout step: place a location on the map.
    pub fn set_location_coordinates(
        &mut self,
        id: &LocationId,
        coordinates: Coordinates,
    ) -> DomainResult<()> {
        let location = self
            .location_mut(id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Location, id))?;
        location.set_coordinates(coordinates);
        Ok(())
    }

    pub(crate) fn location_mut(&mut self, id: &LocationId) -> Option<&mut Location> {
        self.locations.get_mut(id)
    }

    fn clear_order_lines(&mut self) {
        self.ordered_items.clear();
        for order in self.orders.iter_mut() {
            order.clear_items();
        }
    }
}

fn require<E: Stored>(store: &EntityStore, id: &E::Id, referenced_by: &str) -> DomainResult<()> {
    if store.contains::<E>(id) {
        Ok(())
    } else {
        Err(DomainError::dangling(E::KIND, id, referenced_by))
    }
}

macro_rules! impl_arena_access {
    ($t:ty, $field:ident) => {
        impl sealed::ArenaAccess for $t {
            fn arena_mut(store: &mut EntityStore) -> &mut Arena<Self::Id, Self> {
                &mut store.$field
            }
        }
    };
}

impl_arena_access!(Location, locations);
impl_arena_access!(ItemUnit, item_units);
impl_arena_access!(Item, items);
impl_arena_access!(Order, orders);

impl sealed::ArenaAccess for Inventory {
    fn arena_mut(store: &mut EntityStore) -> &mut Arena<Self::Id, Self> {
        &mut store.inventory
    }

    fn on_insert(&self, store: &mut EntityStore) -> DomainResult<()> {
        store.index.link_inventory(self);
        Ok(())
    }
}

impl sealed::ArenaAccess for OrderedItem {
    fn arena_mut(store: &mut EntityStore) -> &mut Arena<Self::Id, Self> {
        &mut store.ordered_items
    }

    fn on_insert(&self, store: &mut EntityStore) -> DomainResult<()> {
        let order = store
            .orders
            .get_mut(self.order())
            .ok_or_else(|| DomainError::dangling(EntityKind::Order, self.order(), self.id()))?;
        order.add_item(self)?;
        store.index.link_ordered_item(self);
        Ok(())
    }
}

impl Stored for Location {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self> {
        &store.locations
    }

    fn check_references(&self, _store: &EntityStore) -> DomainResult<()> {
        Ok(())
    }
}

impl Stored for ItemUnit {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self> {
        &store.item_units
    }

    /// Units belong to exactly one item and are stored only through
    /// [`EntityStore::insert_item`], so a standalone insert always fails.
    fn check_references(&self, store: &EntityStore) -> DomainResult<()> {
        let owner = self.id().item();
        require::<Item>(store, owner, &format!("item unit {}", self.id()))?;
        Err(DomainError::validation(format!(
            "item unit {} must be stored together with item {owner}",
            self.id()
        )))
    }
}

impl Stored for Item {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self> {
        &store.items
    }

    fn check_references(&self, store: &EntityStore) -> DomainResult<()> {
        let referrer = format!("item {}", self.id());
        require::<ItemUnit>(store, self.base_unit(), &referrer)?;
        for unit in self.unit_levels() {
            require::<ItemUnit>(store, unit, &referrer)?;
        }
        Ok(())
    }
}

impl Stored for Inventory {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self> {
        &store.inventory
    }

    fn check_references(&self, store: &EntityStore) -> DomainResult<()> {
        let referrer = format!("inventory {}", self.id());
        require::<Location>(store, self.location(), &referrer)?;
        require::<Item>(store, self.item(), &referrer)
    }
}

impl Stored for Order {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self> {
        &store.orders
    }

    fn check_references(&self, store: &EntityStore) -> DomainResult<()> {
        let referrer = format!("order {}", self.id());
        for line in self.ordered_items() {
            require::<OrderedItem>(store, line, &referrer)?;
        }
        Ok(())
    }
}

impl Stored for OrderedItem {
    fn arena(store: &EntityStore) -> &Arena<Self::Id, Self> {
        &store.ordered_items
    }

    fn check_references(&self, store: &EntityStore) -> DomainResult<()> {
        let referrer = format!("ordered item {}", self.id());
        require::<Order>(store, self.order(), &referrer)?;
        require::<Item>(store, self.item(), &referrer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        add_order, inventory, item, item_row, line, location, store_with,
    };

    #[test]
    fn dangling_inventory_leaves_store_untouched() {
        let mut store = store_with(&["L1"], &["I1"]);
        let before_locations = store.count(EntityKind::Location);
        let before_items = store.count(EntityKind::Item);

        let err = store.insert(inventory("01.01.2023", "L2", "I1")).unwrap_err();
        assert_eq!(
            err,
            DomainError::dangling(EntityKind::Location, "L2", "inventory 2023-01-01-L2-I1")
        );
        assert_eq!(store.count(EntityKind::Location), before_locations);
        assert_eq!(store.count(EntityKind::Item), before_items);
        assert_eq!(store.count(EntityKind::Inventory), 0);
        assert_eq!(store.index().stock_links(), 0);
    }

    #[test]
    fn duplicate_keys_are_rejected_for_every_kind() {
        let mut store = store_with(&["L1"], &["I1"]);
        store.insert(inventory("01.01.2023", "L1", "I1")).unwrap();

        assert!(matches!(
            store.insert(location("L1")),
            Err(DomainError::DuplicateKey { kind: EntityKind::Location, .. })
        ));
        let (dup_item, dup_units) = item("I1");
        assert!(matches!(
            store.insert_item(dup_item, dup_units),
            Err(DomainError::DuplicateKey { kind: EntityKind::Item, .. })
        ));
        assert_eq!(
            store.insert(inventory("01.01.2023", "L1", "I1")).unwrap_err(),
            DomainError::duplicate(EntityKind::Inventory, "2023-01-01-L1-I1")
        );
        assert_eq!(store.count(EntityKind::Inventory), 1);
        assert_eq!(store.count(EntityKind::ItemUnit), 1);
    }

    #[test]
    fn order_lines_need_an_order_and_an_item() {
        let mut store = store_with(&[], &["I1"]);
        assert!(matches!(
            store.add_order_item(line("O1", "I1", 1)),
            Err(DomainError::DanglingReference { kind: EntityKind::Order, .. })
        ));

        add_order(&mut store, "O1", &[("I1", 1)]);
        assert!(matches!(
            store.add_order_item(line("O1", "I9", 1)),
            Err(DomainError::DanglingReference { kind: EntityKind::Item, .. })
        ));
        let order = store.get::<Order>(&OrderId::from("O1")).unwrap();
        assert_eq!(order.ordered_items().len(), 1);
        assert_eq!(store.index().order_links(), 1);
    }

    #[test]
    fn item_units_are_only_stored_with_their_item() {
        let mut store = store_with(&["L1"], &[]);
        let (_, orphan) = item("I9");
        let err = store.insert(orphan[0].clone()).unwrap_err();
        assert_eq!(
            err,
            DomainError::dangling(EntityKind::Item, "I9", "item unit I9-1")
        );
        assert_eq!(store.count(EntityKind::ItemUnit), 0);

        let (owner, units) = item("I1");
        store.insert_item(owner, units).unwrap();
        let mut row = item_row("I1");
        row.units[0].level = 2;
        row.base_level = 2;
        let (_, mut extra) = Item::from_row(&row, &crate::fixtures::units()).unwrap();
        let err = store.insert(extra.remove(0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.count(EntityKind::ItemUnit), 1);
        let stored = store.get::<Item>(&ItemId::from("I1")).unwrap();
        assert_eq!(stored.unit_levels().len(), 1);
    }

    #[test]
    fn all_of_type_lists_in_insertion_order() {
        let store = store_with(&["L2", "L1"], &["I1"]);
        let listed: Vec<String> = store
            .all_of_type(EntityKind::Location)
            .iter()
            .map(EntityRef::id_string)
            .collect();
        assert_eq!(listed, vec!["L2", "L1"]);

        let units = store.all_of_type(EntityKind::ItemUnit);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].kind(), EntityKind::ItemUnit);
        assert_eq!(units[0].id_string(), "I1-1");
    }

    #[test]
    fn removing_items_cascades_to_dependents() {
        let mut store = store_with(&["L1"], &["I1"]);
        store.insert(inventory("01.01.2023", "L1", "I1")).unwrap();
        add_order(&mut store, "O1", &[("I1", 5)]);

        store.remove_all_of_type(EntityKind::Item);

        assert_eq!(store.count(EntityKind::Item), 0);
        assert_eq!(store.count(EntityKind::ItemUnit), 0);
        assert_eq!(store.count(EntityKind::Inventory), 0);
        assert_eq!(store.count(EntityKind::OrderedItem), 0);
        assert_eq!(store.count(EntityKind::Location), 1);
        assert_eq!(store.count(EntityKind::Order), 1);
        let order = store.get::<Order>(&OrderId::from("O1")).unwrap();
        assert!(order.ordered_items().is_empty());
        assert_eq!(store.index(), &RelationshipIndex::new());
    }

    #[test]
    fn removing_locations_drops_their_inventory_only() {
        let mut store = store_with(&["L1"], &["I1"]);
        store.insert(inventory("01.01.2023", "L1", "I1")).unwrap();
        add_order(&mut store, "O1", &[("I1", 5)]);

        store.remove_all_of_type(EntityKind::Location);

        assert_eq!(store.count(EntityKind::Inventory), 0);
        assert_eq!(store.count(EntityKind::OrderedItem), 1);
        assert_eq!(store.index().stock_links(), 0);
        assert_eq!(store.index().order_links(), 1);

        store.remove_all_of_type(EntityKind::Order);
        assert!(!store.is_empty());
        assert_eq!(store.count(EntityKind::OrderedItem), 0);
        assert_eq!(store.index().order_links(), 0);
    }

    #[test]
    fn snapshot_dates_are_in_calendar_order() {
        let mut store = store_with(&["L1"], &["I1"]);
        store.insert(inventory("10.02.2023", "L1", "I1")).unwrap();
        store.insert(inventory("01.01.2023", "L1", "I1")).unwrap();
        store.insert(inventory("09.02.2023", "L1", "I1")).unwrap();

        let dates = store.snapshot_dates();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 2, 9).unwrap(),
                NaiveDate::from_ymd_opt(2023, 2, 10).unwrap(),
            ]
        );
        assert_eq!(store.latest_snapshot(), dates.last().copied());
    }

    #[test]
    fn set_location_coordinates_places_existing_location() {
        let mut store = store_with(&["L1"], &[]);
        let spot = Coordinates::new(1.0, 2.0, 0.0);
        store
            .set_location_coordinates(&LocationId::from("L1"), spot)
            .unwrap();
        let placed = store.get::<Location>(&LocationId::from("L1")).unwrap();
        assert_eq!(placed.coordinates(), Some(spot));
    }
}
