//! Cross-referencing joins between locations, items and orders.
//!
//! Every operation takes a set of source ids and returns the distinct set of
//! reachable target ids. Distinctness is applied at the final projection, so a
//! target reachable over several paths appears once. An empty input gives an
//! empty result; an id that is not in the store is a `DanglingReference`.

use std::collections::HashSet;

use warehouse_core::{DomainError, DomainResult, ItemId, LocationId, OrderId};

use crate::store::{EntityStore, Stored};

const QUERY_INPUT: &str = "query input";

/// Read-only join engine over a store's relationship index.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'s> {
    store: &'s EntityStore,
}

impl<'s> QueryEngine<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self { store }
    }

    /// Location → Inventory → Item.
    pub fn items_for_locations<'a>(
        &self,
        locations: impl IntoIterator<Item = &'a LocationId>,
    ) -> DomainResult<HashSet<ItemId>> {
        let index = self.store.index();
        let mut items = HashSet::new();
        for location in locations {
            self.require::<warehouse_inventory::Location>(location)?;
            items.extend(index.items_at_location(location).cloned());
        }
        Ok(items)
    }

    /// Order → OrderedItem → Item.
    pub fn items_for_orders<'a>(
        &self,
        orders: impl IntoIterator<Item = &'a OrderId>,
    ) -> DomainResult<HashSet<ItemId>> {
        let index = self.store.index();
        let mut items = HashSet::new();
        for order in orders {
            self.require::<warehouse_orders::Order>(order)?;
            items.extend(index.items_of_order(order).cloned());
        }
        Ok(items)
    }

    /// Item ← Inventory → Location.
    pub fn locations_for_items<'a>(
        &self,
        items: impl IntoIterator<Item = &'a ItemId>,
    ) -> DomainResult<HashSet<LocationId>> {
        let index = self.store.index();
        let mut locations = HashSet::new();
        for item in items {
            self.require::<warehouse_inventory::Item>(item)?;
            locations.extend(index.locations_of_item(item).cloned());
        }
        Ok(locations)
    }

    /// Order → OrderedItem → Item → Inventory → Location.
    pub fn locations_for_orders<'a>(
        &self,
        orders: impl IntoIterator<Item = &'a OrderId>,
    ) -> DomainResult<HashSet<LocationId>> {
        let index = self.store.index();
        let items = self.items_for_orders(orders)?;
        Ok(items
            .iter()
            .flat_map(|item| index.locations_of_item(item))
            .cloned()
            .collect())
    }

    /// Item ← OrderedItem ← Order.
    pub fn orders_for_items<'a>(
        &self,
        items: impl IntoIterator<Item = &'a ItemId>,
    ) -> DomainResult<HashSet<OrderId>> {
        let index = self.store.index();
        let mut orders = HashSet::new();
        for item in items {
            self.require::<warehouse_inventory::Item>(item)?;
            orders.extend(index.orders_of_item(item).cloned());
        }
        Ok(orders)
    }

    /// Location ← Inventory → Item ← OrderedItem ← Order.
    pub fn orders_for_locations<'a>(
        &self,
        locations: impl IntoIterator<Item = &'a LocationId>,
    ) -> DomainResult<HashSet<OrderId>> {
        let index = self.store.index();
        let items = self.items_for_locations(locations)?;
        Ok(items
            .iter()
            .flat_map(|item| index.orders_of_item(item))
            .cloned()
            .collect())
    }

    fn require<E: Stored>(&self, id: &E::Id) -> DomainResult<()> {
        if self.store.contains::<E>(id) {
            Ok(())
        } else {
            Err(DomainError::dangling(E::KIND, id, QUERY_INPUT))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{add_order, inventory, store_with};
    use proptest::prelude::*;
    use warehouse_core::EntityKind;

    fn ids<T: From<&'static str> + Eq + std::hash::Hash>(raw: &[&'static str]) -> HashSet<T> {
        raw.iter().map(|s| T::from(*s)).collect()
    }

    /// L1 holds I1 and I2, L2 holds I2, L3 is empty.
    /// O1 orders I1, O2 orders I2 and I3 (I3 is not stocked anywhere).
    fn sample() -> EntityStore {
        let mut store = store_with(&["L1", "L2", "L3"], &["I1", "I2", "I3"]);
        store.insert(inventory("01.01.2023", "L1", "I1")).unwrap();
        store.insert(inventory("01.01.2023", "L1", "I2")).unwrap();
        store.insert(inventory("02.01.2023", "L1", "I2")).unwrap();
        store.insert(inventory("02.01.2023", "L2", "I2")).unwrap();
        add_order(&mut store, "O1", &[("I1", 5)]);
        add_order(&mut store, "O2", &[("I2", 1), ("I3", 4)]);
        store
    }

    #[test]
    fn single_record_example() {
        let mut store = store_with(&["L1"], &["I1"]);
        store.insert(inventory("01.01.2023", "L1", "I1")).unwrap();
        add_order(&mut store, "O1", &[("I1", 5)]);
        let q = store.query();

        let l1 = LocationId::from("L1");
        let i1 = ItemId::from("I1");
        assert_eq!(q.items_for_locations([&l1]).unwrap(), ids(&["I1"]));
        assert!(q.orders_for_items([&i1]).unwrap().contains(&OrderId::from("O1")));
    }

    #[test]
    fn two_hop_joins() {
        let store = sample();
        let q = store.query();

        assert_eq!(
            q.items_for_locations(&ids::<LocationId>(&["L1"])).unwrap(),
            ids(&["I1", "I2"])
        );
        assert_eq!(
            q.items_for_orders(&ids::<OrderId>(&["O2"])).unwrap(),
            ids(&["I2", "I3"])
        );
        assert_eq!(
            q.locations_for_items(&ids::<ItemId>(&["I2"])).unwrap(),
            ids(&["L1", "L2"])
        );
        assert_eq!(
            q.orders_for_items(&ids::<ItemId>(&["I1", "I2"])).unwrap(),
            ids(&["O1", "O2"])
        );
    }

    #[test]
    fn three_hop_joins_deduplicate() {
        let store = sample();
        let q = store.query();

        // I2 is reachable from L1 over two snapshot dates; O2 still appears once.
        let orders = q.orders_for_locations(&ids::<LocationId>(&["L1"])).unwrap();
        assert_eq!(orders, ids(&["O1", "O2"]));

        let locations = q.locations_for_orders(&ids::<OrderId>(&["O2"])).unwrap();
        assert_eq!(locations, ids(&["L1", "L2"]));

        assert!(q.orders_for_locations(&ids::<LocationId>(&["L3"])).unwrap().is_empty());
    }

    #[test]
    fn empty_input_gives_empty_result() {
        let store = sample();
        let q = store.query();
        let (locations, items, orders): (Vec<LocationId>, Vec<ItemId>, Vec<OrderId>) =
            Default::default();
        assert!(q.items_for_locations(&locations).unwrap().is_empty());
        assert!(q.items_for_orders(&orders).unwrap().is_empty());
        assert!(q.locations_for_items(&items).unwrap().is_empty());
        assert!(q.locations_for_orders(&orders).unwrap().is_empty());
        assert!(q.orders_for_items(&items).unwrap().is_empty());
        assert!(q.orders_for_locations(&locations).unwrap().is_empty());
    }

    #[test]
    fn unknown_input_id_is_a_dangling_reference() {
        let store = sample();
        let q = store.query();
        let err = q.orders_for_locations([&LocationId::from("L9")]).unwrap_err();
        assert_eq!(
            err,
            DomainError::DanglingReference {
                kind: EntityKind::Location,
                id: "L9".to_string(),
                referenced_by: QUERY_INPUT.to_string(),
            }
        );
        assert!(q.locations_for_orders([&OrderId::from("O9")]).is_err());
    }

    /// Random graph over locations L0..L5, items I0..I5, orders O0..O3.
    fn arb_store() -> impl Strategy<Value = EntityStore> {
        (
            prop::collection::vec((0usize..6, 0usize..6, 1u32..4), 0..20),
            prop::collection::vec(prop::collection::btree_set(0usize..6, 1..4), 0..4),
        )
            .prop_map(|(stock, orders)| {
                let locs: Vec<String> = (0..6).map(|i| format!("L{i}")).collect();
                let items: Vec<String> = (0..6).map(|i| format!("I{i}")).collect();
                let loc_refs: Vec<&str> = locs.iter().map(String::as_str).collect();
                let item_refs: Vec<&str> = items.iter().map(String::as_str).collect();
                let mut store = store_with(&loc_refs, &item_refs);

                let mut seen = HashSet::new();
                for (l, i, day) in stock {
                    if seen.insert((l, i, day)) {
                        let date = format!("0{day}.01.2023");
                        store.insert(inventory(&date, &locs[l], &items[i])).unwrap();
                    }
                }
                for (o, lines) in orders.iter().enumerate() {
                    let order_id = format!("O{o}");
                    let lines: Vec<(&str, u64)> =
                        lines.iter().map(|&i| (item_refs[i], 1)).collect();
                    add_order(&mut store, &order_id, &lines);
                }
                store
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: a location reached from an order leads back to that order.
        #[test]
        fn location_and_order_joins_are_adjoint(store in arb_store()) {
            let q = store.query();
            for order in store.all::<warehouse_orders::Order>() {
                let oid = warehouse_core::Entity::id(order);
                for location in q.locations_for_orders([oid]).unwrap() {
                    let back = q.orders_for_locations([&location]).unwrap();
                    prop_assert!(back.contains(oid));
                }
            }
        }

        /// Property: stocked items survive the item → location → item round trip.
        #[test]
        fn item_location_round_trip_is_a_closure(store in arb_store(), picks in prop::collection::vec(0usize..6, 0..6)) {
            let q = store.query();
            let items: HashSet<ItemId> = picks.iter().map(|i| ItemId::new(format!("I{i}"))).collect();
            let round_trip = q.items_for_locations(&q.locations_for_items(&items).unwrap()).unwrap();
            for item in &items {
                let stocked = store.index().locations_of_item(item).next().is_some();
                if stocked {
                    prop_assert!(round_trip.contains(item));
                }
            }
        }

        /// Property: results never depend on duplicated input ids.
        #[test]
        fn duplicated_inputs_do_not_change_results(store in arb_store()) {
            let q = store.query();
            let all: Vec<LocationId> = store
                .all::<warehouse_inventory::Location>()
                .map(|l| warehouse_core::Entity::id(l).clone())
                .collect();
            let doubled: Vec<&LocationId> = all.iter().chain(all.iter()).collect();
            prop_assert_eq!(
                q.orders_for_locations(doubled.iter().copied()).unwrap(),
                q.orders_for_locations(&all).unwrap()
            );
        }
    }
}
