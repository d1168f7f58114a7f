//! Warehouse orders and their item lines.

pub mod order;

pub use order::{Direction, Order, OrderRow, OrderedItem};
