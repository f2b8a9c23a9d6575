//! Entity generators for seed data.
//!
//! This module provides generators for each table of the commerce schema:
//! - [`CustomerGenerator`]: Customers with unique UUID-derived emails
//! - [`ProductGenerator`]: Random products or the fixed three-row catalog
//! - [`OrderGenerator`]: Orders placed by existing customers
//! - [`OrderItemGenerator`]: Line items linking orders and products
//! - [`InventoryGenerator`]: Stock records for existing products
//! - [`ShipmentGenerator`]: Shipments for existing orders dated in the last few days
//!
//! Dependent generators take the parent identifiers as a slice and return
//! nothing when that slice is empty.

pub mod customer;
pub mod inventory;
pub mod order;
pub mod product;
pub mod shipment;

pub use customer::{CustomerGenerator, GeneratedCustomer};
pub use inventory::{GeneratedInventory, InventoryGenerator};
pub use order::{
    GeneratedOrder, GeneratedOrderItem, OrderGenConfig, OrderGenerator, OrderItemGenerator,
    OrderStatus,
};
pub use product::{GeneratedProduct, ProductGenConfig, ProductGenerator};
pub use shipment::{GeneratedShipment, ShipmentGenerator, ShipmentStatus};

use rand::Rng;
use rust_decimal::Decimal;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Picks a uniformly random element of `items`.
pub(crate) fn pick<T: Copy>(items: &[T], rng: &mut impl Rng) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.gen_range(0..items.len())])
}

/// Returns a two-decimal amount drawn from a range of cents.
pub(crate) fn amount(cents: RangeInclusive<i64>, rng: &mut impl Rng) -> Decimal {
    Decimal::new(rng.gen_range(cents), 2)
}

/// Builds a stock keeping unit from an identifier.
pub(crate) fn sku_for(id: Uuid) -> String {
    let simple = id.simple().to_string();
    format!("SKU-{}", simple[..8].to_ascii_uppercase())
}
