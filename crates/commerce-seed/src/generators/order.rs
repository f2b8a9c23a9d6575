//! Order and order item generation.

use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{amount, pick};

/// Order status values matching the ORDERS.Status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// Generated order ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub total_amount: Decimal,
}

/// Generated order line ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedOrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

/// Configuration for order and order item generation.
#[derive(Debug, Clone)]
pub struct OrderGenConfig {
    /// Order total range in cents.
    pub total_cents: RangeInclusive<i64>,
    /// Unit price range in cents for order items.
    pub item_price_cents: RangeInclusive<i64>,
    /// Mean of the Poisson-distributed extra quantity above one.
    pub extra_quantity_mean: f64,
    /// Upper bound on item quantity.
    pub max_quantity: i32,
}

impl Default for OrderGenConfig {
    fn default() -> Self {
        Self {
            total_cents: 1_000..=100_000,
            item_price_cents: 100..=50_000,
            extra_quantity_mean: 1.5,
            max_quantity: 10,
        }
    }
}

/// Generates orders for existing customers.
pub struct OrderGenerator {
    config: OrderGenConfig,
}

impl OrderGenerator {
    pub fn new() -> Self {
        Self {
            config: OrderGenConfig::default(),
        }
    }

    pub fn with_config(config: OrderGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single order, or `None` when there are no customers.
    pub fn generate(&self, customer_ids: &[Uuid], rng: &mut impl Rng) -> Option<GeneratedOrder> {
        let customer_id = pick(customer_ids, rng)?;
        let status = OrderStatus::ALL[rng.gen_range(0..OrderStatus::ALL.len())];

        Some(GeneratedOrder {
            id: Uuid::new_v4(),
            customer_id,
            status,
            total_amount: amount(self.config.total_cents.clone(), rng),
        })
    }

    /// Generates multiple orders.
    pub fn generate_batch(
        &self,
        count: usize,
        customer_ids: &[Uuid],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedOrder> {
        (0..count)
            .map_while(|_| self.generate(customer_ids, rng))
            .collect()
    }
}

impl Default for OrderGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates order items linking existing orders and products.
pub struct OrderItemGenerator {
    config: OrderGenConfig,
    extra_quantity: Option<Poisson<f64>>,
}

impl OrderItemGenerator {
    pub fn new() -> Self {
        Self::with_config(OrderGenConfig::default())
    }

    pub fn with_config(config: OrderGenConfig) -> Self {
        // A non-positive mean disables the extra quantity entirely
        let extra_quantity = Poisson::new(config.extra_quantity_mean).ok();
        Self {
            config,
            extra_quantity,
        }
    }

    /// Generates a single order item, or `None` when either parent list is empty.
    pub fn generate(
        &self,
        order_ids: &[Uuid],
        product_ids: &[Uuid],
        rng: &mut impl Rng,
    ) -> Option<GeneratedOrderItem> {
        let order_id = pick(order_ids, rng)?;
        let product_id = pick(product_ids, rng)?;

        let extra = self
            .extra_quantity
            .as_ref()
            .map(|poisson| poisson.sample(rng) as i32)
            .unwrap_or(0);

        Some(GeneratedOrderItem {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity: (1 + extra).min(self.config.max_quantity.max(1)),
            price: amount(self.config.item_price_cents.clone(), rng),
        })
    }

    /// Generates multiple order items.
    pub fn generate_batch(
        &self,
        count: usize,
        order_ids: &[Uuid],
        product_ids: &[Uuid],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedOrderItem> {
        (0..count)
            .map_while(|_| self.generate(order_ids, product_ids, rng))
            .collect()
    }
}

impl Default for OrderItemGenerator {
    fn default() -> Self {
        Self::new()
    }
}
