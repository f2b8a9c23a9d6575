//! Shipment generation.

use rand::Rng;
use time::{Date, Duration};
use uuid::Uuid;

use super::pick;

/// Shipment status values matching the SHIPMENTS.Status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentStatus {
    Processing,
    Shipped,
    Delivered,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 3] = [
        ShipmentStatus::Processing,
        ShipmentStatus::Shipped,
        ShipmentStatus::Delivered,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Processing => "Processing",
            ShipmentStatus::Shipped => "Shipped",
            ShipmentStatus::Delivered => "Delivered",
        }
    }
}

/// Generated shipment ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedShipment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub shipment_date: Date,
    pub status: ShipmentStatus,
}

/// Generates shipments for existing orders.
///
/// Shipment dates fall within `window_days` before the reference date,
/// which is passed in so callers control what "today" means.
pub struct ShipmentGenerator {
    window_days: i64,
}

impl ShipmentGenerator {
    pub fn new() -> Self {
        Self { window_days: 10 }
    }

    /// Sets how many days back shipment dates may fall.
    pub fn with_window_days(mut self, days: i64) -> Self {
        self.window_days = days.max(1);
        self
    }

    pub fn generate(
        &self,
        order_ids: &[Uuid],
        today: Date,
        rng: &mut impl Rng,
    ) -> Option<GeneratedShipment> {
        let order_id = pick(order_ids, rng)?;
        let days_ago = rng.gen_range(0..self.window_days);

        Some(GeneratedShipment {
            id: Uuid::new_v4(),
            order_id,
            shipment_date: today.saturating_sub(Duration::days(days_ago)),
            status: ShipmentStatus::ALL[rng.gen_range(0..ShipmentStatus::ALL.len())],
        })
    }

    pub fn generate_batch(
        &self,
        count: usize,
        order_ids: &[Uuid],
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedShipment> {
        (0..count)
            .map_while(|_| self.generate(order_ids, today, rng))
            .collect()
    }
}

impl Default for ShipmentGenerator {
    fn default() -> Self {
        Self::new()
    }
}
