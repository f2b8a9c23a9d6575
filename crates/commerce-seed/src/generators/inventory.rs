//! Inventory record generation.

use std::ops::RangeInclusive;

use rand::Rng;
use uuid::Uuid;

use super::pick;

/// Generated inventory record ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedInventory {
    pub id: Uuid,
    pub product_id: Uuid,
    pub stock_quantity: i32,
}

/// Generates stock records for existing products.
pub struct InventoryGenerator {
    stock: RangeInclusive<i32>,
}

impl InventoryGenerator {
    pub fn new() -> Self {
        Self { stock: 0..=1000 }
    }

    /// Sets the range of stock quantities.
    pub fn with_stock_range(mut self, stock: RangeInclusive<i32>) -> Self {
        self.stock = stock;
        self
    }

    pub fn generate(&self, product_ids: &[Uuid], rng: &mut impl Rng) -> Option<GeneratedInventory> {
        let product_id = pick(product_ids, rng)?;

        Some(GeneratedInventory {
            id: Uuid::new_v4(),
            product_id,
            stock_quantity: rng.gen_range(self.stock.clone()),
        })
    }

    pub fn generate_batch(
        &self,
        count: usize,
        product_ids: &[Uuid],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedInventory> {
        (0..count)
            .map_while(|_| self.generate(product_ids, rng))
            .collect()
    }
}

impl Default for InventoryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_references_products() {
        let inventory_gen = InventoryGenerator::new().with_stock_range(5..=6);
        let mut rng = rand::thread_rng();
        let products: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        let records = inventory_gen.generate_batch(50, &products, &mut rng);
        assert_eq!(records.len(), 50);
        for record in &records {
            assert!(products.contains(&record.product_id));
            assert!((5..=6).contains(&record.stock_quantity));
        }
    }

    #[test]
    fn test_no_products() {
        let mut rng = rand::thread_rng();
        assert!(
            InventoryGenerator::new()
                .generate_batch(10, &[], &mut rng)
                .is_empty()
        );
    }
}
