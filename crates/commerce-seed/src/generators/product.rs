//! Product generation, including the fixed starter catalog.

use std::ops::RangeInclusive;

use fake::{Fake, faker::lorem::en::Words};
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{amount, sku_for};

/// Generated product ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedProduct {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// Configuration for product generation.
#[derive(Debug, Clone)]
pub struct ProductGenConfig {
    /// Price range in cents.
    pub price_cents: RangeInclusive<i64>,
    /// Initial stock range.
    pub stock: RangeInclusive<i32>,
}

impl Default for ProductGenConfig {
    fn default() -> Self {
        Self {
            price_cents: 100..=50_000,
            stock: 0..=1000,
        }
    }
}

/// Generates products.
pub struct ProductGenerator {
    config: ProductGenConfig,
}

impl ProductGenerator {
    pub fn new() -> Self {
        Self {
            config: ProductGenConfig::default(),
        }
    }

    pub fn with_config(config: ProductGenConfig) -> Self {
        Self { config }
    }

    /// Returns the three hand-picked products seeded by default.
    ///
    /// Identifiers are fresh on every call so repeated runs never collide.
    pub fn catalog() -> Vec<GeneratedProduct> {
        [
            ("Wireless Mouse", 2499, 150),
            ("Mechanical Keyboard", 8950, 75),
            ("USB-C Hub", 3900, 200),
        ]
        .into_iter()
        .map(|(name, cents, stock)| {
            let id = Uuid::new_v4();
            GeneratedProduct {
                id,
                name: name.to_string(),
                sku: sku_for(id),
                price: Decimal::new(cents, 2),
                stock_quantity: stock,
            }
        })
        .collect()
    }

    /// Generates a single product.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedProduct {
        let id = Uuid::new_v4();
        let words: Vec<String> = Words(2..4).fake_with_rng(rng);

        GeneratedProduct {
            id,
            name: title_case(&words),
            sku: sku_for(id),
            price: amount(self.config.price_cents.clone(), rng),
            stock_quantity: rng.gen_range(self.config.stock.clone()),
        }
    }

    /// Generates multiple products.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedProduct> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl Default for ProductGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn title_case(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
