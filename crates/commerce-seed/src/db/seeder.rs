//! Database seeding orchestration.

use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::mysql::MySqlStore;
use super::store::{QueryError, Row, SeedRow, SeedStore, Table};
use super::summary::{SeedSummary, TableSummary};
use crate::config::{ConfigError, DbConfig, IdSource, ProductSeed, SeedConfig};
use crate::generators::{
    CustomerGenerator, InventoryGenerator, OrderGenerator, OrderItemGenerator, ProductGenerator,
    ShipmentGenerator,
};

/// Fatal errors. Failed inserts are not among them: see [`QueryError`].
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to read {table} identifiers: {source}")]
    FetchIds {
        table: Table,
        #[source]
        source: QueryError,
    },
}

/// Seeding context: the store, the random source and the running summary.
pub struct Seeder<S> {
    store: S,
    rng: StdRng,
    config: SeedConfig,
    summary: SeedSummary,
}

impl Seeder<MySqlStore> {
    /// Connects to MySQL and returns a seeder bound to that single connection.
    pub async fn connect(db: &DbConfig, config: SeedConfig) -> Result<Self, SeedError> {
        let store = MySqlStore::connect(db).await?;
        Ok(Self::new(store, config))
    }
}

impl<S: SeedStore> Seeder<S> {
    pub fn new(store: S, config: SeedConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            store,
            rng,
            config,
            summary: SeedSummary::default(),
        }
    }

    /// Counts recorded by the last aborted run. Empty after a completed one.
    pub fn summary(&self) -> &SeedSummary {
        &self.summary
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Inserts one row, logging and returning the error if it fails.
    pub async fn insert_row(&mut self, row: Row<'_>) -> Result<(), QueryError> {
        let result = self.store.insert(row).await;
        if let Err(e) = &result {
            warn!("Insert into {} failed for {}: {e}", row.table(), row.id());
        }
        result
    }

    /// Seeds every table in foreign key dependency order.
    ///
    /// Failed inserts are counted in the returned summary and the run carries
    /// on. Only failing to read parent identifiers back aborts it, in which
    /// case the partial counts are logged and kept in [`Seeder::summary`].
    pub async fn seed_all(&mut self) -> Result<SeedSummary, SeedError> {
        let started = Instant::now();
        self.summary = SeedSummary::default();

        let result = self.seed_tables().await;
        self.summary.elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(()) => Ok(std::mem::take(&mut self.summary)),
            Err(e) => {
                error!("Seed aborted: {e}");
                self.summary.log();
                Err(e)
            }
        }
    }

    async fn seed_tables(&mut self) -> Result<(), SeedError> {
        let today = OffsetDateTime::now_utc().date();

        info!(
            "Seeding with {:?} identifiers (customers: {}, orders: {}, order items: {}, inventory: {}, shipments: {})",
            self.config.id_source,
            self.config.customers,
            self.config.orders,
            self.config.order_items,
            self.config.inventory,
            self.config.shipments,
        );

        let inserted_products = match self.config.products {
            ProductSeed::Catalog => {
                let mut catalog = ProductGenerator::catalog().into_iter();
                let count = catalog.len();
                self.seed_table(Table::Products, count, |_| catalog.next())
                    .await
            }
            ProductSeed::Random(count) => {
                let product_gen = ProductGenerator::new();
                self.seed_table(Table::Products, count, |rng| {
                    Some(product_gen.generate(rng))
                })
                .await
            }
        };

        let customer_gen = CustomerGenerator::new();
        let inserted_customers = self
            .seed_table(Table::Customers, self.config.customers, |rng| {
                Some(customer_gen.generate(rng))
            })
            .await;

        let customer_ids = self
            .parent_ids(Table::Customers, inserted_customers)
            .await?;
        let order_gen = OrderGenerator::new();
        let inserted_orders = self
            .seed_table(Table::Orders, self.config.orders, |rng| {
                order_gen.generate(&customer_ids, rng)
            })
            .await;
        drop(customer_ids);

        let order_ids = self
            .parent_ids(Table::Orders, inserted_orders.clone())
            .await?;
        let product_ids = self
            .parent_ids(Table::Products, inserted_products.clone())
            .await?;
        let item_gen = OrderItemGenerator::new();
        self.seed_table(Table::OrderItems, self.config.order_items, |rng| {
            item_gen.generate(&order_ids, &product_ids, rng)
        })
        .await;

        let product_ids = self.parent_ids(Table::Products, inserted_products).await?;
        let inventory_gen = InventoryGenerator::new();
        self.seed_table(Table::Inventory, self.config.inventory, |rng| {
            inventory_gen.generate(&product_ids, rng)
        })
        .await;

        let order_ids = self.parent_ids(Table::Orders, inserted_orders).await?;
        let shipment_gen = ShipmentGenerator::new();
        self.seed_table(Table::Shipments, self.config.shipments, |rng| {
            shipment_gen.generate(&order_ids, today, rng)
        })
        .await;

        Ok(())
    }

    /// Generates and inserts up to `count` rows into `table`, one at a time.
    ///
    /// Returns the identifiers of rows that were inserted. Stops early when
    /// `make` yields nothing, which happens when a parent table is empty.
    async fn seed_table<T, F>(&mut self, table: Table, count: usize, mut make: F) -> Vec<Uuid>
    where
        T: SeedRow,
        F: FnMut(&mut StdRng) -> Option<T>,
    {
        info!("Seeding {count} rows into {table}...");

        let started = Instant::now();
        let mut stats = TableSummary::new(table);
        let mut inserted = Vec::new();

        for _ in 0..count {
            let Some(record) = make(&mut self.rng) else {
                warn!("No parent rows available for {table}; skipping remaining rows");
                break;
            };

            stats.attempted += 1;
            match self.insert_row(record.row()).await {
                Ok(()) => {
                    stats.inserted += 1;
                    inserted.push(record.id());
                }
                Err(_) => stats.failed += 1,
            }

            let interval = self.config.progress_interval;
            if interval > 0 && stats.attempted % interval == 0 {
                info!("  Seeded {}/{count} rows into {table}", stats.attempted);
            }
        }

        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            "Seeded {table}: {} inserted, {} failed",
            stats.inserted, stats.failed
        );
        self.summary.tables.push(stats);

        inserted
    }

    /// Resolves the parent identifiers for a dependent phase.
    async fn parent_ids(
        &mut self,
        table: Table,
        inserted: Vec<Uuid>,
    ) -> Result<Vec<Uuid>, SeedError> {
        let ids = match self.config.id_source {
            IdSource::Generated => inserted,
            IdSource::Database => self
                .store
                .fetch_ids(table)
                .await
                .map_err(|source| SeedError::FetchIds { table, source })?,
        };

        debug!("Resolved {} {table} identifiers", ids.len());
        Ok(ids)
    }
}
