//! End-to-end seeding runs against the in-memory store.
//!
//! The memory store rejects duplicate keys and dangling foreign keys the same
//! way the MySQL schema does, so a run with zero failures demonstrates that
//! every generated reference points at an earlier row.

use std::collections::HashSet;

use async_trait::async_trait;
use commerce_seed::prelude::*;
use uuid::Uuid;

/// Memory store that rejects every `every`-th insert and, optionally, every
/// identifier lookup.
struct UnreliableStore {
    inner: MemoryStore,
    every: usize,
    inserts: usize,
    fail_fetch: bool,
}

impl UnreliableStore {
    fn failing_every(every: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            every,
            inserts: 0,
            fail_fetch: false,
        }
    }

    fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Self::failing_every(0)
        }
    }
}

#[async_trait]
impl SeedStore for UnreliableStore {
    async fn insert(&mut self, row: Row<'_>) -> Result<(), QueryError> {
        self.inserts += 1;
        if self.every > 0 && self.inserts % self.every == 0 {
            return Err(QueryError::Database(sqlx::Error::Protocol(
                "connection reset".to_string(),
            )));
        }
        self.inner.insert(row).await
    }

    async fn fetch_ids(&mut self, table: Table) -> Result<Vec<Uuid>, QueryError> {
        if self.fail_fetch {
            return Err(QueryError::Database(sqlx::Error::Protocol(format!(
                "lost connection reading {table}"
            ))));
        }
        self.inner.fetch_ids(table).await
    }
}

async fn seed(config: SeedConfig) -> (SeedSummary, MemoryStore) {
    let mut seeder = Seeder::new(MemoryStore::new(), config);
    let summary = seeder.seed_all().await.expect("seeding into memory never aborts");
    (summary, seeder.into_store())
}

#[tokio::test]
async fn test_zero_rows() {
    let (summary, store) = seed(SeedConfig::uniform(0)).await;

    assert_eq!(summary.total_attempted(), 0);
    assert_eq!(summary.total_inserted(), 0);
    assert_eq!(summary.total_failed(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_every_table_populated() {
    let (summary, store) = seed(SeedConfig::uniform(40).with_seed(1)).await;

    assert_eq!(summary.total_failed(), 0);
    for table in Table::SEED_ORDER {
        assert_eq!(store.len(table), 40, "{table} should hold 40 rows");
        assert_eq!(summary.table(table).unwrap().inserted, 40);
    }
}

#[tokio::test]
async fn test_customer_ids_and_emails_unique() {
    let (_, store) = seed(SeedConfig::uniform(300)).await;

    let ids: HashSet<Uuid> = store.customers().iter().map(|c| c.id).collect();
    let emails: HashSet<&str> = store.customers().iter().map(|c| c.email.as_str()).collect();

    assert_eq!(ids.len(), 300);
    assert_eq!(emails.len(), 300);
}

#[tokio::test]
async fn test_foreign_keys_reference_existing_rows() {
    for id_source in [IdSource::Database, IdSource::Generated] {
        let config = SeedConfig::uniform(60).with_id_source(id_source);
        let (summary, store) = seed(config).await;
        assert_eq!(summary.total_failed(), 0, "{id_source:?}");

        let customers: HashSet<Uuid> = store.customers().iter().map(|c| c.id).collect();
        let products: HashSet<Uuid> = store.products().iter().map(|p| p.id).collect();
        let orders: HashSet<Uuid> = store.orders().iter().map(|o| o.id).collect();

        for order in store.orders() {
            assert!(customers.contains(&order.customer_id));
        }
        for item in store.order_items() {
            assert!(orders.contains(&item.order_id));
            assert!(products.contains(&item.product_id));
        }
        for record in store.inventory() {
            assert!(products.contains(&record.product_id));
        }
        for shipment in store.shipments() {
            assert!(orders.contains(&shipment.order_id));
        }
    }
}

#[tokio::test]
async fn test_default_catalog_feeds_dependents() {
    let config = SeedConfig::default().with_rows(25);
    let (summary, store) = seed(config).await;

    assert_eq!(store.products().len(), 3);
    assert_eq!(store.order_items().len(), 25);
    assert_eq!(store.inventory().len(), 25);
    assert_eq!(summary.total_failed(), 0);

    let catalog: HashSet<Uuid> = store.products().iter().map(|p| p.id).collect();
    assert!(store.inventory().iter().all(|r| catalog.contains(&r.product_id)));
}

#[tokio::test]
async fn test_two_runs_have_disjoint_ids() {
    let mut seeder = Seeder::new(MemoryStore::new(), SeedConfig::uniform(50));

    let first = seeder.seed_all().await.unwrap();
    let first_customers: HashSet<Uuid> =
        seeder.store().customers().iter().map(|c| c.id).collect();
    let first_orders: HashSet<Uuid> = seeder.store().orders().iter().map(|o| o.id).collect();

    let second = seeder.seed_all().await.unwrap();

    // Any reused identifier would have been rejected as a duplicate key
    assert_eq!(first.total_failed(), 0);
    assert_eq!(second.total_failed(), 0);
    assert_eq!(second.total_inserted(), first.total_inserted());

    let second_customers: HashSet<Uuid> = seeder.store().customers()[50..]
        .iter()
        .map(|c| c.id)
        .collect();
    let second_orders: HashSet<Uuid> = seeder.store().orders()[50..]
        .iter()
        .map(|o| o.id)
        .collect();

    assert!(first_customers.is_disjoint(&second_customers));
    assert!(first_orders.is_disjoint(&second_orders));
}

#[tokio::test]
async fn test_database_ids_include_prior_rows() {
    let mut store = MemoryStore::new();
    let mut rng = rand::thread_rng();

    // A customer that already existed before the run
    let existing = CustomerGenerator::new().generate(&mut rng);
    store.insert(existing.row()).await.unwrap();

    let config = SeedConfig {
        orders: 200,
        ..SeedConfig::uniform(0)
    };
    let mut seeder = Seeder::new(store, config);
    let summary = seeder.seed_all().await.unwrap();

    assert_eq!(summary.table(Table::Orders).unwrap().inserted, 200);
    assert!(
        seeder
            .store()
            .orders()
            .iter()
            .all(|o| o.customer_id == existing.id)
    );
}

#[tokio::test]
async fn test_generated_ids_ignore_prior_rows() {
    let mut store = MemoryStore::new();
    let mut rng = rand::thread_rng();

    let existing = CustomerGenerator::new().generate(&mut rng);
    store.insert(existing.row()).await.unwrap();

    let config = SeedConfig {
        orders: 10,
        ..SeedConfig::uniform(0).with_id_source(IdSource::Generated)
    };
    let mut seeder = Seeder::new(store, config);
    let summary = seeder.seed_all().await.unwrap();

    // No customers were inserted by this run, so there is nothing to reference
    assert_eq!(summary.table(Table::Orders).unwrap().attempted, 0);
    assert!(seeder.store().orders().is_empty());
}

#[tokio::test]
async fn test_failed_inserts_are_counted_and_skipped() {
    for id_source in [IdSource::Database, IdSource::Generated] {
        let config = SeedConfig::uniform(30).with_id_source(id_source);
        let mut seeder = Seeder::new(UnreliableStore::failing_every(3), config);

        let summary = seeder
            .seed_all()
            .await
            .expect("failed inserts must not abort the run");
        let store = seeder.into_store().inner;

        assert!(summary.total_failed() > 0, "{id_source:?}");
        assert_eq!(
            summary.total_attempted(),
            summary.total_inserted() + summary.total_failed()
        );

        for table in Table::SEED_ORDER {
            let stats = summary.table(table).unwrap();
            assert_eq!(stats.attempted, 30, "{id_source:?} {table}");
            assert_eq!(store.len(table), stats.inserted, "{id_source:?} {table}");
        }

        // Rows that failed to insert are never used as parents
        let customers: HashSet<Uuid> = store.customers().iter().map(|c| c.id).collect();
        assert!(store.orders().iter().all(|o| customers.contains(&o.customer_id)));
    }
}

#[tokio::test]
async fn test_failed_lookup_keeps_partial_summary() {
    let config = SeedConfig::uniform(8);
    let mut seeder = Seeder::new(UnreliableStore::failing_fetch(), config);

    let err = seeder.seed_all().await.unwrap_err();
    assert!(matches!(
        err,
        SeedError::FetchIds {
            table: Table::Customers,
            ..
        }
    ));

    let partial = seeder.summary();
    let seeded: Vec<Table> = partial.tables.iter().map(|t| t.table).collect();
    assert_eq!(seeded, [Table::Products, Table::Customers]);
    assert_eq!(partial.total_inserted(), 16);
    assert_eq!(seeder.store().inner.customers().len(), 8);
}

#[tokio::test]
async fn test_completed_run_clears_summary() {
    let mut seeder = Seeder::new(MemoryStore::new(), SeedConfig::uniform(2));

    let summary = seeder.seed_all().await.unwrap();

    assert_eq!(summary.total_inserted(), 12);
    assert!(seeder.summary().tables.is_empty());
}
