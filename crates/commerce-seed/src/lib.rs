//! Synthetic seed data for the commerce schema.
//!
//! This crate fills the CUSTOMERS, PRODUCTS, ORDERS, ORDER_ITEMS, INVENTORY and
//! SHIPMENTS tables with randomized rows for load testing. Rows are inserted one
//! at a time over a single connection, in foreign key dependency order.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use commerce_seed::prelude::*;
//!
//! let db = DbConfig::from_env()?;
//! let mut seeder = Seeder::connect(&db, SeedConfig::uniform(1000)).await?;
//! let summary = seeder.seed_all().await?;
//! summary.log();
//! ```

pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, DbConfig, IdSource, ProductSeed, SeedConfig};
    pub use crate::db::{
        MemoryStore, MySqlStore, QueryError, Row, SeedError, SeedRow, SeedStore, SeedSummary,
        Seeder, Table, TableSummary,
    };
    pub use crate::generators::{
        CustomerGenerator, GeneratedCustomer, GeneratedInventory, GeneratedOrder,
        GeneratedOrderItem, GeneratedProduct, GeneratedShipment, InventoryGenerator,
        OrderGenerator, OrderItemGenerator, OrderStatus, ProductGenerator, ShipmentGenerator,
        ShipmentStatus,
    };
}
