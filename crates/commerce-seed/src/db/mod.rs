//! Database integration for seeding.
//!
//! The [`Seeder`] generates rows and writes them through a [`SeedStore`]:
//! [`MySqlStore`] holds a single MySQL connection, [`MemoryStore`] keeps rows
//! in process and enforces the schema's keys for tests and dry runs.

mod memory;
mod mysql;
mod seeder;
mod store;
mod summary;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;
pub use seeder::{SeedError, Seeder};
pub use store::{QueryError, Row, SeedRow, SeedStore, Table};
pub use summary::{SeedSummary, TableSummary};
