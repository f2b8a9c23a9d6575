//! Per-run insert accounting.

use serde::Serialize;
use tracing::info;

use super::store::Table;

/// Outcome of seeding one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub table: Table,
    /// Rows generated and sent to the store.
    pub attempted: usize,
    pub inserted: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
}

impl TableSummary {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            attempted: 0,
            inserted: 0,
            failed: 0,
            elapsed_ms: 0,
        }
    }
}

/// Outcome of a whole seeding run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedSummary {
    /// One entry per seeded table, in seeding order.
    pub tables: Vec<TableSummary>,
    pub elapsed_ms: u64,
}

impl SeedSummary {
    pub fn table(&self, table: Table) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.table == table)
    }

    pub fn total_attempted(&self) -> usize {
        self.tables.iter().map(|t| t.attempted).sum()
    }

    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.tables.iter().map(|t| t.failed).sum()
    }

    /// Writes the summary to the log.
    pub fn log(&self) {
        info!("Seed summary after {} ms", self.elapsed_ms);
        for t in &self.tables {
            info!(
                "  {}: {} inserted, {} failed ({} ms)",
                t.table, t.inserted, t.failed, t.elapsed_ms
            );
        }
        info!(
            "  Total: {} inserted, {} failed",
            self.total_inserted(),
            self.total_failed()
        );
    }
}
