//! Default seed script - fills every commerce table with synthetic rows
//!
//! Reads HOST, USER, PASSWORD and DATABASE (and optionally PORT) from the
//! environment or a `.env` file. Run with:
//! ```
//! cargo run -p commerce-seed --bin seed
//! ```

use commerce_seed::config::{DbConfig, SeedConfig};
use commerce_seed::db::{MemoryStore, Seeder};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Values in .env take precedence over the inherited environment
    dotenvy::dotenv_override().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;

    let summary = if config.dry_run {
        tracing::info!("Dry run: seeding into memory");
        let mut seeder = Seeder::new(MemoryStore::new(), config);
        seeder.seed_all().await?
    } else {
        let db = DbConfig::from_env()?;
        tracing::info!("Using database settings {:?}", db);

        let mut seeder = Seeder::connect(&db, config).await?;
        let summary = seeder.seed_all().await?;
        seeder.into_store().close().await?;
        summary
    };

    summary.log();

    Ok(())
}
