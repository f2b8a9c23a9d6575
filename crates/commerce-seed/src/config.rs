//! Configuration types for seeding runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;

/// Row count used for every table unless overridden.
pub const DEFAULT_ROW_COUNT: usize = 500_000;

/// Default MySQL port.
pub const DEFAULT_PORT: u16 = 3306;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Database credentials, read from HOST, USER, PASSWORD, DATABASE and PORT.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Sets the server port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Reads credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let host = required("HOST")?;
        let user = required("USER")?;
        let database = required("DATABASE")?;
        let password = lookup("PASSWORD").unwrap_or_default();
        let port = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
        })
    }

    /// Builds sqlx connection options for this configuration.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Where dependent phases take their parent identifiers from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSource {
    /// Re-select the identifier column from the store before each dependent phase.
    #[default]
    Database,
    /// Reuse the identifiers of rows inserted successfully during this run.
    Generated,
}

impl FromStr for IdSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(IdSource::Database),
            "generated" | "memory" => Ok(IdSource::Generated),
            _ => Err(()),
        }
    }
}

/// How the PRODUCTS table is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductSeed {
    /// The fixed three-product catalog.
    Catalog,
    /// Randomly generated products.
    Random(usize),
}

/// Configuration for a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub customers: usize,
    pub products: ProductSeed,
    pub orders: usize,
    pub order_items: usize,
    pub inventory: usize,
    pub shipments: usize,

    /// Source of foreign keys for dependent tables.
    pub id_source: IdSource,

    /// Seed for field values. Identifiers always come from UUIDv4.
    pub rng_seed: Option<u64>,

    /// Log progress every this many rows per table (0 disables).
    pub progress_interval: usize,

    /// Seed into an in-memory store instead of connecting.
    pub dry_run: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            customers: DEFAULT_ROW_COUNT,
            products: ProductSeed::Catalog,
            orders: DEFAULT_ROW_COUNT,
            order_items: DEFAULT_ROW_COUNT,
            inventory: DEFAULT_ROW_COUNT,
            shipments: DEFAULT_ROW_COUNT,
            id_source: IdSource::default(),
            rng_seed: None,
            progress_interval: 10_000,
            dry_run: false,
        }
    }
}

impl SeedConfig {
    /// Uses the same row count for every table, products included.
    pub fn uniform(count: usize) -> Self {
        Self {
            products: ProductSeed::Random(count),
            ..Self::default().with_rows(count)
        }
    }

    /// Sets the row count of every table except PRODUCTS.
    pub fn with_rows(mut self, count: usize) -> Self {
        self.customers = count;
        self.orders = count;
        self.order_items = count;
        self.inventory = count;
        self.shipments = count;
        self
    }

    pub fn with_products(mut self, products: ProductSeed) -> Self {
        self.products = products;
        self
    }

    pub fn with_id_source(mut self, id_source: IdSource) -> Self {
        self.id_source = id_source;
        self
    }

    /// Sets the random seed for reproducible field values.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows;
        self
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through an arbitrary variable lookup.
    ///
    /// Recognized variables: `SEED_ROWS`, `SEED_PRODUCTS`, `SEED_RNG_SEED`,
    /// `SEED_ID_SOURCE`, `SEED_PROGRESS_INTERVAL` and `SEED_DRY_RUN`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(rows) = parse_var(&lookup, "SEED_ROWS")? {
            config = config.with_rows(rows);
        }
        if let Some(products) = parse_var(&lookup, "SEED_PRODUCTS")? {
            config.products = ProductSeed::Random(products);
        }
        if let Some(id_source) = parse_var(&lookup, "SEED_ID_SOURCE")? {
            config.id_source = id_source;
        }
        if let Some(interval) = parse_var(&lookup, "SEED_PROGRESS_INTERVAL")? {
            config.progress_interval = interval;
        }
        config.rng_seed = parse_var(&lookup, "SEED_RNG_SEED")?;
        config.dry_run = parse_flag(&lookup, "SEED_DRY_RUN")?;

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::Invalid { name, value: raw }),
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
