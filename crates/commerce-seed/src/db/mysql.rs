//! MySQL-backed store holding a single connection.

use async_trait::async_trait;
use sqlx::{Connection, MySqlConnection};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::seeder::SeedError;
use super::store::{QueryError, Row, SeedStore, Table};
use crate::config::DbConfig;

const INSERT_PRODUCT: &str = r#"
    INSERT INTO PRODUCTS (ProductID, ProductName, SKU, Price, StockQuantity)
    VALUES (?, ?, ?, ?, ?)
"#;

const INSERT_CUSTOMER: &str = r#"
    INSERT INTO CUSTOMERS (CustomerID, FirstName, LastName, Email, Phone, Address)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

const INSERT_ORDER: &str = r#"
    INSERT INTO ORDERS (OrderID, CustomerID, Status, TotalAmount)
    VALUES (?, ?, ?, ?)
"#;

const INSERT_ORDER_ITEM: &str = r#"
    INSERT INTO ORDER_ITEMS (OrderItemID, OrderID, ProductID, Quantity, Price)
    VALUES (?, ?, ?, ?, ?)
"#;

const INSERT_INVENTORY: &str = r#"
    INSERT INTO INVENTORY (InventoryID, ProductID, StockQuantity)
    VALUES (?, ?, ?)
"#;

const INSERT_SHIPMENT: &str = r#"
    INSERT INTO SHIPMENTS (ShipmentID, OrderID, ShipmentDate, Status)
    VALUES (?, ?, ?, ?)
"#;

/// Store writing to MySQL over exactly one connection.
///
/// Identifiers are bound as hyphenated UUID text. Every statement runs in
/// autocommit mode, so each row is its own unit of work.
pub struct MySqlStore {
    conn: MySqlConnection,
}

impl MySqlStore {
    /// Opens the connection described by `config`.
    pub async fn connect(config: &DbConfig) -> Result<Self, SeedError> {
        match MySqlConnection::connect_with(&config.connect_options()).await {
            Ok(conn) => {
                info!(
                    host = %config.host,
                    database = %config.database,
                    "Connected to MySQL database"
                );
                Ok(Self { conn })
            }
            Err(e) => {
                error!(host = %config.host, port = config.port, "Connection failed: {e}");
                Err(SeedError::Connection(e))
            }
        }
    }

    /// Closes the connection gracefully.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}

#[async_trait]
impl SeedStore for MySqlStore {
    async fn insert(&mut self, row: Row<'_>) -> Result<(), QueryError> {
        let query = match row {
            Row::Product(p) => sqlx::query(INSERT_PRODUCT)
                .bind(p.id.to_string())
                .bind(&p.name)
                .bind(&p.sku)
                .bind(p.price)
                .bind(p.stock_quantity),
            Row::Customer(c) => sqlx::query(INSERT_CUSTOMER)
                .bind(c.id.to_string())
                .bind(&c.first_name)
                .bind(&c.last_name)
                .bind(&c.email)
                .bind(&c.phone)
                .bind(&c.address),
            Row::Order(o) => sqlx::query(INSERT_ORDER)
                .bind(o.id.to_string())
                .bind(o.customer_id.to_string())
                .bind(o.status.as_str())
                .bind(o.total_amount),
            Row::OrderItem(i) => sqlx::query(INSERT_ORDER_ITEM)
                .bind(i.id.to_string())
                .bind(i.order_id.to_string())
                .bind(i.product_id.to_string())
                .bind(i.quantity)
                .bind(i.price),
            Row::Inventory(r) => sqlx::query(INSERT_INVENTORY)
                .bind(r.id.to_string())
                .bind(r.product_id.to_string())
                .bind(r.stock_quantity),
            Row::Shipment(s) => sqlx::query(INSERT_SHIPMENT)
                .bind(s.id.to_string())
                .bind(s.order_id.to_string())
                .bind(s.shipment_date)
                .bind(s.status.as_str()),
        };

        query.execute(&mut self.conn).await?;
        Ok(())
    }

    async fn fetch_ids(&mut self, table: Table) -> Result<Vec<Uuid>, QueryError> {
        let sql = format!("SELECT {} FROM {}", table.id_column(), table.name());
        let raw: Vec<String> = sqlx::query_scalar(&sql)
            .fetch_all(&mut self.conn)
            .await?;

        let ids = raw
            .iter()
            .filter_map(|value| match Uuid::parse_str(value) {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring non-UUID {} value {value:?} in {table}", table.id_column());
                    None
                }
            })
            .collect();

        Ok(ids)
    }
}
