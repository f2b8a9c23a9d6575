//! Tables, rows and the storage seam used by the seeder.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::generators::{
    GeneratedCustomer, GeneratedInventory, GeneratedOrder, GeneratedOrderItem, GeneratedProduct,
    GeneratedShipment,
};

/// Tables of the commerce schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Table {
    Products,
    Customers,
    Orders,
    OrderItems,
    Inventory,
    Shipments,
}

impl Table {
    /// Foreign key dependency order.
    pub const SEED_ORDER: [Table; 6] = [
        Table::Products,
        Table::Customers,
        Table::Orders,
        Table::OrderItems,
        Table::Inventory,
        Table::Shipments,
    ];

    /// Returns the SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Products => "PRODUCTS",
            Table::Customers => "CUSTOMERS",
            Table::Orders => "ORDERS",
            Table::OrderItems => "ORDER_ITEMS",
            Table::Inventory => "INVENTORY",
            Table::Shipments => "SHIPMENTS",
        }
    }

    /// Returns the primary key column.
    pub fn id_column(&self) -> &'static str {
        match self {
            Table::Products => "ProductID",
            Table::Customers => "CustomerID",
            Table::Orders => "OrderID",
            Table::OrderItems => "OrderItemID",
            Table::Inventory => "InventoryID",
            Table::Shipments => "ShipmentID",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single row destined for one table.
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    Product(&'a GeneratedProduct),
    Customer(&'a GeneratedCustomer),
    Order(&'a GeneratedOrder),
    OrderItem(&'a GeneratedOrderItem),
    Inventory(&'a GeneratedInventory),
    Shipment(&'a GeneratedShipment),
}

impl Row<'_> {
    pub fn table(&self) -> Table {
        match self {
            Row::Product(_) => Table::Products,
            Row::Customer(_) => Table::Customers,
            Row::Order(_) => Table::Orders,
            Row::OrderItem(_) => Table::OrderItems,
            Row::Inventory(_) => Table::Inventory,
            Row::Shipment(_) => Table::Shipments,
        }
    }

    /// Primary key of the row.
    pub fn id(&self) -> Uuid {
        match self {
            Row::Product(p) => p.id,
            Row::Customer(c) => c.id,
            Row::Order(o) => o.id,
            Row::OrderItem(i) => i.id,
            Row::Inventory(r) => r.id,
            Row::Shipment(s) => s.id,
        }
    }
}

/// Generated records that can be written as a [`Row`].
pub trait SeedRow {
    fn row(&self) -> Row<'_>;

    fn id(&self) -> Uuid {
        self.row().id()
    }
}

impl SeedRow for GeneratedProduct {
    fn row(&self) -> Row<'_> {
        Row::Product(self)
    }
}

impl SeedRow for GeneratedCustomer {
    fn row(&self) -> Row<'_> {
        Row::Customer(self)
    }
}

impl SeedRow for GeneratedOrder {
    fn row(&self) -> Row<'_> {
        Row::Order(self)
    }
}

impl SeedRow for GeneratedOrderItem {
    fn row(&self) -> Row<'_> {
        Row::OrderItem(self)
    }
}

impl SeedRow for GeneratedInventory {
    fn row(&self) -> Row<'_> {
        Row::Inventory(self)
    }
}

impl SeedRow for GeneratedShipment {
    fn row(&self) -> Row<'_> {
        Row::Shipment(self)
    }
}

/// A failed statement. Never fatal to a run: the row is skipped and counted.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Duplicate {column} in {table}: {value}")]
    DuplicateKey {
        table: Table,
        column: &'static str,
        value: String,
    },
    #[error("{table}.{column} references missing row {id}")]
    MissingReference {
        table: Table,
        column: &'static str,
        id: Uuid,
    },
}

/// Destination for seeded rows.
#[async_trait]
pub trait SeedStore: Send {
    /// Executes one insert.
    async fn insert(&mut self, row: Row<'_>) -> Result<(), QueryError>;

    /// Selects every primary key currently stored in `table`.
    async fn fetch_ids(&mut self, table: Table) -> Result<Vec<Uuid>, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::ProductGenerator;

    #[test]
    fn test_seed_order_starts_with_parents() {
        let position = |t: Table| Table::SEED_ORDER.iter().position(|&x| x == t).unwrap();

        assert!(position(Table::Products) < position(Table::OrderItems));
        assert!(position(Table::Customers) < position(Table::Orders));
        assert!(position(Table::Orders) < position(Table::OrderItems));
        assert!(position(Table::Products) < position(Table::Inventory));
        assert!(position(Table::Orders) < position(Table::Shipments));
    }

    #[test]
    fn test_row_identity() {
        let product = ProductGenerator::catalog().remove(0);
        let row = product.row();

        assert_eq!(row.table(), Table::Products);
        assert_eq!(row.id(), product.id);
        assert_eq!(SeedRow::id(&product), product.id);
        assert_eq!(row.table().to_string(), "PRODUCTS");
    }
}
