//! In-process store that enforces the schema's keys.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use uuid::Uuid;

use super::store::{QueryError, Row, SeedStore, Table};
use crate::generators::{
    GeneratedCustomer, GeneratedInventory, GeneratedOrder, GeneratedOrderItem, GeneratedProduct,
    GeneratedShipment,
};

/// Keeps seeded rows in memory.
///
/// Inserts are rejected the way the MySQL schema would reject them: duplicate
/// primary keys, duplicate customer emails and dangling foreign keys all fail
/// with a [`QueryError`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: HashMap<Table, HashSet<Uuid>>,
    emails: HashSet<String>,
    products: Vec<GeneratedProduct>,
    customers: Vec<GeneratedCustomer>,
    orders: Vec<GeneratedOrder>,
    order_items: Vec<GeneratedOrderItem>,
    inventory: Vec<GeneratedInventory>,
    shipments: Vec<GeneratedShipment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[GeneratedProduct] {
        &self.products
    }

    pub fn customers(&self) -> &[GeneratedCustomer] {
        &self.customers
    }

    pub fn orders(&self) -> &[GeneratedOrder] {
        &self.orders
    }

    pub fn order_items(&self) -> &[GeneratedOrderItem] {
        &self.order_items
    }

    pub fn inventory(&self) -> &[GeneratedInventory] {
        &self.inventory
    }

    pub fn shipments(&self) -> &[GeneratedShipment] {
        &self.shipments
    }

    /// Number of rows stored in `table`.
    pub fn len(&self, table: Table) -> usize {
        self.keys.get(&table).map_or(0, HashSet::len)
    }

    /// Total rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.keys.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }

    /// Returns true if `table` holds a row with primary key `id`.
    pub fn contains(&self, table: Table, id: Uuid) -> bool {
        self.keys.get(&table).is_some_and(|ids| ids.contains(&id))
    }

    fn ids(&self, table: Table) -> Vec<Uuid> {
        match table {
            Table::Products => self.products.iter().map(|r| r.id).collect(),
            Table::Customers => self.customers.iter().map(|r| r.id).collect(),
            Table::Orders => self.orders.iter().map(|r| r.id).collect(),
            Table::OrderItems => self.order_items.iter().map(|r| r.id).collect(),
            Table::Inventory => self.inventory.iter().map(|r| r.id).collect(),
            Table::Shipments => self.shipments.iter().map(|r| r.id).collect(),
        }
    }

    fn require(
        &self,
        table: Table,
        column: &'static str,
        parent: Table,
        id: Uuid,
    ) -> Result<(), QueryError> {
        if self.contains(parent, id) {
            Ok(())
        } else {
            Err(QueryError::MissingReference { table, column, id })
        }
    }

    fn store(&mut self, row: Row<'_>) -> Result<(), QueryError> {
        let table = row.table();
        let id = row.id();

        if self.contains(table, id) {
            return Err(QueryError::DuplicateKey {
                table,
                column: table.id_column(),
                value: id.to_string(),
            });
        }

        match row {
            Row::Product(p) => self.products.push(p.clone()),
            Row::Customer(c) => {
                if !self.emails.insert(c.email.clone()) {
                    return Err(QueryError::DuplicateKey {
                        table,
                        column: "Email",
                        value: c.email.clone(),
                    });
                }
                self.customers.push(c.clone());
            }
            Row::Order(o) => {
                self.require(table, "CustomerID", Table::Customers, o.customer_id)?;
                self.orders.push(o.clone());
            }
            Row::OrderItem(i) => {
                self.require(table, "OrderID", Table::Orders, i.order_id)?;
                self.require(table, "ProductID", Table::Products, i.product_id)?;
                self.order_items.push(i.clone());
            }
            Row::Inventory(r) => {
                self.require(table, "ProductID", Table::Products, r.product_id)?;
                self.inventory.push(r.clone());
            }
            Row::Shipment(s) => {
                self.require(table, "OrderID", Table::Orders, s.order_id)?;
                self.shipments.push(s.clone());
            }
        }

        self.keys.entry(table).or_default().insert(id);
        Ok(())
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn insert(&mut self, row: Row<'_>) -> Result<(), QueryError> {
        self.store(row)
    }

    async fn fetch_ids(&mut self, table: Table) -> Result<Vec<Uuid>, QueryError> {
        Ok(self.ids(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SeedRow;
    use crate::generators::{CustomerGenerator, OrderGenerator, ProductGenerator};

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let mut store = MemoryStore::new();
        let mut rng = rand::thread_rng();
        let customers = CustomerGenerator::new().generate_batch(3, &mut rng);

        for customer in &customers {
            store.insert(customer.row()).await.unwrap();
        }

        let ids = store.fetch_ids(Table::Customers).await.unwrap();
        assert_eq!(ids, customers.iter().map(|c| c.id).collect::<Vec<_>>());
        assert_eq!(store.len(Table::Customers), 3);
        assert!(store.fetch_ids(Table::Orders).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_primary_key() {
        let mut store = MemoryStore::new();
        let product = ProductGenerator::catalog().remove(0);

        store.insert(product.row()).await.unwrap();
        let err = store.insert(product.row()).await.unwrap_err();

        assert!(matches!(
            err,
            QueryError::DuplicateKey {
                table: Table::Products,
                column: "ProductID",
                ..
            }
        ));
        assert_eq!(store.len(Table::Products), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let mut store = MemoryStore::new();
        let mut rng = rand::thread_rng();
        let customer_gen = CustomerGenerator::new();

        let first = customer_gen.generate(&mut rng);
        let mut second = customer_gen.generate(&mut rng);
        second.email = first.email.clone();

        store.insert(first.row()).await.unwrap();
        let err = store.insert(second.row()).await.unwrap_err();

        assert!(matches!(err, QueryError::DuplicateKey { column: "Email", .. }));
        assert_eq!(store.customers().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_reference() {
        let mut store = MemoryStore::new();
        let mut rng = rand::thread_rng();
        let stranger = Uuid::new_v4();

        let order = OrderGenerator::new()
            .generate(&[stranger], &mut rng)
            .unwrap();
        let err = store.insert(order.row()).await.unwrap_err();

        assert!(matches!(
            err,
            QueryError::MissingReference {
                table: Table::Orders,
                column: "CustomerID",
                id,
            } if id == stranger
        ));
        assert!(store.is_empty());
    }
}
