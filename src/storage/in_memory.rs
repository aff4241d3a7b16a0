//! In-memory record store for testing and ephemeral runs

use crate::core::clock;
use crate::core::error::{RecordError, SuiteError, SuiteResult};
use crate::core::record::{
    Customer, CustomerPatch, DeletePolicy, NewCustomer, NewSalesOrder, RecordKind, SalesOrder,
};
use crate::core::service::{CustomerService, RecordStore, SalesOrderService};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    sales_orders: BTreeMap<i64, SalesOrder>,
    next_customer_id: i64,
    next_sales_order_id: i64,
}

impl Tables {
    fn allocate_customer_id(&mut self) -> i64 {
        self.next_customer_id += 1;
        self.next_customer_id
    }

    fn allocate_sales_order_id(&mut self) -> i64 {
        self.next_sales_order_id += 1;
        self.next_sales_order_id
    }
}

/// In-memory record store
///
/// Same semantics as the SQLite backend: ids start at 1 and are never
/// reused, listing is in id order. One `RwLock` guards both tables so the
/// customer check and the order insert happen under the same write guard.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SuiteResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| SuiteError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> SuiteResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| SuiteError::Internal(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl CustomerService for InMemoryRecordStore {
    async fn create_customer(&self, input: NewCustomer) -> SuiteResult<Customer> {
        let mut tables = self.write()?;
        let id = tables.allocate_customer_id();
        let customer = input.into_customer(id, clock::now_timestamp());
        tables.customers.insert(id, customer.clone());
        tracing::debug!(record_id = id, entity_id = %customer.entity_id, "customer created");
        Ok(customer)
    }

    async fn list_customers(&self) -> SuiteResult<Vec<Customer>> {
        Ok(self.read()?.customers.values().cloned().collect())
    }

    async fn get_customer(&self, id: i64) -> SuiteResult<Customer> {
        self.read()?
            .customers
            .get(&id)
            .cloned()
            .ok_or_else(|| SuiteError::not_found(RecordKind::Customer, id))
    }

    async fn update_customer(&self, id: i64, patch: CustomerPatch) -> SuiteResult<Customer> {
        let mut tables = self.write()?;
        let customer = tables
            .customers
            .get_mut(&id)
            .ok_or_else(|| SuiteError::not_found(RecordKind::Customer, id))?;
        customer.apply_update(&patch, &clock::now_timestamp());
        tracing::debug!(record_id = id, status = %customer.status, "customer updated");
        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: i64, policy: DeletePolicy) -> SuiteResult<()> {
        let mut tables = self.write()?;
        if !tables.customers.contains_key(&id) {
            return Err(SuiteError::not_found(RecordKind::Customer, id));
        }

        match policy {
            DeletePolicy::Orphan => {}
            DeletePolicy::Restrict => {
                let dependents = tables
                    .sales_orders
                    .values()
                    .filter(|order| order.entity == id)
                    .count();
                if dependents > 0 {
                    return Err(RecordError::Referenced {
                        kind: RecordKind::Customer,
                        id,
                        dependents: dependents as u64,
                    }
                    .into());
                }
            }
            DeletePolicy::Cascade => {
                let before = tables.sales_orders.len();
                tables.sales_orders.retain(|_, order| order.entity != id);
                let removed = before - tables.sales_orders.len();
                tracing::debug!(record_id = id, removed, "cascaded sales order delete");
            }
        }

        tables.customers.remove(&id);
        tracing::debug!(record_id = id, ?policy, "customer deleted");
        Ok(())
    }
}

#[async_trait]
impl SalesOrderService for InMemoryRecordStore {
    async fn create_sales_order(&self, input: NewSalesOrder) -> SuiteResult<SalesOrder> {
        let mut tables = self.write()?;
        if !tables.customers.contains_key(&input.entity) {
            return Err(RecordError::InvalidReference {
                kind: RecordKind::Customer,
                field: "entity",
                id: input.entity,
            }
            .into());
        }

        let id = tables.allocate_sales_order_id();
        let order = input.into_sales_order(id, &clock::today());
        tables.sales_orders.insert(id, order.clone());
        tracing::debug!(record_id = id, tran_id = %order.tran_id, entity = order.entity, "sales order created");
        Ok(order)
    }

    async fn list_sales_orders(&self) -> SuiteResult<Vec<SalesOrder>> {
        Ok(self.read()?.sales_orders.values().cloned().collect())
    }

    async fn get_sales_order(&self, id: i64) -> SuiteResult<SalesOrder> {
        self.read()?
            .sales_orders
            .get(&id)
            .cloned()
            .ok_or_else(|| SuiteError::not_found(RecordKind::SalesOrder, id))
    }

    async fn bill_sales_order(&self, id: i64) -> SuiteResult<SalesOrder> {
        let mut tables = self.write()?;
        let order = tables
            .sales_orders
            .get_mut(&id)
            .ok_or_else(|| SuiteError::not_found(RecordKind::SalesOrder, id))?;
        order.apply_update(&clock::now_timestamp());
        tracing::debug!(record_id = id, "sales order billed");
        Ok(order.clone())
    }

    async fn delete_sales_order(&self, id: i64) -> SuiteResult<()> {
        self.write()?
            .sales_orders
            .remove(&id)
            .ok_or_else(|| SuiteError::not_found(RecordKind::SalesOrder, id))?;
        tracing::debug!(record_id = id, "sales order deleted");
        Ok(())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}
