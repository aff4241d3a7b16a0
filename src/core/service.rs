//! Store contracts for the two record types
//!
//! Backends implement [`CustomerService`] and [`SalesOrderService`]; anything
//! implementing both is a [`RecordStore`] and can be handed to the server.
//! Every method is one logical operation: implementations acquire whatever
//! connection or lock they need inside the call and release it before
//! returning, on success and on error alike.

use crate::core::error::SuiteResult;
use crate::core::record::{
    Customer, CustomerPatch, DeletePolicy, NewCustomer, NewSalesOrder, SalesOrder,
};
use async_trait::async_trait;

/// Persistence contract for customers
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Insert a customer and assign its `CUST-{id}` identifier atomically
    async fn create_customer(&self, input: NewCustomer) -> SuiteResult<Customer>;

    /// All customers in store order
    async fn list_customers(&self) -> SuiteResult<Vec<Customer>>;

    /// Fails with `RecordError::NotFound` when absent
    async fn get_customer(&self, id: i64) -> SuiteResult<Customer>;

    /// Apply [`Customer::apply_update`] and persist the result
    async fn update_customer(&self, id: i64, patch: CustomerPatch) -> SuiteResult<Customer>;

    /// Remove a customer, treating its sales orders according to `policy`
    async fn delete_customer(&self, id: i64, policy: DeletePolicy) -> SuiteResult<()>;
}

/// Persistence contract for sales orders
#[async_trait]
pub trait SalesOrderService: Send + Sync {
    /// Insert an order and assign its `SO-{id}` identifier atomically.
    ///
    /// Fails with `RecordError::InvalidReference` and writes nothing when
    /// `input.entity` is not an existing customer id.
    async fn create_sales_order(&self, input: NewSalesOrder) -> SuiteResult<SalesOrder>;

    /// All sales orders in store order
    async fn list_sales_orders(&self) -> SuiteResult<Vec<SalesOrder>>;

    /// Fails with `RecordError::NotFound` when absent
    async fn get_sales_order(&self, id: i64) -> SuiteResult<SalesOrder>;

    /// Apply [`SalesOrder::apply_update`] and persist the result
    async fn bill_sales_order(&self, id: i64) -> SuiteResult<SalesOrder>;

    async fn delete_sales_order(&self, id: i64) -> SuiteResult<()>;
}

/// A backend serving both record types
pub trait RecordStore: CustomerService + SalesOrderService {
    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}
