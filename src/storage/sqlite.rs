//! SQLite storage backend using sqlx.
//!
//! Provides [`SqliteRecordStore`], backed by a `sqlx::SqlitePool`. The pool
//! hands out one connection per operation; it goes back to the pool when the
//! operation's future completes, whatever the outcome.
//!
//! # Schema
//!
//! Two tables, `customers` and `sales_orders`, created by [`ensure_schema`].
//! `sales_orders.entity` is a plain integer column: the customer reference is
//! checked when an order is created, not enforced as a foreign key.
//!
//! # Derived identifiers
//!
//! The insert and the `CUST-{id}` / `SO-{id}` patch run in the same
//! transaction, so a row with an empty identifier is never committed.

use crate::core::clock;
use crate::core::error::{RecordError, StorageError, SuiteError, SuiteResult};
use crate::core::record::{
    CUSTOMER_STATUS_ON_HOLD, Customer, CustomerPatch, DeletePolicy, NewCustomer, NewSalesOrder,
    RecordKind, SALES_ORDER_STATUS_BILLED, SalesOrder,
};
use crate::core::service::{CustomerService, RecordStore, SalesOrderService};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Connection & schema management
// ---------------------------------------------------------------------------

/// Open a pool for `database_url`, creating the database file if missing.
///
/// In-memory URLs get a single, never-recycled connection so every
/// operation sees the same database.
pub async fn connect(database_url: &str) -> SuiteResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(database_url, "opened SQLite pool");
    Ok(pool)
}

/// Create the record tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> SuiteResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_id TEXT NOT NULL DEFAULT '',
            company_name TEXT NOT NULL,
            email TEXT NOT NULL,
            status TEXT NOT NULL,
            date_created TEXT NOT NULL,
            last_updated TEXT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_customers_entity_id ON customers (entity_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS sales_orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tran_id TEXT NOT NULL DEFAULT '',
            entity INTEGER NOT NULL,
            total REAL NOT NULL,
            status TEXT NOT NULL,
            trandate TEXT NOT NULL,
            last_updated TEXT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_sales_orders_tran_id ON sales_orders (tran_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sales_orders_entity ON sales_orders (entity)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Begin/commit failures keep their own error category.
fn transaction_error(err: sqlx::Error) -> SuiteError {
    SuiteError::Storage(StorageError::TransactionError {
        message: err.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

const CUSTOMER_COLUMNS: &str =
    "id, entity_id, company_name, email, status, date_created, last_updated";

const SALES_ORDER_COLUMNS: &str = "id, tran_id, entity, total, status, trandate, last_updated";

fn customer_from_row(row: &SqliteRow) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: row.try_get("id")?,
        entity_id: row.try_get("entity_id")?,
        company_name: row.try_get("company_name")?,
        email: row.try_get("email")?,
        status: row.try_get("status")?,
        date_created: row.try_get("date_created")?,
        last_updated: row.try_get("last_updated")?,
    })
}

fn sales_order_from_row(row: &SqliteRow) -> Result<SalesOrder, sqlx::Error> {
    Ok(SalesOrder {
        id: row.try_get("id")?,
        tran_id: row.try_get("tran_id")?,
        entity: row.try_get("entity")?,
        total: row.try_get("total")?,
        status: row.try_get("status")?,
        trandate: row.try_get("trandate")?,
        last_updated: row.try_get("last_updated")?,
    })
}

// ---------------------------------------------------------------------------
// SqliteRecordStore
// ---------------------------------------------------------------------------

/// Record store backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// use getsuite::storage::sqlite::{connect, ensure_schema};
/// use getsuite::storage::SqliteRecordStore;
///
/// let pool = connect("sqlite://netsuite_mock.db").await?;
/// ensure_schema(&pool).await?;
/// let store = SqliteRecordStore::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the schema exists.
    pub async fn open(database_url: &str) -> SuiteResult<Self> {
        let pool = connect(database_url).await?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CustomerService for SqliteRecordStore {
    async fn create_customer(&self, input: NewCustomer) -> SuiteResult<Customer> {
        let date_created = clock::now_timestamp();
        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        let id = sqlx::query(
            "INSERT INTO customers (entity_id, company_name, email, status, date_created) \
             VALUES ('', ?, ?, ?, ?)",
        )
        .bind(&input.company_name)
        .bind(&input.email)
        .bind(&input.status)
        .bind(&date_created)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query("UPDATE customers SET entity_id = ? WHERE id = ?")
            .bind(RecordKind::Customer.derived_id(id))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(transaction_error)?;

        let customer = input.into_customer(id, date_created);
        tracing::debug!(record_id = id, entity_id = %customer.entity_id, "customer created");
        Ok(customer)
    }

    async fn list_customers(&self) -> SuiteResult<Vec<Customer>> {
        let rows = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| customer_from_row(row).map_err(SuiteError::from))
            .collect()
    }

    async fn get_customer(&self, id: i64) -> SuiteResult<Customer> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(customer_from_row(&row)?),
            None => Err(SuiteError::not_found(RecordKind::Customer, id)),
        }
    }

    async fn update_customer(&self, id: i64, patch: CustomerPatch) -> SuiteResult<Customer> {
        // Forced "On Hold" first, payload fields on top: a single statement
        // keeps the overlay atomic.
        let row = sqlx::query(&format!(
            "UPDATE customers SET \
                 status = COALESCE(?, ?), \
                 last_updated = ?, \
                 company_name = COALESCE(?, company_name), \
                 email = COALESCE(?, email) \
             WHERE id = ? \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&patch.status)
        .bind(CUSTOMER_STATUS_ON_HOLD)
        .bind(clock::now_timestamp())
        .bind(&patch.company_name)
        .bind(&patch.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let customer = customer_from_row(&row)?;
                tracing::debug!(record_id = id, status = %customer.status, "customer updated");
                Ok(customer)
            }
            None => Err(SuiteError::not_found(RecordKind::Customer, id)),
        }
    }

    async fn delete_customer(&self, id: i64, policy: DeletePolicy) -> SuiteResult<()> {
        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        let deleted = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(SuiteError::not_found(RecordKind::Customer, id));
        }

        match policy {
            DeletePolicy::Orphan => {}
            DeletePolicy::Restrict => {
                let dependents: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM sales_orders WHERE entity = ?")
                        .bind(id)
                        .fetch_one(&mut *tx)
                        .await?;
                if dependents > 0 {
                    // Dropping the transaction rolls the delete back
                    return Err(RecordError::Referenced {
                        kind: RecordKind::Customer,
                        id,
                        dependents: dependents as u64,
                    }
                    .into());
                }
            }
            DeletePolicy::Cascade => {
                let removed = sqlx::query("DELETE FROM sales_orders WHERE entity = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
                tracing::debug!(record_id = id, removed, "cascaded sales order delete");
            }
        }

        tx.commit().await.map_err(transaction_error)?;
        tracing::debug!(record_id = id, ?policy, "customer deleted");
        Ok(())
    }
}

#[async_trait]
impl SalesOrderService for SqliteRecordStore {
    async fn create_sales_order(&self, input: NewSalesOrder) -> SuiteResult<SalesOrder> {
        let today = clock::today();
        let trandate = input.trandate_or(&today);
        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        // The existence check and the insert are one statement
        let result = sqlx::query(
            "INSERT INTO sales_orders (tran_id, entity, total, status, trandate) \
             SELECT '', ?, ?, ?, ? \
             WHERE EXISTS (SELECT 1 FROM customers WHERE id = ?)",
        )
        .bind(input.entity)
        .bind(input.total)
        .bind(&input.status)
        .bind(&trandate)
        .bind(input.entity)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RecordError::InvalidReference {
                kind: RecordKind::Customer,
                field: "entity",
                id: input.entity,
            }
            .into());
        }

        let id = result.last_insert_rowid();
        sqlx::query("UPDATE sales_orders SET tran_id = ? WHERE id = ?")
            .bind(RecordKind::SalesOrder.derived_id(id))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(transaction_error)?;

        let order = input.into_sales_order(id, &today);
        tracing::debug!(record_id = id, tran_id = %order.tran_id, entity = order.entity, "sales order created");
        Ok(order)
    }

    async fn list_sales_orders(&self) -> SuiteResult<Vec<SalesOrder>> {
        let rows = sqlx::query(&format!(
            "SELECT {SALES_ORDER_COLUMNS} FROM sales_orders ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| sales_order_from_row(row).map_err(SuiteError::from))
            .collect()
    }

    async fn get_sales_order(&self, id: i64) -> SuiteResult<SalesOrder> {
        let row = sqlx::query(&format!(
            "SELECT {SALES_ORDER_COLUMNS} FROM sales_orders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(sales_order_from_row(&row)?),
            None => Err(SuiteError::not_found(RecordKind::SalesOrder, id)),
        }
    }

    async fn bill_sales_order(&self, id: i64) -> SuiteResult<SalesOrder> {
        let row = sqlx::query(&format!(
            "UPDATE sales_orders SET status = ?, last_updated = ? \
             WHERE id = ? \
             RETURNING {SALES_ORDER_COLUMNS}"
        ))
        .bind(SALES_ORDER_STATUS_BILLED)
        .bind(clock::now_timestamp())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                tracing::debug!(record_id = id, "sales order billed");
                Ok(sales_order_from_row(&row)?)
            }
            None => Err(SuiteError::not_found(RecordKind::SalesOrder, id)),
        }
    }

    async fn delete_sales_order(&self, id: i64) -> SuiteResult<()> {
        let deleted = sqlx::query("DELETE FROM sales_orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(SuiteError::not_found(RecordKind::SalesOrder, id));
        }
        tracing::debug!(record_id = id, "sales order deleted");
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore {
    fn backend_name(&self) -> &'static str {
        "SQLite"
    }
}
