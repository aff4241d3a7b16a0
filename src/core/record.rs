//! Record models exposed by the mock API
//!
//! Two record types live here: [`Customer`] and [`SalesOrder`]. Each has a
//! store-assigned integer `id` and a human-readable identifier derived from
//! it (`CUST-{id}`, `SO-{id}`). Wire names are camelCase to match the
//! upstream record API.
//!
//! The update rules are kept on the models so every storage backend applies
//! them identically:
//!
//! - a customer update forces `"On Hold"` and then overlays the payload
//! - a sales order update forces `"Billed"` and ignores the payload entirely

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default status of a freshly created customer
pub const CUSTOMER_STATUS_ACTIVE: &str = "Active";
/// Status every customer update moves to before the payload is applied
pub const CUSTOMER_STATUS_ON_HOLD: &str = "On Hold";
/// Default status of a freshly created sales order
pub const SALES_ORDER_STATUS_PENDING: &str = "Pending Fulfillment";
/// Status every sales order update moves to
pub const SALES_ORDER_STATUS_BILLED: &str = "Billed";

/// The two record types served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Customer,
    SalesOrder,
}

impl RecordKind {
    /// Path segment and machine name (e.g. `salesorder`)
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Customer => "customer",
            RecordKind::SalesOrder => "salesorder",
        }
    }

    /// Name used in human-readable messages
    pub fn display_name(&self) -> &'static str {
        match self {
            RecordKind::Customer => "Customer",
            RecordKind::SalesOrder => "Sales Order",
        }
    }

    /// Prefix of the derived identifier
    pub fn id_prefix(&self) -> &'static str {
        match self {
            RecordKind::Customer => "CUST",
            RecordKind::SalesOrder => "SO",
        }
    }

    /// Build the derived identifier for a store-assigned id
    pub fn derived_id(&self, id: i64) -> String {
        format!("{}-{}", self.id_prefix(), id)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub entity_id: String,
    pub company_name: String,
    pub email: String,
    pub status: String,
    pub date_created: String,
    pub last_updated: Option<String>,
}

/// Payload of a customer create call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub company_name: String,
    pub email: String,
    #[serde(default = "default_customer_status")]
    pub status: String,
}

fn default_customer_status() -> String {
    CUSTOMER_STATUS_ACTIVE.to_string()
}

impl NewCustomer {
    pub fn new(company_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            email: email.into(),
            status: default_customer_status(),
        }
    }

    /// Materialize the record once the store has assigned an id.
    pub fn into_customer(self, id: i64, date_created: String) -> Customer {
        Customer {
            id,
            entity_id: RecordKind::Customer.derived_id(id),
            company_name: self.company_name,
            email: self.email,
            status: self.status,
            date_created,
            last_updated: None,
        }
    }
}

/// Payload of a customer update call; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Customer {
    /// Apply an update call.
    ///
    /// The status always moves to `"On Hold"` and `lastUpdated` is refreshed;
    /// then every field present in the payload is written on top, so a
    /// payload `status` wins over the forced one.
    pub fn apply_update(&mut self, patch: &CustomerPatch, now: &str) {
        self.status = CUSTOMER_STATUS_ON_HOLD.to_string();
        self.last_updated = Some(now.to_string());

        if let Some(company_name) = &patch.company_name {
            self.company_name = company_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
    }
}

// =============================================================================
// Sales Order
// =============================================================================

/// A sales order record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: i64,
    pub tran_id: String,
    pub entity: i64,
    pub total: f64,
    pub status: String,
    pub trandate: String,
    pub last_updated: Option<String>,
}

/// Payload of a sales order create call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSalesOrder {
    /// Internal id of the customer
    pub entity: i64,
    pub total: f64,
    #[serde(default = "default_sales_order_status")]
    pub status: String,
    #[serde(default)]
    pub trandate: Option<String>,
}

fn default_sales_order_status() -> String {
    SALES_ORDER_STATUS_PENDING.to_string()
}

impl NewSalesOrder {
    pub fn new(entity: i64, total: f64) -> Self {
        Self {
            entity,
            total,
            status: default_sales_order_status(),
            trandate: None,
        }
    }

    /// Transaction date to persist: the caller's, or `today` when absent or empty.
    pub fn trandate_or(&self, today: &str) -> String {
        self.trandate
            .clone()
            .filter(|date| !date.is_empty())
            .unwrap_or_else(|| today.to_string())
    }

    /// Materialize the record once the store has assigned an id.
    pub fn into_sales_order(self, id: i64, today: &str) -> SalesOrder {
        let trandate = self.trandate_or(today);
        SalesOrder {
            id,
            tran_id: RecordKind::SalesOrder.derived_id(id),
            entity: self.entity,
            total: self.total,
            status: self.status,
            trandate,
            last_updated: None,
        }
    }
}

/// Body accepted by a sales order update call.
///
/// Shares the create shape with every field optional. None of it is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderUpdate {
    #[serde(default)]
    pub entity: Option<i64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trandate: Option<String>,
}

impl SalesOrder {
    /// Apply an update call: the order is billed, nothing else changes.
    pub fn apply_update(&mut self, now: &str) {
        self.status = SALES_ORDER_STATUS_BILLED.to_string();
        self.last_updated = Some(now.to_string());
    }
}

/// What happens to a customer's sales orders when the customer is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Delete the customer and leave its orders pointing at a missing id
    #[default]
    Orphan,
    /// Refuse the delete while orders reference the customer
    Restrict,
    /// Delete the customer's orders along with it
    Cascade,
}
