//! Customer HTTP handlers
//!
//! Every handler sleeps for the configured latency before touching the store.

use crate::core::error::SuiteResult;
use crate::core::extractors::{RecordId, RecordJson};
use crate::core::record::{Customer, CustomerPatch, NewCustomer};
use crate::records::RecordAppState;
use axum::{extract::State, http::StatusCode, response::Json};

/// POST /customer
pub async fn create_customer(
    State(state): State<RecordAppState>,
    RecordJson(input): RecordJson<NewCustomer>,
) -> SuiteResult<(StatusCode, Json<Customer>)> {
    state.latency.pause().await;
    let customer = state.store.create_customer(input).await?;
    tracing::info!(record_id = customer.id, entity_id = %customer.entity_id, "created customer");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customer
pub async fn list_customers(State(state): State<RecordAppState>) -> SuiteResult<Json<Vec<Customer>>> {
    state.latency.pause().await;
    Ok(Json(state.store.list_customers().await?))
}

/// GET /customer/{id}
pub async fn get_customer(
    State(state): State<RecordAppState>,
    RecordId(id): RecordId,
) -> SuiteResult<Json<Customer>> {
    state.latency.pause().await;
    Ok(Json(state.store.get_customer(id).await?))
}

/// PUT /customer/{id}
pub async fn update_customer(
    State(state): State<RecordAppState>,
    RecordId(id): RecordId,
    RecordJson(patch): RecordJson<CustomerPatch>,
) -> SuiteResult<StatusCode> {
    state.latency.pause().await;
    let customer = state.store.update_customer(id, patch).await?;
    tracing::info!(record_id = id, status = %customer.status, "updated customer");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /customer/{id}
pub async fn delete_customer(
    State(state): State<RecordAppState>,
    RecordId(id): RecordId,
) -> SuiteResult<StatusCode> {
    state.latency.pause().await;
    state
        .store
        .delete_customer(id, state.customer_delete_policy)
        .await?;
    tracing::info!(record_id = id, "deleted customer");
    Ok(StatusCode::NO_CONTENT)
}
