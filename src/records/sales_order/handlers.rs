//! Sales order HTTP handlers

use crate::core::error::SuiteResult;
use crate::core::extractors::{RecordId, RecordJson};
use crate::core::record::{NewSalesOrder, SalesOrder, SalesOrderUpdate};
use crate::records::RecordAppState;
use axum::{extract::State, http::StatusCode, response::Json};

/// POST /salesorder
///
/// Answers 400 when `entity` is not an existing customer id.
pub async fn create_sales_order(
    State(state): State<RecordAppState>,
    RecordJson(input): RecordJson<NewSalesOrder>,
) -> SuiteResult<(StatusCode, Json<SalesOrder>)> {
    state.latency.pause().await;
    let order = state.store.create_sales_order(input).await?;
    tracing::info!(record_id = order.id, tran_id = %order.tran_id, "created sales order");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /salesorder
pub async fn list_sales_orders(
    State(state): State<RecordAppState>,
) -> SuiteResult<Json<Vec<SalesOrder>>> {
    state.latency.pause().await;
    Ok(Json(state.store.list_sales_orders().await?))
}

/// PUT /salesorder/{id}
///
/// The body is parsed but not applied: the order is marked billed and
/// nothing else changes.
pub async fn update_sales_order(
    State(state): State<RecordAppState>,
    RecordId(id): RecordId,
    RecordJson(_ignored): RecordJson<SalesOrderUpdate>,
) -> SuiteResult<StatusCode> {
    state.latency.pause().await;
    state.store.bill_sales_order(id).await?;
    tracing::info!(record_id = id, "billed sales order");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /salesorder/{id}
pub async fn delete_sales_order(
    State(state): State<RecordAppState>,
    RecordId(id): RecordId,
) -> SuiteResult<StatusCode> {
    state.latency.pause().await;
    state.store.delete_sales_order(id).await?;
    tracing::info!(record_id = id, "deleted sales order");
    Ok(StatusCode::NO_CONTENT)
}
