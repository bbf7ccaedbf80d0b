// src/handlers/purchase_requests.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::purchase_request::{PurchaseRequest, PurchaseRequestPayload},
    services::listing::{ListFilter, SortParams},
};

// GET /api/purchase-requests
#[utoipa::path(
    get,
    path = "/api/purchase-requests",
    tag = "Purchase Requests",
    params(ListFilter, SortParams),
    responses(
        (status = 200, description = "Pedidos filtrados e ordenados por data", body = Vec<PurchaseRequest>),
        (status = 400, description = "Status desconhecido para a entidade")
    )
)]
pub async fn list_purchase_requests(
    State(app_state): State<AppState>,
    Query(criteria): Query<ListFilter>,
    Query(sort): Query<SortParams>,
) -> Result<impl IntoResponse, AppError> {
    let requests = app_state
        .purchase_request_service
        .list(&criteria, sort.sort.unwrap_or_default())
        .await?;
    Ok(Json(requests))
}

// POST /api/purchase-requests
#[utoipa::path(
    post,
    path = "/api/purchase-requests",
    tag = "Purchase Requests",
    request_body = PurchaseRequestPayload,
    responses(
        (status = 201, description = "Pedido criado como PENDING", body = PurchaseRequest),
        (status = 400, description = "Dados inválidos ou eventid repetido")
    )
)]
pub async fn create_purchase_request(
    State(app_state): State<AppState>,
    Json(payload): Json<PurchaseRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.purchase_request_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/purchase-requests/{id}",
    tag = "Purchase Requests",
    params(("id" = i32, Path, description = "prid")),
    responses(
        (status = 200, body = PurchaseRequest),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_purchase_request(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_request_service.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/purchase-requests/{id}",
    tag = "Purchase Requests",
    request_body = PurchaseRequestPayload,
    params(("id" = i32, Path, description = "prid")),
    responses(
        (status = 200, body = PurchaseRequest),
        (status = 400, description = "Dados inválidos ou transição de status ilegal"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn update_purchase_request(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PurchaseRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_request_service.update(id, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/purchase-requests/{id}/approve",
    tag = "Purchase Requests",
    params(("id" = i32, Path, description = "prid")),
    responses((status = 200, body = PurchaseRequest))
)]
pub async fn approve_purchase_request(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_request_service.approve(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/purchase-requests/{id}/reject",
    tag = "Purchase Requests",
    params(("id" = i32, Path, description = "prid")),
    responses((status = 200, body = PurchaseRequest))
)]
pub async fn reject_purchase_request(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_request_service.reject(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/purchase-requests/{id}",
    tag = "Purchase Requests",
    params(("id" = i32, Path, description = "prid")),
    responses(
        (status = 204, description = "Removido; negociações e pedidos de compra ligados continuam"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn delete_purchase_request(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.purchase_request_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
