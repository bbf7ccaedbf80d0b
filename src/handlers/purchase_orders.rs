// src/handlers/purchase_orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::purchase_order::{PurchaseOrder, PurchaseOrderPayload, VendorOrderTotal},
    services::listing::{ListFilter, SortParams},
};

#[utoipa::path(
    get,
    path = "/api/purchase-orders",
    tag = "Purchase Orders",
    params(ListFilter, SortParams),
    responses(
        (status = 200, body = Vec<PurchaseOrder>),
        (status = 400, description = "Status desconhecido para a entidade")
    )
)]
pub async fn list_purchase_orders(
    State(app_state): State<AppState>,
    Query(criteria): Query<ListFilter>,
    Query(sort): Query<SortParams>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .purchase_order_service
        .list(&criteria, sort.sort.unwrap_or_default())
        .await?;
    Ok(Json(orders))
}

// POST /api/purchase-orders
// Com um só valor (INR ou USD), o outro é convertido pela cotação configurada
#[utoipa::path(
    post,
    path = "/api/purchase-orders",
    tag = "Purchase Orders",
    request_body = PurchaseOrderPayload,
    responses(
        (status = 201, body = PurchaseOrder),
        (status = 400, description = "Dados inválidos ou nenhum valor informado"),
        (status = 404, description = "prid ou negotiationid não existe"),
        (status = 409, description = "A negociação já tem pedido de compra")
    )
)]
pub async fn create_purchase_order(
    State(app_state): State<AppState>,
    Json(payload): Json<PurchaseOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.purchase_order_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/purchase-orders/from-negotiation/{id}",
    tag = "Purchase Orders",
    params(("id" = i32, Path, description = "negotiationid de origem")),
    responses(
        (status = 201, body = PurchaseOrder),
        (status = 404, description = "Negociação não encontrada"),
        (status = 409, description = "Negociação cancelada ou já com pedido de compra")
    )
)]
pub async fn create_purchase_order_from_negotiation(
    State(app_state): State<AppState>,
    Path(negotiation_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state
        .purchase_order_service
        .create_from_negotiation(negotiation_id)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/vendor/{vendorid}/total",
    tag = "Purchase Orders",
    params(("vendorid" = i32, Path, description = "Fornecedor")),
    responses(
        (status = 200, body = VendorOrderTotal),
        (status = 404, description = "Fornecedor sem pedidos de compra")
    )
)]
pub async fn get_vendor_total(
    State(app_state): State<AppState>,
    Path(vendor_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_order_service.total_by_vendor(vendor_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}",
    tag = "Purchase Orders",
    params(("id" = i32, Path, description = "po_id")),
    responses(
        (status = 200, body = PurchaseOrder),
        (status = 404, description = "Pedido de compra não encontrado")
    )
)]
pub async fn get_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_order_service.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/purchase-orders/{id}",
    tag = "Purchase Orders",
    request_body = PurchaseOrderPayload,
    params(("id" = i32, Path, description = "po_id")),
    responses(
        (status = 200, body = PurchaseOrder),
        (status = 400, description = "Transição ilegal ou referência já definida"),
        (status = 404, description = "Pedido de compra não encontrado")
    )
)]
pub async fn update_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PurchaseOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_order_service.update(id, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/purchase-orders/{id}/complete",
    tag = "Purchase Orders",
    params(("id" = i32, Path, description = "po_id")),
    responses((status = 200, body = PurchaseOrder))
)]
pub async fn complete_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_order_service.complete(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/purchase-orders/{id}/reject",
    tag = "Purchase Orders",
    params(("id" = i32, Path, description = "po_id")),
    responses((status = 200, body = PurchaseOrder))
)]
pub async fn reject_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.purchase_order_service.reject(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/purchase-orders/{id}",
    tag = "Purchase Orders",
    params(("id" = i32, Path, description = "po_id")),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Pedido de compra não encontrado")
    )
)]
pub async fn delete_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.purchase_order_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
