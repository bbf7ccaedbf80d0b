// src/handlers/negotiations.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::negotiation::{Negotiation, NegotiationPayload, NegotiationSavings, NegotiationUpdatePayload},
    services::listing::{ListFilter, SortParams},
};

#[utoipa::path(
    get,
    path = "/api/negotiations",
    tag = "Negotiations",
    params(ListFilter, SortParams),
    responses(
        (status = 200, body = Vec<Negotiation>),
        (status = 400, description = "Status desconhecido para a entidade")
    )
)]
pub async fn list_negotiations(
    State(app_state): State<AppState>,
    Query(criteria): Query<ListFilter>,
    Query(sort): Query<SortParams>,
) -> Result<impl IntoResponse, AppError> {
    let negotiations = app_state
        .negotiation_service
        .list(&criteria, sort.sort.unwrap_or_default())
        .await?;
    Ok(Json(negotiations))
}

#[utoipa::path(
    post,
    path = "/api/negotiations",
    tag = "Negotiations",
    request_body = NegotiationPayload,
    responses(
        (status = 201, description = "Negociação avulsa criada como Pending", body = Negotiation),
        (status = 404, description = "prid informado não existe"),
        (status = 409, description = "O pedido já tem negociação")
    )
)]
pub async fn create_negotiation(
    State(app_state): State<AppState>,
    Json(payload): Json<NegotiationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.negotiation_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// POST /api/negotiations/from-pr/{prid}
#[utoipa::path(
    post,
    path = "/api/negotiations/from-pr/{prid}",
    tag = "Negotiations",
    params(("prid" = i32, Path, description = "Pedido de origem")),
    responses(
        (status = 201, body = Negotiation),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido não está PENDING ou já tem negociação")
    )
)]
pub async fn create_negotiation_from_request(
    State(app_state): State<AppState>,
    Path(prid): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.negotiation_service.create_from_request(prid).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/negotiations/savings",
    tag = "Negotiations",
    responses((status = 200, description = "Negociações com economia positiva", body = Vec<Negotiation>))
)]
pub async fn list_negotiations_with_savings(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.negotiation_service.list_with_savings().await?))
}

#[utoipa::path(
    get,
    path = "/api/negotiations/{id}",
    tag = "Negotiations",
    params(("id" = i32, Path, description = "negotiationid")),
    responses((status = 200, body = Negotiation), (status = 404, description = "Negociação não encontrada"))
)]
pub async fn get_negotiation(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.negotiation_service.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/negotiations/{id}/savings",
    tag = "Negotiations",
    params(("id" = i32, Path, description = "negotiationid")),
    responses((status = 200, body = NegotiationSavings), (status = 404, description = "Negociação não encontrada"))
)]
pub async fn get_negotiation_savings(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.negotiation_service.savings(id).await?))
}

// PUT /api/negotiations/{id}
// Completed/Cancelled propagam para o pedido de origem
#[utoipa::path(
    put,
    path = "/api/negotiations/{id}",
    tag = "Negotiations",
    request_body = NegotiationUpdatePayload,
    params(("id" = i32, Path, description = "negotiationid")),
    responses(
        (status = 200, body = Negotiation),
        (status = 400, description = "Transição de status ilegal"),
        (status = 404, description = "Negociação não encontrada")
    )
)]
pub async fn update_negotiation(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NegotiationUpdatePayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.negotiation_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/negotiations/{id}",
    tag = "Negotiations",
    params(("id" = i32, Path, description = "negotiationid")),
    responses((status = 204, description = "Removida"), (status = 404, description = "Negociação não encontrada"))
)]
pub async fn delete_negotiation(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.negotiation_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
