// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    services::{
        document_service::PdfParams,
        mail_service::{EmailDraft, EmailParams},
    },
};

// GET /api/purchase-orders/{id}/pdf?copy=ld|vendor
#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}/pdf",
    tag = "Documents",
    params(("id" = i32, Path, description = "po_id"), PdfParams),
    responses(
        (status = 200, description = "PDF do pedido de compra (application/pdf)"),
        (status = 404, description = "Pedido de compra não encontrado")
    )
)]
pub async fn generate_order_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<PdfParams>,
) -> Result<Response, AppError> {
    let order = app_state.purchase_order_service.get(id).await?;
    let pdf_bytes = app_state.document_service.render_order(&order)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        params.copy.unwrap_or_default().file_name(order.id)
    );
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// GET /api/purchase-orders/{id}/email?recipient=ld|vendor|scheduler
#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}/email",
    tag = "Documents",
    params(("id" = i32, Path, description = "po_id"), EmailParams),
    responses(
        (status = 200, body = EmailDraft),
        (status = 400, description = "Não há e-mail para este status e destinatário"),
        (status = 404, description = "Pedido de compra não encontrado")
    )
)]
pub async fn draft_order_email(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<EmailParams>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.purchase_order_service.get(id).await?;
    Ok(Json(app_state.mail_service.draft(&order, params.recipient)?))
}
