// src/docs.rs

use utoipa::OpenApi;

use crate::{handlers, models, services};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Purchase Requests ---
        handlers::purchase_requests::list_purchase_requests,
        handlers::purchase_requests::create_purchase_request,
        handlers::purchase_requests::get_purchase_request,
        handlers::purchase_requests::update_purchase_request,
        handlers::purchase_requests::approve_purchase_request,
        handlers::purchase_requests::reject_purchase_request,
        handlers::purchase_requests::delete_purchase_request,

        // --- Negotiations ---
        handlers::negotiations::list_negotiations,
        handlers::negotiations::create_negotiation,
        handlers::negotiations::create_negotiation_from_request,
        handlers::negotiations::list_negotiations_with_savings,
        handlers::negotiations::get_negotiation,
        handlers::negotiations::get_negotiation_savings,
        handlers::negotiations::update_negotiation,
        handlers::negotiations::delete_negotiation,

        // --- Purchase Orders ---
        handlers::purchase_orders::list_purchase_orders,
        handlers::purchase_orders::create_purchase_order,
        handlers::purchase_orders::create_purchase_order_from_negotiation,
        handlers::purchase_orders::get_vendor_total,
        handlers::purchase_orders::get_purchase_order,
        handlers::purchase_orders::update_purchase_order,
        handlers::purchase_orders::complete_purchase_order,
        handlers::purchase_orders::reject_purchase_order,
        handlers::purchase_orders::delete_purchase_order,

        // --- Documents ---
        handlers::documents::generate_order_pdf,
        handlers::documents::draft_order_email,
    ),
    components(
        schemas(
            models::purchase_request::PrStatus,
            models::purchase_request::PurchaseRequest,
            models::purchase_request::PurchaseRequestPayload,

            models::negotiation::NegotiationStatus,
            models::negotiation::Negotiation,
            models::negotiation::NegotiationPayload,
            models::negotiation::NegotiationUpdatePayload,
            models::negotiation::NegotiationSavings,

            models::purchase_order::PoStatus,
            models::purchase_order::PurchaseOrder,
            models::purchase_order::PurchaseOrderPayload,
            models::purchase_order::VendorOrderTotal,

            services::listing::SortOrder,
            services::document_service::PdfCopy,
            services::mail_service::Recipient,
            services::mail_service::EmailDraft,
        )
    ),
    tags(
        (name = "Purchase Requests", description = "Pedidos de verba por evento e fornecedor"),
        (name = "Negotiations", description = "Negociação de valores com o fornecedor"),
        (name = "Purchase Orders", description = "Pedidos de compra em INR e USD"),
        (name = "Documents", description = "PDF e rascunhos de e-mail do pedido de compra")
    )
)]
pub struct ApiDoc;
