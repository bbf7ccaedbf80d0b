// src/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn router(app_state: AppState) -> Router {
    let purchase_request_routes = Router::new()
        .route("/"
               ,get(handlers::purchase_requests::list_purchase_requests)
               .post(handlers::purchase_requests::create_purchase_request)
        )
        .route("/{id}"
               ,get(handlers::purchase_requests::get_purchase_request)
               .put(handlers::purchase_requests::update_purchase_request)
               .delete(handlers::purchase_requests::delete_purchase_request)
        )
        .route("/{id}/approve", put(handlers::purchase_requests::approve_purchase_request))
        .route("/{id}/reject", put(handlers::purchase_requests::reject_purchase_request));

    let negotiation_routes = Router::new()
        .route("/"
               ,get(handlers::negotiations::list_negotiations)
               .post(handlers::negotiations::create_negotiation)
        )
        .route("/savings", get(handlers::negotiations::list_negotiations_with_savings))
        .route("/from-pr/{prid}", post(handlers::negotiations::create_negotiation_from_request))
        .route("/{id}"
               ,get(handlers::negotiations::get_negotiation)
               .put(handlers::negotiations::update_negotiation)
               .delete(handlers::negotiations::delete_negotiation)
        )
        .route("/{id}/savings", get(handlers::negotiations::get_negotiation_savings));

    let purchase_order_routes = Router::new()
        .route("/"
               ,get(handlers::purchase_orders::list_purchase_orders)
               .post(handlers::purchase_orders::create_purchase_order)
        )
        .route("/from-negotiation/{id}", post(handlers::purchase_orders::create_purchase_order_from_negotiation))
        .route("/vendor/{vendorid}/total", get(handlers::purchase_orders::get_vendor_total))
        .route("/{id}"
               ,get(handlers::purchase_orders::get_purchase_order)
               .put(handlers::purchase_orders::update_purchase_order)
               .delete(handlers::purchase_orders::delete_purchase_order)
        )
        .route("/{id}/complete", put(handlers::purchase_orders::complete_purchase_order))
        .route("/{id}/reject", put(handlers::purchase_orders::reject_purchase_order))
        // Documentos gerados a partir do pedido de compra
        .route("/{id}/pdf", get(handlers::documents::generate_order_pdf))
        .route("/{id}/email", get(handlers::documents::draft_order_email));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/purchase-requests", purchase_request_routes)
        .nest("/api/negotiations", negotiation_routes)
        .nest("/api/purchase-orders", purchase_order_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
