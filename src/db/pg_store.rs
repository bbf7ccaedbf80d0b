// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        store::{NegotiationChange, PurchaseStore},
        NegotiationRepository, PurchaseOrderRepository, PurchaseRequestRepository,
    },
    models::{
        negotiation::{Negotiation, NewNegotiation},
        purchase_order::{NewPurchaseOrder, PurchaseOrder},
        purchase_request::{NewPurchaseRequest, PurchaseRequest},
    },
};

/// `PurchaseStore` sobre PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    requests: PurchaseRequestRepository,
    negotiations: NegotiationRepository,
    orders: PurchaseOrderRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            requests: PurchaseRequestRepository::new(),
            negotiations: NegotiationRepository::new(),
            orders: PurchaseOrderRepository::new(),
        }
    }
}

#[async_trait]
impl PurchaseStore for PgStore {
    async fn insert_purchase_request(&self, request: NewPurchaseRequest) -> Result<PurchaseRequest, AppError> {
        self.requests.insert(&self.pool, &request).await
    }

    async fn find_purchase_request(&self, id: i32) -> Result<Option<PurchaseRequest>, AppError> {
        self.requests.find_by_id(&self.pool, id).await
    }

    async fn find_purchase_request_by_event(&self, event_id: i32) -> Result<Option<PurchaseRequest>, AppError> {
        self.requests.find_by_event(&self.pool, event_id).await
    }

    async fn list_purchase_requests(&self) -> Result<Vec<PurchaseRequest>, AppError> {
        self.requests.list(&self.pool).await
    }

    async fn update_purchase_request(&self, request: &PurchaseRequest) -> Result<Option<PurchaseRequest>, AppError> {
        self.requests.update(&self.pool, request).await
    }

    async fn delete_purchase_request(&self, id: i32) -> Result<bool, AppError> {
        self.requests.delete(&self.pool, id).await
    }

    async fn insert_negotiation(&self, negotiation: NewNegotiation) -> Result<Negotiation, AppError> {
        self.negotiations.insert(&self.pool, &negotiation).await
    }

    async fn find_negotiation(&self, id: i32) -> Result<Option<Negotiation>, AppError> {
        self.negotiations.find_by_id(&self.pool, id).await
    }

    async fn find_negotiation_by_request(&self, prid: i32) -> Result<Option<Negotiation>, AppError> {
        self.negotiations.find_by_request(&self.pool, prid).await
    }

    async fn list_negotiations(&self) -> Result<Vec<Negotiation>, AppError> {
        self.negotiations.list(&self.pool).await
    }

    async fn commit_negotiation_change(&self, change: NegotiationChange) -> Result<Option<Negotiation>, AppError> {
        // 1. Uma transação para a negociação e seus efeitos
        let mut tx = self.pool.begin().await?;

        // 2. Atualiza a negociação; se sumiu, o rollback acontece no drop
        let Some(updated) = self.negotiations.update_terms(&mut *tx, &change.negotiation).await? else {
            return Ok(None);
        };

        // 3. Status do pedido de origem
        if let Some((prid, status)) = change.request_status {
            self.requests.set_status(&mut *tx, prid, status).await?;
        }

        // 4. Pedido de compra automático
        if let Some(order) = &change.new_order {
            let created = self.orders.insert(&mut *tx, order).await?;
            tracing::info!(po_id = created.id, negotiation_id = updated.id, "purchase order created from completed negotiation");
        }

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn delete_negotiation(&self, id: i32) -> Result<bool, AppError> {
        self.negotiations.delete(&self.pool, id).await
    }

    async fn insert_purchase_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, AppError> {
        self.orders.insert(&self.pool, &order).await
    }

    async fn find_purchase_order(&self, id: i32) -> Result<Option<PurchaseOrder>, AppError> {
        self.orders.find_by_id(&self.pool, id).await
    }

    async fn find_purchase_order_by_negotiation(&self, negotiation_id: i32) -> Result<Option<PurchaseOrder>, AppError> {
        self.orders.find_by_negotiation(&self.pool, negotiation_id).await
    }

    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, AppError> {
        self.orders.list(&self.pool).await
    }

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, AppError> {
        self.orders.update(&self.pool, order).await
    }

    async fn delete_purchase_order(&self, id: i32) -> Result<bool, AppError> {
        self.orders.delete(&self.pool, id).await
    }
}
