// src/db/store.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        negotiation::{Negotiation, NewNegotiation},
        purchase_order::{NewPurchaseOrder, PurchaseOrder},
        purchase_request::{NewPurchaseRequest, PrStatus, PurchaseRequest},
    },
};

pub const DUPLICATE_EVENT_ID: &str = "Event ID already exists. Please use a different Event ID.";
pub const NEGOTIATION_EXISTS: &str = "Negotiation already exists for this Purchase Request";
pub const PURCHASE_ORDER_EXISTS: &str = "Purchase Order already exists for this Negotiation";

/// Tudo o que uma atualização de negociação grava de uma vez só.
#[derive(Debug, Clone)]
pub struct NegotiationChange {
    pub negotiation: Negotiation,
    /// Novo status do pedido de origem (Completed → APPROVED, Cancelled → REJECTED).
    pub request_status: Option<(i32, PrStatus)>,
    /// Pedido de compra gerado automaticamente ao concluir a negociação.
    pub new_order: Option<NewPurchaseOrder>,
}

/// Persistência das três tabelas.
///
/// Ids são atribuídos na inserção, as listagens seguem a ordem de inserção e
/// ids desconhecidos voltam como `None`/`false` (o serviço decide o erro).
/// Referências entre tabelas são só inteiros: apagar nunca propaga.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    // --- Purchase Requests ---
    async fn insert_purchase_request(&self, request: NewPurchaseRequest) -> Result<PurchaseRequest, AppError>;
    async fn find_purchase_request(&self, id: i32) -> Result<Option<PurchaseRequest>, AppError>;
    async fn find_purchase_request_by_event(&self, event_id: i32) -> Result<Option<PurchaseRequest>, AppError>;
    async fn list_purchase_requests(&self) -> Result<Vec<PurchaseRequest>, AppError>;
    async fn update_purchase_request(&self, request: &PurchaseRequest) -> Result<Option<PurchaseRequest>, AppError>;
    async fn delete_purchase_request(&self, id: i32) -> Result<bool, AppError>;

    // --- Negotiations ---
    async fn insert_negotiation(&self, negotiation: NewNegotiation) -> Result<Negotiation, AppError>;
    async fn find_negotiation(&self, id: i32) -> Result<Option<Negotiation>, AppError>;
    async fn find_negotiation_by_request(&self, prid: i32) -> Result<Option<Negotiation>, AppError>;
    async fn list_negotiations(&self) -> Result<Vec<Negotiation>, AppError>;
    /// Grava a negociação e os efeitos no pedido de origem atomicamente.
    async fn commit_negotiation_change(&self, change: NegotiationChange) -> Result<Option<Negotiation>, AppError>;
    async fn delete_negotiation(&self, id: i32) -> Result<bool, AppError>;

    // --- Purchase Orders ---
    async fn insert_purchase_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, AppError>;
    async fn find_purchase_order(&self, id: i32) -> Result<Option<PurchaseOrder>, AppError>;
    async fn find_purchase_order_by_negotiation(&self, negotiation_id: i32) -> Result<Option<PurchaseOrder>, AppError>;
    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, AppError>;
    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, AppError>;
    async fn delete_purchase_order(&self, id: i32) -> Result<bool, AppError>;
}
