// src/db/memory_store.rs

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::store::{
        NegotiationChange, PurchaseStore, DUPLICATE_EVENT_ID, NEGOTIATION_EXISTS, PURCHASE_ORDER_EXISTS,
    },
    models::{
        negotiation::{Negotiation, NewNegotiation},
        purchase_order::{NewPurchaseOrder, PurchaseOrder},
        purchase_request::{NewPurchaseRequest, PurchaseRequest},
    },
};

#[derive(Default)]
struct Tables {
    requests: Vec<PurchaseRequest>,
    negotiations: Vec<Negotiation>,
    orders: Vec<PurchaseOrder>,
    // Como SERIAL: ids nunca são reaproveitados
    next_request_id: i32,
    next_negotiation_id: i32,
    next_order_id: i32,
}

impl Tables {
    fn event_taken(&self, event_id: i32, except: Option<i32>) -> bool {
        self.requests
            .iter()
            .any(|r| r.event_id == event_id && Some(r.id) != except)
    }

    fn push_order(&mut self, order: NewPurchaseOrder) -> Result<PurchaseOrder, AppError> {
        if let Some(negotiation_id) = order.negotiation_id {
            if self.orders.iter().any(|o| o.negotiation_id == Some(negotiation_id)) {
                return Err(AppError::DerivationError(PURCHASE_ORDER_EXISTS.to_string()));
            }
        }
        self.next_order_id += 1;
        let order = order.with_id(self.next_order_id);
        self.orders.push(order.clone());
        Ok(order)
    }
}

/// `PurchaseStore` em memória, com as mesmas regras de unicidade da migração.
/// Usado em desenvolvimento local (`PURCHASE_STORE=memory`) e nos testes.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
    async fn insert_purchase_request(&self, request: NewPurchaseRequest) -> Result<PurchaseRequest, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.event_taken(request.event_id, None) {
            return Err(AppError::InvalidInput(DUPLICATE_EVENT_ID.to_string()));
        }
        tables.next_request_id += 1;
        let request = request.with_id(tables.next_request_id);
        tables.requests.push(request.clone());
        Ok(request)
    }

    async fn find_purchase_request(&self, id: i32) -> Result<Option<PurchaseRequest>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn find_purchase_request_by_event(&self, event_id: i32) -> Result<Option<PurchaseRequest>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.requests.iter().find(|r| r.event_id == event_id).cloned())
    }

    async fn list_purchase_requests(&self) -> Result<Vec<PurchaseRequest>, AppError> {
        Ok(self.tables.lock().await.requests.clone())
    }

    async fn update_purchase_request(&self, request: &PurchaseRequest) -> Result<Option<PurchaseRequest>, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.event_taken(request.event_id, Some(request.id)) {
            return Err(AppError::InvalidInput(DUPLICATE_EVENT_ID.to_string()));
        }
        let Some(slot) = tables.requests.iter_mut().find(|r| r.id == request.id) else {
            return Ok(None);
        };
        *slot = request.clone();
        Ok(Some(request.clone()))
    }

    async fn delete_purchase_request(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        let before = tables.requests.len();
        tables.requests.retain(|r| r.id != id);
        Ok(tables.requests.len() < before)
    }

    async fn insert_negotiation(&self, negotiation: NewNegotiation) -> Result<Negotiation, AppError> {
        let mut tables = self.tables.lock().await;
        if let Some(prid) = negotiation.prid {
            if tables.negotiations.iter().any(|n| n.prid == Some(prid)) {
                return Err(AppError::DerivationError(NEGOTIATION_EXISTS.to_string()));
            }
        }
        tables.next_negotiation_id += 1;
        let negotiation = negotiation.with_id(tables.next_negotiation_id);
        tables.negotiations.push(negotiation.clone());
        Ok(negotiation)
    }

    async fn find_negotiation(&self, id: i32) -> Result<Option<Negotiation>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.negotiations.iter().find(|n| n.id == id).cloned())
    }

    async fn find_negotiation_by_request(&self, prid: i32) -> Result<Option<Negotiation>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.negotiations.iter().find(|n| n.prid == Some(prid)).cloned())
    }

    async fn list_negotiations(&self) -> Result<Vec<Negotiation>, AppError> {
        Ok(self.tables.lock().await.negotiations.clone())
    }

    async fn commit_negotiation_change(&self, change: NegotiationChange) -> Result<Option<Negotiation>, AppError> {
        let mut tables = self.tables.lock().await;
        let Some(index) = tables.negotiations.iter().position(|n| n.id == change.negotiation.id) else {
            return Ok(None);
        };

        // Tudo validado antes de escrever qualquer coisa
        if let Some(order) = &change.new_order {
            if let Some(negotiation_id) = order.negotiation_id {
                if tables.orders.iter().any(|o| o.negotiation_id == Some(negotiation_id)) {
                    return Err(AppError::DerivationError(PURCHASE_ORDER_EXISTS.to_string()));
                }
            }
        }

        // Só os termos mudam; o resto continua como estava na linha
        let current = &mut tables.negotiations[index];
        current.negotiation_date = change.negotiation.negotiation_date;
        current.final_amount = change.negotiation.final_amount;
        current.status = change.negotiation.status;
        current.notes = change.negotiation.notes.clone();
        let updated = current.clone();

        if let Some((prid, status)) = change.request_status {
            if let Some(request) = tables.requests.iter_mut().find(|r| r.id == prid) {
                request.status = status;
            }
        }

        if let Some(order) = change.new_order {
            tables.push_order(order)?;
        }

        Ok(Some(updated))
    }

    async fn delete_negotiation(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        let before = tables.negotiations.len();
        tables.negotiations.retain(|n| n.id != id);
        Ok(tables.negotiations.len() < before)
    }

    async fn insert_purchase_order(&self, order: NewPurchaseOrder) -> Result<PurchaseOrder, AppError> {
        self.tables.lock().await.push_order(order)
    }

    async fn find_purchase_order(&self, id: i32) -> Result<Option<PurchaseOrder>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_purchase_order_by_negotiation(&self, negotiation_id: i32) -> Result<Option<PurchaseOrder>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .orders
            .iter()
            .find(|o| o.negotiation_id == Some(negotiation_id))
            .cloned())
    }

    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, AppError> {
        Ok(self.tables.lock().await.orders.clone())
    }

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, AppError> {
        let mut tables = self.tables.lock().await;
        if let Some(negotiation_id) = order.negotiation_id {
            if tables
                .orders
                .iter()
                .any(|o| o.negotiation_id == Some(negotiation_id) && o.id != order.id)
            {
                return Err(AppError::DerivationError(PURCHASE_ORDER_EXISTS.to_string()));
            }
        }
        let Some(slot) = tables.orders.iter_mut().find(|o| o.id == order.id) else {
            return Ok(None);
        };
        *slot = order.clone();
        Ok(Some(order.clone()))
    }

    async fn delete_purchase_order(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        Ok(tables.orders.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase_request::PrStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn request(event_id: i32) -> NewPurchaseRequest {
        NewPurchaseRequest {
            event_id,
            event_name: format!("Event {}", event_id),
            vendor_id: 5,
            vendor_name: "Acme".into(),
            cdsid: "ab12".into(),
            request_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            allocated_amount: dec!(100),
            status: PrStatus::Pending,
        }
    }

    #[tokio::test]
    async fn ids_are_fresh_and_listing_keeps_insertion_order() {
        let store = MemoryStore::new();
        let a = store.insert_purchase_request(request(1)).await.unwrap();
        let b = store.insert_purchase_request(request(2)).await.unwrap();
        assert!(store.delete_purchase_request(b.id).await.unwrap());
        let c = store.insert_purchase_request(request(3)).await.unwrap();

        assert_ne!(c.id, b.id);
        let ids: Vec<i32> = store.list_purchase_requests().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn unknown_ids_are_reported_not_raised() {
        let store = MemoryStore::new();
        assert!(store.find_purchase_order(42).await.unwrap().is_none());
        assert!(!store.delete_negotiation(42).await.unwrap());
        assert!(store.update_purchase_request(&request(1).with_id(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn event_ids_are_unique() {
        let store = MemoryStore::new();
        store.insert_purchase_request(request(1)).await.unwrap();
        let err = store.insert_purchase_request(request(1)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(store.list_purchase_requests().await.unwrap().len(), 1);
    }
}
