// src/services/purchase_request_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::{require, AppError},
    db::{store::DUPLICATE_EVENT_ID, PurchaseStore},
    models::purchase_request::{NewPurchaseRequest, PrStatus, PurchaseRequest, PurchaseRequestPayload},
    services::{
        derivation::today,
        lifecycle::ensure_transition,
        listing::{list_view, ListFilter, SortOrder},
    },
};

const ENTITY: &str = "Purchase Request";

#[derive(Clone)]
pub struct PurchaseRequestService {
    store: Arc<dyn PurchaseStore>,
}

impl PurchaseRequestService {
    pub fn new(store: Arc<dyn PurchaseStore>) -> Self {
        Self { store }
    }

    /// Todo pedido nasce PENDING, independente do status enviado.
    pub async fn create(&self, payload: PurchaseRequestPayload) -> Result<PurchaseRequest, AppError> {
        payload.validate()?;
        let event_id = require(payload.event_id, "eventid")?;

        if self.store.find_purchase_request_by_event(event_id).await?.is_some() {
            return Err(AppError::InvalidInput(DUPLICATE_EVENT_ID.to_string()));
        }

        let created = self
            .store
            .insert_purchase_request(NewPurchaseRequest {
                event_id,
                event_name: payload.event_name,
                vendor_id: require(payload.vendor_id, "vendorid")?,
                vendor_name: payload.vendor_name,
                cdsid: payload.cdsid,
                request_date: payload.request_date.unwrap_or_else(today),
                allocated_amount: require(payload.allocated_amount, "allocatedamount")?,
                status: PrStatus::Pending,
            })
            .await?;

        tracing::info!(prid = created.id, event_id, "Purchase request created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<PurchaseRequest, AppError> {
        self.store
            .find_purchase_request(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub async fn list(&self, criteria: &ListFilter, order: SortOrder) -> Result<Vec<PurchaseRequest>, AppError> {
        let all = self.store.list_purchase_requests().await?;
        list_view(all, criteria, order)
    }

    pub async fn update(&self, id: i32, payload: PurchaseRequestPayload) -> Result<PurchaseRequest, AppError> {
        payload.validate()?;
        let current = self.get(id).await?;
        let event_id = require(payload.event_id, "eventid")?;

        if event_id != current.event_id {
            if let Some(other) = self.store.find_purchase_request_by_event(event_id).await? {
                if other.id != id {
                    return Err(AppError::InvalidInput(DUPLICATE_EVENT_ID.to_string()));
                }
            }
        }

        let status = match payload.status {
            Some(next) => {
                ensure_transition(ENTITY, current.status, next)?;
                next
            }
            None => current.status,
        };

        let updated = PurchaseRequest {
            id,
            event_id,
            event_name: payload.event_name,
            vendor_id: require(payload.vendor_id, "vendorid")?,
            vendor_name: payload.vendor_name,
            cdsid: payload.cdsid,
            request_date: payload.request_date.unwrap_or(current.request_date),
            allocated_amount: require(payload.allocated_amount, "allocatedamount")?,
            status,
        };

        let saved = self
            .store
            .update_purchase_request(&updated)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        tracing::info!(prid = id, status = ?saved.status, "Purchase request updated");
        Ok(saved)
    }

    pub async fn approve(&self, id: i32) -> Result<PurchaseRequest, AppError> {
        self.set_status(id, PrStatus::Approved).await
    }

    pub async fn reject(&self, id: i32) -> Result<PurchaseRequest, AppError> {
        self.set_status(id, PrStatus::Rejected).await
    }

    async fn set_status(&self, id: i32, next: PrStatus) -> Result<PurchaseRequest, AppError> {
        let mut request = self.get(id).await?;
        ensure_transition(ENTITY, request.status, next)?;
        request.status = next;

        let saved = self
            .store
            .update_purchase_request(&request)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        tracing::info!(prid = id, status = ?next, "Purchase request status changed");
        Ok(saved)
    }

    /// Negociações e pedidos de compra ligados a ele continuam existindo.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.store.delete_purchase_request(id).await? {
            return Err(AppError::not_found(ENTITY, id));
        }
        tracing::info!(prid = id, "Purchase request deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn service() -> PurchaseRequestService {
        PurchaseRequestService::new(Arc::new(MemoryStore::new()))
    }

    fn payload(event_id: i32) -> PurchaseRequestPayload {
        PurchaseRequestPayload {
            event_id: Some(event_id),
            event_name: "Leadership Bootcamp".into(),
            vendor_id: Some(5),
            vendor_name: "Acme Training".into(),
            cdsid: "ab12".into(),
            request_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            allocated_amount: Some(dec!(1000)),
            status: None,
        }
    }

    #[tokio::test]
    async fn create_forces_pending_and_assigns_id() {
        let service = service();
        let created = service
            .create(PurchaseRequestPayload {
                status: Some(PrStatus::Approved),
                ..payload(1)
            })
            .await
            .unwrap();

        assert_eq!(created.status, PrStatus::Pending);
        assert_eq!(created.allocated_amount, dec!(1000));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payloads_without_writing() {
        let service = service();

        let missing_vendor = PurchaseRequestPayload {
            vendor_id: None,
            ..payload(1)
        };
        assert!(matches!(service.create(missing_vendor).await, Err(AppError::ValidationError(_))));

        let blank_cdsid = PurchaseRequestPayload {
            cdsid: "   ".into(),
            ..payload(1)
        };
        assert!(matches!(service.create(blank_cdsid).await, Err(AppError::ValidationError(_))));

        let negative = PurchaseRequestPayload {
            allocated_amount: Some(dec!(-1)),
            ..payload(1)
        };
        assert!(matches!(service.create(negative).await, Err(AppError::ValidationError(_))));

        let all = service.list(&ListFilter::default(), SortOrder::Desc).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn create_defaults_request_date_to_today() {
        let service = service();
        let created = service
            .create(PurchaseRequestPayload {
                request_date: None,
                ..payload(1)
            })
            .await
            .unwrap();
        assert_eq!(created.request_date, today());
    }

    #[tokio::test]
    async fn event_id_must_be_unique() {
        let service = service();
        let first = service.create(payload(1)).await.unwrap();
        service.create(payload(2)).await.unwrap();

        let err = service.create(payload(1)).await.unwrap_err();
        assert_eq!(err.to_string(), DUPLICATE_EVENT_ID);

        // Mudar para um eventid já usado também falha
        let err = service.update(first.id, payload(2)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        // Manter o próprio eventid não conta como duplicado
        assert!(service.update(first.id, payload(1)).await.is_ok());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_status_when_absent() {
        let service = service();
        let created = service.create(payload(1)).await.unwrap();

        let updated = service
            .update(
                created.id,
                PurchaseRequestPayload {
                    event_name: "Rust Workshop".into(),
                    allocated_amount: Some(dec!(2500.50)),
                    request_date: None,
                    ..payload(1)
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.event_name, "Rust Workshop");
        assert_eq!(updated.allocated_amount, dec!(2500.50));
        assert_eq!(updated.request_date, created.request_date);
        assert_eq!(updated.status, PrStatus::Pending);
    }

    #[tokio::test]
    async fn approve_and_reject_follow_the_transition_table() {
        let service = service();
        let first = service.create(payload(1)).await.unwrap();
        let second = service.create(payload(2)).await.unwrap();

        assert_eq!(service.approve(first.id).await.unwrap().status, PrStatus::Approved);
        assert_eq!(service.reject(second.id).await.unwrap().status, PrStatus::Rejected);

        // Estados finais não mudam
        assert!(matches!(service.reject(first.id).await, Err(AppError::InvalidInput(_))));
        let back_to_pending = PurchaseRequestPayload {
            status: Some(PrStatus::Pending),
            ..payload(2)
        };
        assert!(service.update(second.id, back_to_pending).await.is_err());
        assert_eq!(service.get(second.id).await.unwrap().status, PrStatus::Rejected);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let service = service();
        assert!(matches!(service.get(99).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.update(99, payload(1)).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.approve(99).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(99).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_then_sorts() {
        let service = service();
        for (event_id, day, name) in [(1, 3, "Bootcamp A"), (2, 9, "Offsite"), (3, 6, "bootcamp B")] {
            service
                .create(PurchaseRequestPayload {
                    event_name: name.into(),
                    request_date: NaiveDate::from_ymd_opt(2025, 1, day),
                    ..payload(event_id)
                })
                .await
                .unwrap();
        }

        let criteria = ListFilter {
            event_name: Some("BOOTCAMP".into()),
            ..Default::default()
        };
        let listed = service.list(&criteria, SortOrder::Desc).await.unwrap();
        let events: Vec<i32> = listed.iter().map(|r| r.event_id).collect();
        assert_eq!(events, vec![3, 1]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_request() {
        let service = service();
        let created = service.create(payload(1)).await.unwrap();
        service.delete(created.id).await.unwrap();
        assert!(matches!(service.get(created.id).await, Err(AppError::NotFound(_))));

        // O eventid fica livre de novo
        assert!(service.create(payload(1)).await.is_ok());
    }
}
