// src/services/purchase_order_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    common::{
        error::{require, AppError},
        money::{checked_total, ExchangeRate},
    },
    db::{store::PURCHASE_ORDER_EXISTS, PurchaseStore},
    models::{
        negotiation::NegotiationStatus,
        purchase_order::{NewPurchaseOrder, PoStatus, PurchaseOrder, PurchaseOrderPayload, VendorOrderTotal},
    },
    services::{
        derivation::{order_from_negotiation, today},
        lifecycle::{ensure_transition, merge_back_reference},
        listing::{list_view, ListFilter, SortOrder},
    },
};

const ENTITY: &str = "Purchase Order";

#[derive(Clone)]
pub struct PurchaseOrderService {
    store: Arc<dyn PurchaseStore>,
    rate: ExchangeRate,
}

impl PurchaseOrderService {
    pub fn new(store: Arc<dyn PurchaseStore>, rate: ExchangeRate) -> Self {
        Self { store, rate }
    }

    /// Completa o par INR/USD. Com os dois valores informados, nada é convertido.
    fn resolve_amounts(&self, inr: Option<Decimal>, usd: Option<Decimal>) -> Result<(Decimal, Decimal), AppError> {
        match (inr, usd) {
            (Some(inr), Some(usd)) => Ok((inr, usd)),
            (Some(inr), None) => Ok((inr, self.rate.inr_to_usd(inr)?)),
            (None, Some(usd)) => Ok((self.rate.usd_to_inr(usd)?, usd)),
            (None, None) => Err(AppError::InvalidInput(
                "At least one of orderamountINR or orderamountdollar is required".to_string(),
            )),
        }
    }

    async fn ensure_request_exists(&self, prid: i32) -> Result<(), AppError> {
        match self.store.find_purchase_request(prid).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Purchase Request", prid)),
        }
    }

    /// A negociação precisa existir e ainda não ter pedido de compra.
    async fn ensure_negotiation_free(&self, negotiation_id: i32) -> Result<(), AppError> {
        if self.store.find_negotiation(negotiation_id).await?.is_none() {
            return Err(AppError::not_found("Negotiation", negotiation_id));
        }
        if self
            .store
            .find_purchase_order_by_negotiation(negotiation_id)
            .await?
            .is_some()
        {
            return Err(AppError::DerivationError(PURCHASE_ORDER_EXISTS.to_string()));
        }
        Ok(())
    }

    pub async fn create(&self, payload: PurchaseOrderPayload) -> Result<PurchaseOrder, AppError> {
        payload.validate()?;
        let (order_amount_inr, order_amount_usd) =
            self.resolve_amounts(payload.order_amount_inr, payload.order_amount_usd)?;

        if let Some(prid) = payload.prid {
            self.ensure_request_exists(prid).await?;
        }
        if let Some(negotiation_id) = payload.negotiation_id {
            self.ensure_negotiation_free(negotiation_id).await?;
        }

        let created = self
            .store
            .insert_purchase_order(NewPurchaseOrder {
                event_id: require(payload.event_id, "eventid")?,
                event_name: payload.event_name,
                vendor_id: require(payload.vendor_id, "vendorid")?,
                vendor_name: payload.vendor_name,
                cdsid: payload.cdsid,
                order_date: payload.order_date.unwrap_or_else(today),
                order_amount_inr,
                order_amount_usd,
                status: PoStatus::Pending,
                prid: payload.prid,
                negotiation_id: payload.negotiation_id,
            })
            .await?;

        tracing::info!(po_id = created.id, vendor_id = created.vendor_id, "Purchase order created");
        Ok(created)
    }

    /// Gera o pedido de compra no valor final da negociação.
    pub async fn create_from_negotiation(&self, negotiation_id: i32) -> Result<PurchaseOrder, AppError> {
        let negotiation = self
            .store
            .find_negotiation(negotiation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Negotiation", negotiation_id))?;

        if negotiation.status == NegotiationStatus::Cancelled {
            return Err(AppError::DerivationError(
                "Cannot create a purchase order from a cancelled negotiation".to_string(),
            ));
        }
        if self
            .store
            .find_purchase_order_by_negotiation(negotiation_id)
            .await?
            .is_some()
        {
            return Err(AppError::DerivationError(PURCHASE_ORDER_EXISTS.to_string()));
        }

        let created = self
            .store
            .insert_purchase_order(order_from_negotiation(&negotiation, today(), self.rate)?)
            .await?;

        tracing::info!(po_id = created.id, negotiation_id, "Purchase order created from negotiation");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<PurchaseOrder, AppError> {
        self.store
            .find_purchase_order(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub async fn list(&self, criteria: &ListFilter, order: SortOrder) -> Result<Vec<PurchaseOrder>, AppError> {
        let all = self.store.list_purchase_orders().await?;
        list_view(all, criteria, order)
    }

    /// Sem nenhum valor no payload, os valores atuais são mantidos.
    pub async fn update(&self, id: i32, payload: PurchaseOrderPayload) -> Result<PurchaseOrder, AppError> {
        payload.validate()?;
        let current = self.get(id).await?;

        let prid = merge_back_reference("prid", current.prid, payload.prid)?;
        if current.prid.is_none() {
            if let Some(prid) = prid {
                self.ensure_request_exists(prid).await?;
            }
        }
        let negotiation_id = merge_back_reference("negotiationid", current.negotiation_id, payload.negotiation_id)?;
        if current.negotiation_id.is_none() {
            if let Some(negotiation_id) = negotiation_id {
                self.ensure_negotiation_free(negotiation_id).await?;
            }
        }

        let status = match payload.status {
            Some(next) => {
                ensure_transition(ENTITY, current.status, next)?;
                next
            }
            None => current.status,
        };

        let (order_amount_inr, order_amount_usd) = match (payload.order_amount_inr, payload.order_amount_usd) {
            (None, None) => (current.order_amount_inr, current.order_amount_usd),
            (inr, usd) => self.resolve_amounts(inr, usd)?,
        };

        let updated = PurchaseOrder {
            id,
            event_id: require(payload.event_id, "eventid")?,
            event_name: payload.event_name,
            vendor_id: require(payload.vendor_id, "vendorid")?,
            vendor_name: payload.vendor_name,
            cdsid: payload.cdsid,
            order_date: payload.order_date.unwrap_or(current.order_date),
            order_amount_inr,
            order_amount_usd,
            status,
            prid,
            negotiation_id,
        };

        let saved = self
            .store
            .update_purchase_order(&updated)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        tracing::info!(po_id = id, status = ?saved.status, "Purchase order updated");
        Ok(saved)
    }

    pub async fn complete(&self, id: i32) -> Result<PurchaseOrder, AppError> {
        self.set_status(id, PoStatus::Completed).await
    }

    pub async fn reject(&self, id: i32) -> Result<PurchaseOrder, AppError> {
        self.set_status(id, PoStatus::Rejected).await
    }

    async fn set_status(&self, id: i32, next: PoStatus) -> Result<PurchaseOrder, AppError> {
        let mut order = self.get(id).await?;
        ensure_transition(ENTITY, order.status, next)?;
        order.status = next;

        let saved = self
            .store
            .update_purchase_order(&order)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        tracing::info!(po_id = id, status = ?next, "Purchase order status changed");
        Ok(saved)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.store.delete_purchase_order(id).await? {
            return Err(AppError::not_found(ENTITY, id));
        }
        tracing::info!(po_id = id, "Purchase order deleted");
        Ok(())
    }

    /// Soma dos valores em INR de todos os pedidos do fornecedor.
    pub async fn total_by_vendor(&self, vendor_id: i32) -> Result<VendorOrderTotal, AppError> {
        let orders = self.store.list_purchase_orders().await?;
        let amounts: Vec<Decimal> = orders
            .iter()
            .filter(|o| o.vendor_id == vendor_id)
            .map(|o| o.order_amount_inr)
            .collect();

        if amounts.is_empty() {
            return Err(AppError::NotFound(format!(
                "No purchase orders found for vendor id: {}",
                vendor_id
            )));
        }

        Ok(VendorOrderTotal {
            vendor_id,
            total_amount_inr: checked_total(amounts)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::{
            negotiation::{Negotiation, NewNegotiation},
            purchase_request::{NewPurchaseRequest, PrStatus},
        },
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: PurchaseOrderService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let service = PurchaseOrderService::new(store.clone(), ExchangeRate::default());
        Fixture { store, service }
    }

    fn payload() -> PurchaseOrderPayload {
        PurchaseOrderPayload {
            event_id: Some(1),
            event_name: "Leadership Bootcamp".into(),
            vendor_id: Some(5),
            vendor_name: "Acme Training".into(),
            cdsid: "ab12".into(),
            order_date: NaiveDate::from_ymd_opt(2025, 5, 20),
            order_amount_inr: Some(dec!(8300)),
            order_amount_usd: Some(dec!(100)),
            status: None,
            prid: None,
            negotiation_id: None,
        }
    }

    async fn negotiation(store: &MemoryStore, status: NegotiationStatus, prid: Option<i32>) -> Negotiation {
        store
            .insert_negotiation(NewNegotiation {
                event_id: 1,
                event_name: "Leadership Bootcamp".into(),
                vendor_id: 5,
                vendor_name: "Acme Training".into(),
                cdsid: "ab12".into(),
                negotiation_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                initial_quote_amount: dec!(1000),
                final_amount: dec!(1000),
                status,
                notes: None,
                prid,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_derives_missing_currency() {
        let Fixture { service, .. } = fixture();

        let only_inr = service
            .create(PurchaseOrderPayload {
                order_amount_usd: None,
                ..payload()
            })
            .await
            .unwrap();
        assert_eq!(only_inr.order_amount_usd, dec!(100));

        let only_usd = service
            .create(PurchaseOrderPayload {
                order_amount_inr: None,
                order_amount_usd: Some(dec!(12.5)),
                ..payload()
            })
            .await
            .unwrap();
        assert_eq!(only_usd.order_amount_inr, dec!(1037.50));

        // Os dois valores informados ficam como vieram
        let both = service
            .create(PurchaseOrderPayload {
                order_amount_inr: Some(dec!(9000)),
                order_amount_usd: Some(dec!(100)),
                ..payload()
            })
            .await
            .unwrap();
        assert_eq!((both.order_amount_inr, both.order_amount_usd), (dec!(9000), dec!(100)));
    }

    #[tokio::test]
    async fn create_requires_an_amount_and_forces_pending() {
        let Fixture { service, .. } = fixture();
        let err = service
            .create(PurchaseOrderPayload {
                order_amount_inr: None,
                order_amount_usd: None,
                ..payload()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let created = service
            .create(PurchaseOrderPayload {
                status: Some(PoStatus::Completed),
                ..payload()
            })
            .await
            .unwrap();
        assert_eq!(created.status, PoStatus::Pending);
    }

    #[tokio::test]
    async fn create_resolves_back_references() {
        let Fixture { store, service } = fixture();
        let missing = PurchaseOrderPayload {
            negotiation_id: Some(3),
            ..payload()
        };
        assert!(matches!(service.create(missing).await, Err(AppError::NotFound(_))));

        let missing_pr = PurchaseOrderPayload {
            prid: Some(3),
            ..payload()
        };
        assert!(matches!(service.create(missing_pr).await, Err(AppError::NotFound(_))));

        let n = negotiation(&store, NegotiationStatus::Pending, None).await;
        let linked = PurchaseOrderPayload {
            negotiation_id: Some(n.id),
            ..payload()
        };
        service.create(linked.clone()).await.unwrap();
        assert!(matches!(service.create(linked).await, Err(AppError::DerivationError(_))));
    }

    #[tokio::test]
    async fn derives_from_negotiation_at_final_amount() {
        let Fixture { store, service } = fixture();
        let pr = store
            .insert_purchase_request(NewPurchaseRequest {
                event_id: 1,
                event_name: "Leadership Bootcamp".into(),
                vendor_id: 5,
                vendor_name: "Acme Training".into(),
                cdsid: "ab12".into(),
                request_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                allocated_amount: dec!(1000),
                status: PrStatus::Pending,
            })
            .await
            .unwrap();
        let n = negotiation(&store, NegotiationStatus::Pending, Some(pr.id)).await;

        let order = service.create_from_negotiation(n.id).await.unwrap();

        assert_eq!(order.negotiation_id, Some(n.id));
        assert_eq!(order.prid, Some(pr.id));
        assert_eq!(order.order_amount_inr, dec!(1000));
        assert_eq!(order.order_amount_usd, dec!(12.05));
        assert_eq!(order.status, PoStatus::Pending);
        assert_eq!(order.order_date, today());

        let err = service.create_from_negotiation(n.id).await.unwrap_err();
        assert_eq!(err.to_string(), PURCHASE_ORDER_EXISTS);
        assert_eq!(store.list_purchase_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_or_missing_negotiation_cannot_derive() {
        let Fixture { store, service } = fixture();
        assert!(matches!(service.create_from_negotiation(8).await, Err(AppError::NotFound(_))));

        let cancelled = negotiation(&store, NegotiationStatus::Cancelled, None).await;
        assert!(matches!(
            service.create_from_negotiation(cancelled.id).await,
            Err(AppError::DerivationError(_))
        ));
        assert!(store.list_purchase_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_amounts_when_none_given() {
        let Fixture { service, .. } = fixture();
        let created = service.create(payload()).await.unwrap();

        let updated = service
            .update(
                created.id,
                PurchaseOrderPayload {
                    vendor_name: "Acme Learning".into(),
                    order_amount_inr: None,
                    order_amount_usd: None,
                    ..payload()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.vendor_name, "Acme Learning");
        assert_eq!(updated.order_amount_inr, dec!(8300));
        assert_eq!(updated.order_amount_usd, dec!(100));

        let updated = service
            .update(
                created.id,
                PurchaseOrderPayload {
                    order_amount_inr: Some(dec!(4150)),
                    order_amount_usd: None,
                    ..payload()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.order_amount_usd, dec!(50));
    }

    #[tokio::test]
    async fn back_references_are_write_once_on_update() {
        let Fixture { store, service } = fixture();
        let first = negotiation(&store, NegotiationStatus::Completed, None).await;
        let second = negotiation(&store, NegotiationStatus::Completed, None).await;
        let created = service.create(payload()).await.unwrap();

        let attach = PurchaseOrderPayload {
            negotiation_id: Some(first.id),
            ..payload()
        };
        assert_eq!(service.update(created.id, attach).await.unwrap().negotiation_id, Some(first.id));

        // Omitir a referência mantém a atual
        assert_eq!(service.update(created.id, payload()).await.unwrap().negotiation_id, Some(first.id));

        let swap = PurchaseOrderPayload {
            negotiation_id: Some(second.id),
            ..payload()
        };
        assert!(matches!(service.update(created.id, swap).await, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn complete_and_reject_are_terminal() {
        let Fixture { service, .. } = fixture();
        let a = service.create(payload()).await.unwrap();
        let b = service.create(payload()).await.unwrap();

        assert_eq!(service.complete(a.id).await.unwrap().status, PoStatus::Completed);
        assert_eq!(service.reject(b.id).await.unwrap().status, PoStatus::Rejected);
        assert!(matches!(service.reject(a.id).await, Err(AppError::InvalidInput(_))));
        assert_eq!(service.complete(a.id).await.unwrap().status, PoStatus::Completed);
    }

    #[tokio::test]
    async fn vendor_total_sums_inr_amounts() {
        let Fixture { service, .. } = fixture();
        service.create(payload()).await.unwrap();
        service
            .create(PurchaseOrderPayload {
                order_amount_inr: Some(dec!(1700.50)),
                ..payload()
            })
            .await
            .unwrap();
        service
            .create(PurchaseOrderPayload {
                vendor_id: Some(6),
                ..payload()
            })
            .await
            .unwrap();

        let total = service.total_by_vendor(5).await.unwrap();
        assert_eq!(total.total_amount_inr, dec!(10000.50));
        assert!(matches!(service.total_by_vendor(77).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn oversized_usd_amount_is_rejected() {
        let Fixture { store, service } = fixture();
        let huge = PurchaseOrderPayload {
            order_amount_inr: None,
            order_amount_usd: Some(Decimal::MAX),
            ..payload()
        };

        assert!(matches!(service.create(huge.clone()).await, Err(AppError::InvalidInput(_))));
        assert!(store.list_purchase_orders().await.unwrap().is_empty());

        let created = service.create(payload()).await.unwrap();
        assert!(matches!(service.update(created.id, huge).await, Err(AppError::InvalidInput(_))));
        assert_eq!(service.get(created.id).await.unwrap().order_amount_inr, dec!(8300));
    }

    #[tokio::test]
    async fn vendor_total_past_decimal_range_is_rejected() {
        let Fixture { service, .. } = fixture();
        for _ in 0..2 {
            service
                .create(PurchaseOrderPayload {
                    order_amount_inr: Some(Decimal::MAX),
                    order_amount_usd: Some(dec!(1)),
                    ..payload()
                })
                .await
                .unwrap();
        }

        assert!(matches!(service.total_by_vendor(5).await, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn delete_is_not_found_twice() {
        let Fixture { service, .. } = fixture();
        let created = service.create(payload()).await.unwrap();
        service.delete(created.id).await.unwrap();
        assert!(matches!(service.delete(created.id).await, Err(AppError::NotFound(_))));
    }
}
