// src/services/negotiation_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    common::{
        error::{require, AppError},
        money::ExchangeRate,
    },
    db::{
        store::{NEGOTIATION_EXISTS, PURCHASE_ORDER_EXISTS},
        NegotiationChange, PurchaseStore,
    },
    models::{
        negotiation::{
            Negotiation, NegotiationPayload, NegotiationSavings, NegotiationStatus, NegotiationUpdatePayload,
            NewNegotiation,
        },
        purchase_request::PrStatus,
        status::Lifecycle,
    },
    services::{
        derivation::{negotiation_from_request, order_from_negotiation, today},
        lifecycle::ensure_transition,
        listing::{list_view, ListFilter, SortOrder},
    },
};

const ENTITY: &str = "Negotiation";

#[derive(Clone)]
pub struct NegotiationService {
    store: Arc<dyn PurchaseStore>,
    rate: ExchangeRate,
}

impl NegotiationService {
    pub fn new(store: Arc<dyn PurchaseStore>, rate: ExchangeRate) -> Self {
        Self { store, rate }
    }

    /// Negociação avulsa. Se vier `prid`, o pedido precisa existir e ainda não ter negociação.
    pub async fn create(&self, payload: NegotiationPayload) -> Result<Negotiation, AppError> {
        payload.validate()?;

        if let Some(prid) = payload.prid {
            if self.store.find_purchase_request(prid).await?.is_none() {
                return Err(AppError::not_found("Purchase Request", prid));
            }
            if self.store.find_negotiation_by_request(prid).await?.is_some() {
                return Err(AppError::DerivationError(NEGOTIATION_EXISTS.to_string()));
            }
        }

        let initial = require(payload.initial_quote_amount, "initialquoteamount")?;
        let created = self
            .store
            .insert_negotiation(NewNegotiation {
                event_id: require(payload.event_id, "eventid")?,
                event_name: payload.event_name,
                vendor_id: require(payload.vendor_id, "vendorid")?,
                vendor_name: payload.vendor_name,
                cdsid: payload.cdsid,
                negotiation_date: payload.negotiation_date.unwrap_or_else(today),
                initial_quote_amount: initial,
                final_amount: payload.final_amount.unwrap_or(initial),
                status: NegotiationStatus::Pending,
                notes: payload.notes,
                prid: payload.prid,
            })
            .await?;

        tracing::info!(negotiation_id = created.id, prid = ?created.prid, "Negotiation created");
        Ok(created)
    }

    /// Abre a negociação de um pedido PENDING.
    pub async fn create_from_request(&self, prid: i32) -> Result<Negotiation, AppError> {
        let request = self
            .store
            .find_purchase_request(prid)
            .await?
            .ok_or_else(|| AppError::not_found("Purchase Request", prid))?;

        if request.status != PrStatus::Pending {
            return Err(AppError::DerivationError(format!(
                "Can only create negotiation from PENDING purchase requests. Current status: {}",
                request.status.label()
            )));
        }
        if self.store.find_negotiation_by_request(prid).await?.is_some() {
            return Err(AppError::DerivationError(NEGOTIATION_EXISTS.to_string()));
        }

        let created = self
            .store
            .insert_negotiation(negotiation_from_request(&request, today()))
            .await?;

        tracing::info!(negotiation_id = created.id, prid, "Negotiation created from purchase request");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Negotiation, AppError> {
        self.store
            .find_negotiation(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub async fn list(&self, criteria: &ListFilter, order: SortOrder) -> Result<Vec<Negotiation>, AppError> {
        let all = self.store.list_negotiations().await?;
        list_view(all, criteria, order)
    }

    pub async fn list_with_savings(&self) -> Result<Vec<Negotiation>, AppError> {
        let all = self.store.list_negotiations().await?;
        Ok(all.into_iter().filter(|n| n.savings() > Decimal::ZERO).collect())
    }

    pub async fn savings(&self, id: i32) -> Result<NegotiationSavings, AppError> {
        let negotiation = self.get(id).await?;
        Ok(NegotiationSavings::from(&negotiation))
    }

    /// Atualiza data, valor final, status e notas.
    ///
    /// Quando o status muda e a negociação veio de um pedido, o resultado volta
    /// para o pedido: Completed aprova (e gera o pedido de compra, se ainda não
    /// houver) e Cancelled rejeita. Tudo é gravado numa única transação.
    pub async fn update(&self, id: i32, payload: NegotiationUpdatePayload) -> Result<Negotiation, AppError> {
        payload.validate()?;
        let current = self.get(id).await?;

        let status = match payload.status {
            Some(next) => {
                ensure_transition(ENTITY, current.status, next)?;
                next
            }
            None => current.status,
        };

        let updated = Negotiation {
            negotiation_date: payload.negotiation_date.unwrap_or(current.negotiation_date),
            final_amount: payload.final_amount.unwrap_or(current.final_amount),
            status,
            notes: match payload.notes {
                Some(notes) if notes.trim().is_empty() => None,
                Some(notes) => Some(notes),
                None => current.notes.clone(),
            },
            ..current.clone()
        };

        let mut change = NegotiationChange {
            negotiation: updated,
            request_status: None,
            new_order: None,
        };
        if status != current.status {
            self.plan_outcome(&mut change).await?;
        }

        let saved = self
            .store
            .commit_negotiation_change(change)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        tracing::info!(negotiation_id = id, status = saved.status.label(), "Negotiation updated");
        Ok(saved)
    }

    async fn plan_outcome(&self, change: &mut NegotiationChange) -> Result<(), AppError> {
        let negotiation = &change.negotiation;
        let request_status = match negotiation.status {
            NegotiationStatus::Completed => PrStatus::Approved,
            NegotiationStatus::Cancelled => PrStatus::Rejected,
            NegotiationStatus::Pending => return Ok(()),
        };
        let Some(prid) = negotiation.prid else {
            return Ok(());
        };

        let Some(request) = self.store.find_purchase_request(prid).await? else {
            tracing::warn!(negotiation_id = negotiation.id, prid, "Linked purchase request no longer exists");
            return Ok(());
        };
        if !request.status.can_become(request_status) {
            tracing::warn!(
                negotiation_id = negotiation.id,
                prid,
                from = request.status.label(),
                to = request_status.label(),
                "Purchase request status left unchanged"
            );
            return Ok(());
        }

        let mut new_order = None;
        if negotiation.status == NegotiationStatus::Completed {
            if self.store.find_purchase_order_by_negotiation(negotiation.id).await?.is_some() {
                tracing::info!(negotiation_id = negotiation.id, "{}", PURCHASE_ORDER_EXISTS);
            } else {
                new_order = Some(order_from_negotiation(negotiation, today(), self.rate)?);
            }
        }

        change.request_status = Some((prid, request_status));
        change.new_order = new_order;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.store.delete_negotiation(id).await? {
            return Err(AppError::not_found(ENTITY, id));
        }
        tracing::info!(negotiation_id = id, "Negotiation deleted");
        Ok(())
    }
}
