// src/services/derivation.rs

use chrono::{NaiveDate, Utc};

use crate::{
    common::{error::AppError, money::ExchangeRate},
    models::{
        negotiation::{Negotiation, NegotiationStatus, NewNegotiation},
        purchase_order::{NewPurchaseOrder, PoStatus},
        purchase_request::PurchaseRequest,
    },
};

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Pedido → Negociação. A cotação inicial e o valor final partem do valor alocado.
pub fn negotiation_from_request(request: &PurchaseRequest, today: NaiveDate) -> NewNegotiation {
    NewNegotiation {
        event_id: request.event_id,
        event_name: request.event_name.clone(),
        vendor_id: request.vendor_id,
        vendor_name: request.vendor_name.clone(),
        cdsid: request.cdsid.clone(),
        negotiation_date: today,
        initial_quote_amount: request.allocated_amount,
        final_amount: request.allocated_amount,
        status: NegotiationStatus::Pending,
        notes: None,
        prid: Some(request.id),
    }
}

/// Negociação → Pedido de compra, no valor final negociado.
pub fn order_from_negotiation(
    negotiation: &Negotiation,
    today: NaiveDate,
    rate: ExchangeRate,
) -> Result<NewPurchaseOrder, AppError> {
    Ok(NewPurchaseOrder {
        event_id: negotiation.event_id,
        event_name: negotiation.event_name.clone(),
        vendor_id: negotiation.vendor_id,
        vendor_name: negotiation.vendor_name.clone(),
        cdsid: negotiation.cdsid.clone(),
        order_date: today,
        order_amount_inr: negotiation.final_amount,
        order_amount_usd: rate.inr_to_usd(negotiation.final_amount)?,
        status: PoStatus::Pending,
        prid: negotiation.prid,
        negotiation_id: Some(negotiation.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase_request::PrStatus;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn negotiation_copies_request_fields() {
        let request = PurchaseRequest {
            id: 4,
            event_id: 1,
            event_name: "Bootcamp".into(),
            vendor_id: 5,
            vendor_name: "Acme".into(),
            cdsid: "ab12".into(),
            request_date: date(1),
            allocated_amount: dec!(1000),
            status: PrStatus::Pending,
        };

        let negotiation = negotiation_from_request(&request, date(2));

        assert_eq!(negotiation.prid, Some(4));
        assert_eq!(negotiation.event_id, 1);
        assert_eq!(negotiation.vendor_id, 5);
        assert_eq!(negotiation.vendor_name, "Acme");
        assert_eq!(negotiation.cdsid, "ab12");
        assert_eq!(negotiation.negotiation_date, date(2));
        assert_eq!(negotiation.initial_quote_amount, dec!(1000));
        assert_eq!(negotiation.final_amount, dec!(1000));
        assert_eq!(negotiation.status, NegotiationStatus::Pending);
    }

    #[test]
    fn order_chains_references_and_converts_amount() {
        let negotiation = NewNegotiation {
            event_id: 1,
            event_name: "Bootcamp".into(),
            vendor_id: 5,
            vendor_name: "Acme".into(),
            cdsid: "ab12".into(),
            negotiation_date: date(2),
            initial_quote_amount: dec!(1000),
            final_amount: dec!(830),
            status: NegotiationStatus::Completed,
            notes: Some("10% off".into()),
            prid: Some(4),
        }
        .with_id(9);

        let order = order_from_negotiation(&negotiation, date(3), ExchangeRate::default()).unwrap();

        assert_eq!(order.negotiation_id, Some(9));
        assert_eq!(order.prid, Some(4));
        assert_eq!(order.order_amount_inr, dec!(830));
        assert_eq!(order.order_amount_usd, dec!(10));
        assert_eq!(order.status, PoStatus::Pending);
        assert_eq!(order.order_date, date(3));
    }
}
