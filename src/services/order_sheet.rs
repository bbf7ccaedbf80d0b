// src/services/order_sheet.rs

use crate::{
    common::money::{format_inr, format_usd},
    models::{purchase_order::PurchaseOrder, status::Lifecycle},
};

const NOT_AVAILABLE: &str = "N/A";

/// Pedido de compra já formatado para impressão (PDF e e-mail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSheet {
    pub po_number: String,
    pub order_date: String,
    pub status: String,
    pub event_id: String,
    pub event_name: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub cdsid: String,
    pub amount_inr: String,
    pub amount_usd: String,
    pub prid: String,
    pub negotiation_id: String,
}

pub fn po_number(id: i32) -> String {
    format!("PO-{}", id)
}

fn reference(id: Option<i32>) -> String {
    id.map_or_else(|| NOT_AVAILABLE.to_string(), |id| id.to_string())
}

impl From<&PurchaseOrder> for OrderSheet {
    fn from(order: &PurchaseOrder) -> Self {
        Self {
            po_number: po_number(order.id),
            order_date: order.order_date.format("%d/%m/%Y").to_string(),
            status: order.status.label().to_string(),
            event_id: order.event_id.to_string(),
            event_name: order.event_name.clone(),
            vendor_id: order.vendor_id.to_string(),
            vendor_name: order.vendor_name.clone(),
            cdsid: order.cdsid.clone(),
            amount_inr: format!("Rs. {}", format_inr(order.order_amount_inr)),
            amount_usd: format!("$ {}", format_usd(order.order_amount_usd)),
            prid: reference(order.prid),
            negotiation_id: reference(order.negotiation_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase_order::PoStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn order() -> PurchaseOrder {
        PurchaseOrder {
            id: 42,
            event_id: 7,
            event_name: "Leadership Bootcamp".into(),
            vendor_id: 3,
            vendor_name: "Acme Training".into(),
            cdsid: "ab12".into(),
            order_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            order_amount_inr: dec!(123456),
            order_amount_usd: dec!(1487.42),
            status: PoStatus::Completed,
            prid: Some(4),
            negotiation_id: None,
        }
    }

    #[test]
    fn formats_every_field_for_print() {
        let sheet = OrderSheet::from(&order());

        assert_eq!(sheet.po_number, "PO-42");
        assert_eq!(sheet.order_date, "09/03/2025");
        assert_eq!(sheet.status, "COMPLETED");
        assert_eq!(sheet.event_id, "7");
        assert_eq!(sheet.vendor_id, "3");
        assert_eq!(sheet.cdsid, "ab12");
        assert_eq!(sheet.amount_inr, "Rs. 1,23,456.00");
        assert_eq!(sheet.amount_usd, "$ 1,487.42");
        assert_eq!(sheet.prid, "4");
        assert_eq!(sheet.negotiation_id, "N/A");
    }
}
