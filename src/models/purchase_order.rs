// src/models/purchase_order.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    status::Lifecycle,
    validation::{non_negative, not_blank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "po_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoStatus {
    Pending,
    Completed,
    Rejected,
}

impl Lifecycle for PoStatus {
    const ALL: &'static [Self] = &[PoStatus::Pending, PoStatus::Completed, PoStatus::Rejected];

    fn label(self) -> &'static str {
        match self {
            PoStatus::Pending => "PENDING",
            PoStatus::Completed => "COMPLETED",
            PoStatus::Rejected => "REJECTED",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            PoStatus::Pending => &[PoStatus::Completed, PoStatus::Rejected],
            PoStatus::Completed | PoStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PurchaseOrder {
    #[serde(rename = "po_id")]
    #[schema(example = 9)]
    pub id: i32,
    #[serde(rename = "eventid")]
    pub event_id: i32,
    #[serde(rename = "eventname")]
    pub event_name: String,
    #[serde(rename = "vendorid")]
    pub vendor_id: i32,
    #[serde(rename = "vendorname")]
    pub vendor_name: String,
    pub cdsid: String,
    #[serde(rename = "orderdate")]
    pub order_date: NaiveDate,
    #[serde(rename = "orderamountINR")]
    #[schema(example = "8300.00")]
    pub order_amount_inr: Decimal,
    #[serde(rename = "orderamountdollar")]
    #[schema(example = "100.00")]
    pub order_amount_usd: Decimal,
    #[serde(rename = "po_status")]
    pub status: PoStatus,
    pub prid: Option<i32>,
    #[serde(rename = "negotiationid")]
    pub negotiation_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseOrder {
    pub event_id: i32,
    pub event_name: String,
    pub vendor_id: i32,
    pub vendor_name: String,
    pub cdsid: String,
    pub order_date: NaiveDate,
    pub order_amount_inr: Decimal,
    pub order_amount_usd: Decimal,
    pub status: PoStatus,
    pub prid: Option<i32>,
    pub negotiation_id: Option<i32>,
}

impl NewPurchaseOrder {
    pub fn with_id(self, id: i32) -> PurchaseOrder {
        PurchaseOrder {
            id,
            event_id: self.event_id,
            event_name: self.event_name,
            vendor_id: self.vendor_id,
            vendor_name: self.vendor_name,
            cdsid: self.cdsid,
            order_date: self.order_date,
            order_amount_inr: self.order_amount_inr,
            order_amount_usd: self.order_amount_usd,
            status: self.status,
            prid: self.prid,
            negotiation_id: self.negotiation_id,
        }
    }
}

// Mesmo corpo para criar e atualizar
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PurchaseOrderPayload {
    #[serde(rename = "eventid")]
    #[validate(required(message = "eventid is required"))]
    pub event_id: Option<i32>,

    #[serde(rename = "eventname", default)]
    pub event_name: String,

    #[serde(rename = "vendorid")]
    #[validate(required(message = "vendorid is required"))]
    pub vendor_id: Option<i32>,

    #[serde(rename = "vendorname", default)]
    pub vendor_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "cdsid is required"),
        length(max = 50, message = "cdsid must be at most 50 characters")
    )]
    pub cdsid: String,

    #[serde(rename = "orderdate")]
    pub order_date: Option<NaiveDate>,

    // Basta um dos dois valores; o outro sai da cotação configurada
    #[serde(rename = "orderamountINR")]
    #[validate(custom(function = "non_negative", message = "orderamountINR must be zero or greater"))]
    pub order_amount_inr: Option<Decimal>,

    #[serde(rename = "orderamountdollar")]
    #[validate(custom(function = "non_negative", message = "orderamountdollar must be zero or greater"))]
    pub order_amount_usd: Option<Decimal>,

    #[serde(rename = "po_status")]
    pub status: Option<PoStatus>,

    pub prid: Option<i32>,

    #[serde(rename = "negotiationid")]
    pub negotiation_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VendorOrderTotal {
    #[serde(rename = "vendorid")]
    pub vendor_id: i32,
    #[serde(rename = "totalamountINR")]
    pub total_amount_inr: Decimal,
}
