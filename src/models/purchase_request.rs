// src/models/purchase_request.rs

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
#[sqlx(type_name = "pr_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    Pending,
    Approved,
    Rejected,
}

impl Lifecycle for PrStatus {
    const ALL: &'static [Self] = &[PrStatus::Pending, PrStatus::Approved, PrStatus::Rejected];

    fn label(self) -> &'static str {
        match self {
            PrStatus::Pending => "PENDING",
            PrStatus::Approved => "APPROVED",
            PrStatus::Rejected => "REJECTED",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            PrStatus::Pending => &[PrStatus::Approved, PrStatus::Rejected],
            PrStatus::Approved | PrStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PurchaseRequest {
    #[serde(rename = "prid")]
    #[schema(example = 12)]
    pub id: i32,
    #[serde(rename = "eventid")]
    #[schema(example = 1)]
    pub event_id: i32,
    #[serde(rename = "eventname")]
    #[schema(example = "Leadership Bootcamp")]
    pub event_name: String,
    #[serde(rename = "vendorid")]
    #[schema(example = 5)]
    pub vendor_id: i32,
    #[serde(rename = "vendorname")]
    #[schema(example = "Acme Training")]
    pub vendor_name: String,
    #[schema(example = "ab12")]
    pub cdsid: String,
    #[serde(rename = "requestdate")]
    pub request_date: NaiveDate,
    #[serde(rename = "allocatedamount")]
    #[schema(example = "1000.00")]
    pub allocated_amount: Decimal,
    #[serde(rename = "prstatus")]
    pub status: PrStatus,
}

/// Linha ainda sem id, pronta para inserir.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseRequest {
    pub event_id: i32,
    pub event_name: String,
    pub vendor_id: i32,
    pub vendor_name: String,
    pub cdsid: String,
    pub request_date: NaiveDate,
    pub allocated_amount: Decimal,
    pub status: PrStatus,
}

impl NewPurchaseRequest {
    pub fn with_id(self, id: i32) -> PurchaseRequest {
        PurchaseRequest {
            id,
            event_id: self.event_id,
            event_name: self.event_name,
            vendor_id: self.vendor_id,
            vendor_name: self.vendor_name,
            cdsid: self.cdsid,
            request_date: self.request_date,
            allocated_amount: self.allocated_amount,
            status: self.status,
        }
    }
}

// Corpo do POST e do PUT
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PurchaseRequestPayload {
    #[serde(rename = "eventid")]
    #[validate(required(message = "eventid is required"))]
    #[schema(example = 1)]
    pub event_id: Option<i32>,

    #[serde(rename = "eventname", default)]
    #[schema(example = "Leadership Bootcamp")]
    pub event_name: String,

    #[serde(rename = "vendorid")]
    #[validate(required(message = "vendorid is required"))]
    #[schema(example = 5)]
    pub vendor_id: Option<i32>,

    #[serde(rename = "vendorname", default)]
    #[schema(example = "Acme Training")]
    pub vendor_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "cdsid is required"),
        length(max = 50, message = "cdsid must be at most 50 characters")
    )]
    #[schema(example = "ab12")]
    pub cdsid: String,

    #[serde(rename = "requestdate")]
    pub request_date: Option<NaiveDate>,

    #[serde(rename = "allocatedamount")]
    #[validate(
        required(message = "allocatedamount is required"),
        custom(function = "non_negative", message = "allocatedamount must be zero or greater")
    )]
    #[schema(example = "1000.00")]
    pub allocated_amount: Option<Decimal>,

    // Ignorado na criação: todo pedido nasce PENDING
    #[serde(rename = "prstatus")]
    pub status: Option<PrStatus>,
}
