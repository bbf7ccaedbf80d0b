// src/models/negotiation.rs

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
#[sqlx(type_name = "negotiation_status", rename_all = "PascalCase")]
pub enum NegotiationStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Lifecycle for NegotiationStatus {
    const ALL: &'static [Self] = &[NegotiationStatus::Pending, NegotiationStatus::Completed, NegotiationStatus::Cancelled];

    fn label(self) -> &'static str {
        match self {
            NegotiationStatus::Pending => "Pending",
            NegotiationStatus::Completed => "Completed",
            NegotiationStatus::Cancelled => "Cancelled",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            NegotiationStatus::Pending => &[NegotiationStatus::Completed, NegotiationStatus::Cancelled],
            NegotiationStatus::Completed | NegotiationStatus::Cancelled => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Negotiation {
    #[serde(rename = "negotiationid")]
    #[schema(example = 3)]
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
    #[serde(rename = "negotiationdate")]
    pub negotiation_date: NaiveDate,
    #[serde(rename = "initialquoteamount")]
    #[schema(example = "1000.00")]
    pub initial_quote_amount: Decimal,
    #[serde(rename = "finalamount")]
    #[schema(example = "850.00")]
    pub final_amount: Decimal,
    #[serde(rename = "negotiationstatus")]
    pub status: NegotiationStatus,
    pub notes: Option<String>,
    // Referência ao pedido de origem; pode ficar órfã se o pedido for apagado
    pub prid: Option<i32>,
}

impl Negotiation {
    /// Economia obtida na negociação. Negativa quando o valor final
    /// passou da cotação inicial.
    pub fn savings(&self) -> Decimal {
        self.initial_quote_amount - self.final_amount
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNegotiation {
    pub event_id: i32,
    pub event_name: String,
    pub vendor_id: i32,
    pub vendor_name: String,
    pub cdsid: String,
    pub negotiation_date: NaiveDate,
    pub initial_quote_amount: Decimal,
    pub final_amount: Decimal,
    pub status: NegotiationStatus,
    pub notes: Option<String>,
    pub prid: Option<i32>,
}

impl NewNegotiation {
    pub fn with_id(self, id: i32) -> Negotiation {
        Negotiation {
            id,
            event_id: self.event_id,
            event_name: self.event_name,
            vendor_id: self.vendor_id,
            vendor_name: self.vendor_name,
            cdsid: self.cdsid,
            negotiation_date: self.negotiation_date,
            initial_quote_amount: self.initial_quote_amount,
            final_amount: self.final_amount,
            status: self.status,
            notes: self.notes,
            prid: self.prid,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NegotiationPayload {
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

    #[serde(rename = "negotiationdate")]
    pub negotiation_date: Option<NaiveDate>,

    #[serde(rename = "initialquoteamount")]
    #[validate(
        required(message = "initialquoteamount is required"),
        custom(function = "non_negative", message = "initialquoteamount must be zero or greater")
    )]
    pub initial_quote_amount: Option<Decimal>,

    // Sem valor final, assume a cotação inicial
    #[serde(rename = "finalamount")]
    #[validate(custom(function = "non_negative", message = "finalamount must be zero or greater"))]
    pub final_amount: Option<Decimal>,

    pub notes: Option<String>,

    pub prid: Option<i32>,
}

/// Só estes campos podem mudar depois de criada a negociação.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NegotiationUpdatePayload {
    #[serde(rename = "negotiationdate")]
    pub negotiation_date: Option<NaiveDate>,

    #[serde(rename = "finalamount")]
    #[validate(custom(function = "non_negative", message = "finalamount must be zero or greater"))]
    pub final_amount: Option<Decimal>,

    #[serde(rename = "negotiationstatus")]
    pub status: Option<NegotiationStatus>,

    /// Ausente mantém as notas atuais; texto em branco apaga.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NegotiationSavings {
    #[serde(rename = "negotiationid")]
    pub negotiation_id: i32,
    #[serde(rename = "initialquoteamount")]
    pub initial_quote_amount: Decimal,
    #[serde(rename = "finalamount")]
    pub final_amount: Decimal,
    pub savings: Decimal,
}

impl From<&Negotiation> for NegotiationSavings {
    fn from(negotiation: &Negotiation) -> Self {
        Self {
            negotiation_id: negotiation.id,
            initial_quote_amount: negotiation.initial_quote_amount,
            final_amount: negotiation.final_amount,
            savings: negotiation.savings(),
        }
    }
}
