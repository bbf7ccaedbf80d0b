pub mod status;
pub mod validation;
pub mod purchase_request;
pub mod negotiation;
pub mod purchase_order;
