pub mod purchase_requests;
pub mod negotiations;
pub mod purchase_orders;
pub mod documents;
