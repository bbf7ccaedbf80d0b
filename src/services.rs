pub mod lifecycle;
pub mod derivation;
pub mod listing;
pub mod order_sheet;
pub mod purchase_request_service;
pub use purchase_request_service::PurchaseRequestService;
pub mod negotiation_service;
pub use negotiation_service::NegotiationService;
pub mod purchase_order_service;
pub use purchase_order_service::PurchaseOrderService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod mail_service;
pub use mail_service::MailService;
