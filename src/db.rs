pub mod store;
pub use store::{NegotiationChange, PurchaseStore};
pub mod constraints;
pub mod purchase_request_repo;
pub use purchase_request_repo::PurchaseRequestRepository;
pub mod negotiation_repo;
pub use negotiation_repo::NegotiationRepository;
pub mod purchase_order_repo;
pub use purchase_order_repo::PurchaseOrderRepository;
pub mod pg_store;
pub use pg_store::PgStore;
pub mod memory_store;
pub use memory_store::MemoryStore;
