//! Services

mod domain_service;
mod transaction;

pub use domain_service::DomainService;
pub use transaction::{RecordTransaction, TransactionState};
