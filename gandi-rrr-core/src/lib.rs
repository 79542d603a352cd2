//! gandi-rrr core library
//!
//! Record-level access to DNS zones that are edited through versions:
//! - Domain facade (`DomainService`): list a domain's records of one type, open transactions
//! - Record transaction (`RecordTransaction`): delete / add on a cloned version, then activate it
//! - Configuration and token directory (`Config`)
//!
//! The zone backend is abstracted behind `gandi_rrr_provider::ZoneApi`.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{Config, ProviderKind, TlsConfig, Token, DEFAULT_CONFIG_PATH};
pub use error::{CoreError, CoreResult};
pub use services::{DomainService, RecordTransaction, TransactionState};
pub use types::Record;
