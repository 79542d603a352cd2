//! # gandi-rrr-provider
//!
//! Access to versioned DNS zones, as exposed by the Gandi domain API.
//!
//! A zone has numbered versions. Exactly one is active (served to the
//! world); the others are drafts. Version `0` ([`ACTIVE_VERSION`]) always
//! addresses the active one. Editing a zone means cloning the active
//! version, changing the clone, then activating it.
//!
//! ## Backends
//!
//! | Backend | Feature Flag | Notes |
//! |---------|-------------|-------|
//! | [Gandi](https://www.gandi.net/) XML-RPC | `gandi` | API key, production or OT&E endpoint |
//! | In-memory | always | Same versioning rules, no network |
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gandi_rrr_provider::{create_zone_api, ProviderCredentials, ACTIVE_VERSION};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = create_zone_api(ProviderCredentials::Memory {
//!         domains: vec!["example.com".to_string()],
//!     })?;
//!
//!     let info = api.domain_info("example.com").await?;
//!     for record in api.list_records(info.zone_id, ACTIVE_VERSION).await? {
//!         println!("{} {} {}", record.name, record.record_type, record.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Nothing
//! is retried: a failed call surfaces immediately.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_zone_api;

// Internal mapping traits stay private
pub use traits::ZoneApi;

pub use types::{
    ACTIVE_VERSION, DomainInfo, GandiEnvironment, NewRecord, ProviderCredentials, ZoneRecord,
};

#[cfg(feature = "gandi")]
pub use providers::GandiProvider;
pub use providers::InMemoryZoneApi;
