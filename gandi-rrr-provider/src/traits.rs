use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DomainInfo, NewRecord, ZoneRecord};

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra information available when mapping an error (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record ID (for `RecordNotFound`)
    pub record_id: Option<String>,
    /// Domain name (for `DomainNotFound`)
    pub domain: Option<String>,
}

/// Maps raw API errors onto [`ProviderError`] (internal use)
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Capabilities of a zone-versioning DNS API.
///
/// Every mutation targets an explicit `(zone_id, version)`. Version
/// [`ACTIVE_VERSION`](crate::ACTIVE_VERSION) (`0`) addresses the version that is
/// currently active. None of these operations is atomic with any other; only
/// [`set_version`](Self::set_version) changes what is served.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Look up a domain and the zone attached to it.
    async fn domain_info(&self, domain: &str) -> Result<DomainInfo>;

    /// List every record of a zone version, in provider order.
    async fn list_records(&self, zone_id: u64, version: u32) -> Result<Vec<ZoneRecord>>;

    /// Create a new version of a zone by cloning `from_version`. Returns the new version number.
    async fn new_version(&self, zone_id: u64, from_version: u32) -> Result<u32>;

    /// Add a record to a zone version.
    async fn add_record(&self, zone_id: u64, version: u32, record: &NewRecord)
    -> Result<ZoneRecord>;

    /// Delete one record from a zone version.
    ///
    /// `Ok(false)` means the provider answered without error but reported that
    /// nothing was deleted.
    async fn delete_record(&self, zone_id: u64, version: u32, record_id: u64) -> Result<bool>;

    /// Make a zone version the active one.
    ///
    /// `Ok(false)` means the provider answered without error but did not switch.
    async fn set_version(&self, zone_id: u64, version: u32) -> Result<bool>;
}
