//! Zone API factory.

use std::sync::Arc;

use crate::error::Result;
#[cfg(feature = "gandi")]
use crate::providers::GandiProvider;
use crate::providers::InMemoryZoneApi;
use crate::traits::ZoneApi;
use crate::types::ProviderCredentials;

/// Creates a [`ZoneApi`] instance from the given credentials.
///
/// The concrete backend is determined by the [`ProviderCredentials`] variant.
/// The returned value is wrapped in `Arc<dyn ZoneApi>` so request handlers
/// can share it.
///
/// # Examples
///
/// ```rust
/// use gandi_rrr_provider::{create_zone_api, ProviderCredentials};
///
/// let api = create_zone_api(ProviderCredentials::Memory {
///     domains: vec!["example.com".to_string()],
/// }).unwrap();
/// assert_eq!(api.id(), "memory");
/// ```
pub fn create_zone_api(credentials: ProviderCredentials) -> Result<Arc<dyn ZoneApi>> {
    match credentials {
        #[cfg(feature = "gandi")]
        ProviderCredentials::Gandi {
            api_key,
            environment,
        } => {
            log::info!("Using Gandi {environment} API");
            Ok(Arc::new(GandiProvider::new(api_key, environment)?))
        }
        ProviderCredentials::Memory { domains } => {
            log::info!("Using in-memory zones for {} domain(s)", domains.len());
            Ok(Arc::new(InMemoryZoneApi::with_domains(domains)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_knows_its_domains() {
        let api = create_zone_api(ProviderCredentials::Memory {
            domains: vec!["example.com".to_string()],
        })
        .unwrap();
        let info = api.domain_info("example.com").await.unwrap();
        assert_eq!(info.name, "example.com");
    }

    #[cfg(feature = "gandi")]
    #[test]
    fn gandi_backend_builds_without_network() {
        let api = create_zone_api(ProviderCredentials::Gandi {
            api_key: "key".to_string(),
            environment: crate::types::GandiEnvironment::Testing,
        })
        .unwrap();
        assert_eq!(api.id(), "gandi");
    }
}
