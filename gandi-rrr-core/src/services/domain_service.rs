//! Domain facade over the zone API

use std::fmt;
use std::sync::Arc;

use gandi_rrr_provider::{ZoneApi, ACTIVE_VERSION};

use crate::error::CoreResult;
use crate::services::RecordTransaction;
use crate::types::Record;

/// Domain-level record access. Zones, versions and record ids stay hidden.
pub struct DomainService {
    api: Arc<dyn ZoneApi>,
}

impl fmt::Debug for DomainService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainService")
            .field("provider", &self.api.id())
            .finish()
    }
}

impl DomainService {
    #[must_use]
    pub fn new(api: Arc<dyn ZoneApi>) -> Self {
        Self { api }
    }

    pub(crate) fn api(&self) -> &dyn ZoneApi {
        self.api.as_ref()
    }

    async fn zone_id(&self, domain: &str) -> CoreResult<u64> {
        Ok(self.api.domain_info(domain).await?.zone_id)
    }

    /// Records of exactly `record_type` on the domain's active zone version,
    /// in provider order.
    pub async fn list_records(&self, domain: &str, record_type: &str) -> CoreResult<Vec<Record>> {
        let zone_id = self.zone_id(domain).await?;
        let records = self.api.list_records(zone_id, ACTIVE_VERSION).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.record_type == record_type)
            .map(Record::from)
            .collect())
    }

    /// Clone the domain's active zone version into a new working version.
    pub async fn start_transaction(&self, domain: &str) -> CoreResult<RecordTransaction<'_>> {
        let zone_id = self.zone_id(domain).await?;
        let version = self.api.new_version(zone_id, ACTIVE_VERSION).await?;
        log::debug!("Started transaction on {domain}: zone {zone_id} version {version}");
        Ok(RecordTransaction::new(self, zone_id, version))
    }

    /// Ids of the records on `(zone_id, version)` named `name` with type
    /// `record_type`. Exact, case-sensitive.
    pub(crate) async fn find_records(
        &self,
        zone_id: u64,
        version: u32,
        name: &str,
        record_type: &str,
    ) -> CoreResult<Vec<u64>> {
        let records = self.api.list_records(zone_id, version).await?;
        Ok(records
            .iter()
            .filter(|r| r.matches(name, record_type))
            .map(|r| r.id)
            .collect())
    }
}
