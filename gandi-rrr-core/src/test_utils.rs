//! Test helpers
//!
//! A zone API that records every call and can be told to fail.

use async_trait::async_trait;
use gandi_rrr_provider::{
    DomainInfo, InMemoryZoneApi, NewRecord, ProviderError, Result, ZoneApi, ZoneRecord,
};
use tokio::sync::RwLock;

pub fn record(name: &str, record_type: &str, value: &str) -> NewRecord {
    NewRecord {
        name: name.to_string(),
        record_type: record_type.to_string(),
        value: value.to_string(),
        ttl: 300,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DomainInfo { domain: String },
    ListRecords { zone_id: u64, version: u32 },
    NewVersion { zone_id: u64, from_version: u32 },
    AddRecord { zone_id: u64, version: u32, name: String },
    DeleteRecord { zone_id: u64, version: u32, record_id: u64 },
    SetVersion { zone_id: u64, version: u32 },
}

#[derive(Debug, Default)]
struct Faults {
    /// 1-based index of the delete call that errors.
    fail_delete_at: Option<usize>,
    /// 1-based index of the delete call that is not acknowledged.
    unack_delete_at: Option<usize>,
    fail_add: bool,
    unack_commit: bool,
    deletes: usize,
}

// ===== FaultyZoneApi =====

pub struct FaultyZoneApi {
    inner: InMemoryZoneApi,
    calls: RwLock<Vec<Call>>,
    faults: RwLock<Faults>,
}

impl FaultyZoneApi {
    pub fn with_domains<const N: usize>(domains: [&str; N]) -> Self {
        Self {
            inner: InMemoryZoneApi::with_domains(domains),
            calls: RwLock::new(Vec::new()),
            faults: RwLock::new(Faults::default()),
        }
    }

    pub fn inner(&self) -> &InMemoryZoneApi {
        &self.inner
    }

    pub async fn seed(&self, domain: &str, record: NewRecord) -> u64 {
        self.inner.seed_record(domain, record).await.unwrap()
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    pub async fn fail_delete_at(&self, nth: usize) {
        self.faults.write().await.fail_delete_at = Some(nth);
    }

    pub async fn unack_delete_at(&self, nth: usize) {
        self.faults.write().await.unack_delete_at = Some(nth);
    }

    pub async fn fail_add(&self) {
        self.faults.write().await.fail_add = true;
    }

    pub async fn unack_commit(&self) {
        self.faults.write().await.unack_commit = true;
    }

    async fn log(&self, call: Call) {
        self.calls.write().await.push(call);
    }
}

fn injected(detail: &str) -> ProviderError {
    ProviderError::NetworkError {
        provider: "faulty".to_string(),
        detail: detail.to_string(),
    }
}

#[async_trait]
impl ZoneApi for FaultyZoneApi {
    fn id(&self) -> &'static str {
        "faulty"
    }

    async fn domain_info(&self, domain: &str) -> Result<DomainInfo> {
        self.log(Call::DomainInfo {
            domain: domain.to_string(),
        })
        .await;
        self.inner.domain_info(domain).await
    }

    async fn list_records(&self, zone_id: u64, version: u32) -> Result<Vec<ZoneRecord>> {
        self.log(Call::ListRecords { zone_id, version }).await;
        self.inner.list_records(zone_id, version).await
    }

    async fn new_version(&self, zone_id: u64, from_version: u32) -> Result<u32> {
        self.log(Call::NewVersion {
            zone_id,
            from_version,
        })
        .await;
        self.inner.new_version(zone_id, from_version).await
    }

    async fn add_record(
        &self,
        zone_id: u64,
        version: u32,
        record: &NewRecord,
    ) -> Result<ZoneRecord> {
        self.log(Call::AddRecord {
            zone_id,
            version,
            name: record.name.clone(),
        })
        .await;
        if self.faults.read().await.fail_add {
            return Err(injected("add failed"));
        }
        self.inner.add_record(zone_id, version, record).await
    }

    async fn delete_record(&self, zone_id: u64, version: u32, record_id: u64) -> Result<bool> {
        self.log(Call::DeleteRecord {
            zone_id,
            version,
            record_id,
        })
        .await;
        let nth = {
            let mut faults = self.faults.write().await;
            faults.deletes += 1;
            faults.deletes
        };
        let faults = self.faults.read().await;
        if faults.fail_delete_at == Some(nth) {
            return Err(injected("delete failed"));
        }
        if faults.unack_delete_at == Some(nth) {
            return Ok(false);
        }
        drop(faults);
        self.inner.delete_record(zone_id, version, record_id).await
    }

    async fn set_version(&self, zone_id: u64, version: u32) -> Result<bool> {
        self.log(Call::SetVersion { zone_id, version }).await;
        if self.faults.read().await.unack_commit {
            return Ok(false);
        }
        self.inner.set_version(zone_id, version).await
    }
}
