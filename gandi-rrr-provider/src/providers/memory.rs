//! In-memory zone API
//!
//! Mirrors the versioning rules of the Gandi API inside the process: versions
//! are cloned, exactly one is active per zone, and the active version refuses
//! writes. Used for dry runs and as the backend of tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::traits::ZoneApi;
use crate::types::{ACTIVE_VERSION, DomainInfo, NewRecord, ZoneRecord};

const PROVIDER: &str = "memory";

#[derive(Debug, Default)]
struct Zone {
    active: u32,
    versions: BTreeMap<u32, Vec<ZoneRecord>>,
}

impl Zone {
    fn resolve(&self, version: u32) -> u32 {
        if version == ACTIVE_VERSION {
            self.active
        } else {
            version
        }
    }
}

#[derive(Debug, Default)]
struct State {
    domains: HashMap<String, u64>,
    zones: HashMap<u64, Zone>,
    next_zone_id: u64,
    next_record_id: u64,
}

impl State {
    fn add_domain(&mut self, domain: String) -> u64 {
        if let Some(zone_id) = self.domains.get(&domain) {
            return *zone_id;
        }
        self.next_zone_id += 1;
        let zone_id = self.next_zone_id;
        let mut zone = Zone {
            active: 1,
            ..Zone::default()
        };
        zone.versions.insert(1, Vec::new());
        self.zones.insert(zone_id, zone);
        self.domains.insert(domain, zone_id);
        zone_id
    }

    fn next_record_id(&mut self) -> u64 {
        self.next_record_id += 1;
        self.next_record_id
    }

    fn zone(&self, zone_id: u64) -> Result<&Zone> {
        self.zones.get(&zone_id).ok_or_else(|| invalid("zone_id", format!("unknown zone {zone_id}")))
    }

    fn zone_mut(&mut self, zone_id: u64) -> Result<&mut Zone> {
        self.zones
            .get_mut(&zone_id)
            .ok_or_else(|| invalid("zone_id", format!("unknown zone {zone_id}")))
    }

    /// Records of an inactive version, for writing.
    fn working_records(&mut self, zone_id: u64, version: u32) -> Result<&mut Vec<ZoneRecord>> {
        let zone = self.zone_mut(zone_id)?;
        let version = zone.resolve(version);
        if version == zone.active {
            return Err(invalid(
                "version",
                format!("version {version} of zone {zone_id} is active and cannot be modified"),
            ));
        }
        zone.versions
            .get_mut(&version)
            .ok_or_else(|| invalid("version", format!("unknown version {version} of zone {zone_id}")))
    }
}

fn invalid(param: &str, detail: String) -> ProviderError {
    ProviderError::InvalidParameter {
        provider: PROVIDER.to_string(),
        param: param.to_string(),
        detail,
    }
}

/// Process-local zone API
#[derive(Debug, Default)]
pub struct InMemoryZoneApi {
    state: RwLock<State>,
}

impl InMemoryZoneApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the API with an empty zone (version 1, active) for each domain.
    pub fn with_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = State::default();
        for domain in domains {
            state.add_domain(domain.into());
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Write a record straight into the active version, bypassing versioning.
    pub async fn seed_record(&self, domain: &str, record: NewRecord) -> Result<u64> {
        let mut state = self.state.write().await;
        let zone_id = *state.domains.get(domain).ok_or_else(|| ProviderError::DomainNotFound {
            provider: PROVIDER.to_string(),
            domain: domain.to_string(),
            raw_message: None,
        })?;
        let id = state.next_record_id();
        let zone = state.zone_mut(zone_id)?;
        let active = zone.active;
        zone.versions.entry(active).or_default().push(ZoneRecord {
            id,
            name: record.name,
            record_type: record.record_type,
            value: record.value,
            ttl: record.ttl,
        });
        Ok(id)
    }

    /// Currently active version of a zone.
    pub async fn active_version(&self, zone_id: u64) -> Option<u32> {
        self.state.read().await.zones.get(&zone_id).map(|z| z.active)
    }

    /// Every version number that exists for a zone, ascending.
    pub async fn version_numbers(&self, zone_id: u64) -> Vec<u32> {
        self.state
            .read()
            .await
            .zones
            .get(&zone_id)
            .map(|z| z.versions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Snapshot of a version's records (`0` for the active one).
    pub async fn records(&self, zone_id: u64, version: u32) -> Option<Vec<ZoneRecord>> {
        let state = self.state.read().await;
        let zone = state.zones.get(&zone_id)?;
        zone.versions.get(&zone.resolve(version)).cloned()
    }
}

#[async_trait]
impl ZoneApi for InMemoryZoneApi {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    async fn domain_info(&self, domain: &str) -> Result<DomainInfo> {
        let state = self.state.read().await;
        state
            .domains
            .get(domain)
            .map(|zone_id| DomainInfo {
                name: domain.to_string(),
                zone_id: *zone_id,
            })
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: PROVIDER.to_string(),
                domain: domain.to_string(),
                raw_message: None,
            })
    }

    async fn list_records(&self, zone_id: u64, version: u32) -> Result<Vec<ZoneRecord>> {
        let state = self.state.read().await;
        let zone = state.zone(zone_id)?;
        let version = zone.resolve(version);
        zone.versions
            .get(&version)
            .cloned()
            .ok_or_else(|| invalid("version", format!("unknown version {version} of zone {zone_id}")))
    }

    async fn new_version(&self, zone_id: u64, from_version: u32) -> Result<u32> {
        let mut state = self.state.write().await;
        let zone = state.zone(zone_id)?;
        let source = zone.resolve(from_version);
        let records = zone.versions.get(&source).cloned().ok_or_else(|| {
            invalid("version", format!("unknown version {source} of zone {zone_id}"))
        })?;
        let number = zone.versions.keys().next_back().copied().unwrap_or(0) + 1;

        // Cloned records get fresh ids, as they do remotely
        let cloned = records
            .into_iter()
            .map(|record| ZoneRecord {
                id: state.next_record_id(),
                ..record
            })
            .collect();
        state.zone_mut(zone_id)?.versions.insert(number, cloned);

        log::debug!("[{PROVIDER}] zone {zone_id}: version {number} cloned from {source}");
        Ok(number)
    }

    async fn add_record(
        &self,
        zone_id: u64,
        version: u32,
        record: &NewRecord,
    ) -> Result<ZoneRecord> {
        let mut state = self.state.write().await;
        let id = state.next_record_id();
        let created = ZoneRecord {
            id,
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            value: record.value.clone(),
            ttl: record.ttl,
        };
        state.working_records(zone_id, version)?.push(created.clone());
        Ok(created)
    }

    async fn delete_record(&self, zone_id: u64, version: u32, record_id: u64) -> Result<bool> {
        let mut state = self.state.write().await;
        let records = state.working_records(zone_id, version)?;
        let before = records.len();
        records.retain(|r| r.id != record_id);
        Ok(records.len() < before)
    }

    async fn set_version(&self, zone_id: u64, version: u32) -> Result<bool> {
        let mut state = self.state.write().await;
        let zone = state.zone_mut(zone_id)?;
        if version == ACTIVE_VERSION || !zone.versions.contains_key(&version) {
            return Ok(false);
        }
        zone.active = version;
        log::debug!("[{PROVIDER}] zone {zone_id}: version {version} is now active");
        Ok(true)
    }
}
