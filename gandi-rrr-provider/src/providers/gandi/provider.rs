//! Gandi `ZoneApi` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ErrorContext, ZoneApi};
use crate::types::{DomainInfo, NewRecord, ZoneRecord};

use super::GandiProvider;
use super::types::record_params;
use super::xmlrpc::Value;

#[async_trait]
impl ZoneApi for GandiProvider {
    fn id(&self) -> &'static str {
        "gandi"
    }

    async fn domain_info(&self, domain: &str) -> Result<DomainInfo> {
        let context = ErrorContext {
            domain: Some(domain.to_string()),
            ..ErrorContext::default()
        };
        let value = self
            .call("domain.info", vec![Value::from(domain)], context)
            .await?;
        self.parse_domain_info(domain, &value)
    }

    async fn list_records(&self, zone_id: u64, version: u32) -> Result<Vec<ZoneRecord>> {
        let value = self
            .call(
                "domain.zone.record.list",
                vec![self.id_value(zone_id, "zone_id")?, Value::from(version)],
                ErrorContext::default(),
            )
            .await?;
        self.parse_records(&value)
    }

    async fn new_version(&self, zone_id: u64, from_version: u32) -> Result<u32> {
        let value = self
            .call(
                "domain.zone.version.new",
                vec![self.id_value(zone_id, "zone_id")?, Value::from(from_version)],
                ErrorContext::default(),
            )
            .await?;
        self.int_result(&value, "domain.zone.version.new")
    }

    async fn add_record(
        &self,
        zone_id: u64,
        version: u32,
        record: &NewRecord,
    ) -> Result<ZoneRecord> {
        let value = self
            .call(
                "domain.zone.record.add",
                vec![
                    self.id_value(zone_id, "zone_id")?,
                    Value::from(version),
                    record_params(record),
                ],
                ErrorContext::default(),
            )
            .await?;
        self.parse_record(&value)
    }

    async fn delete_record(&self, zone_id: u64, version: u32, record_id: u64) -> Result<bool> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            ..ErrorContext::default()
        };
        let value = self
            .call(
                "domain.zone.record.delete",
                vec![
                    self.id_value(zone_id, "zone_id")?,
                    Value::from(version),
                    Value::structure([("id", self.id_value(record_id, "record_id")?)]),
                ],
                context,
            )
            .await?;
        // Answers with the number of records removed
        let deleted: i64 = self.int_result(&value, "domain.zone.record.delete")?;
        Ok(deleted > 0)
    }

    async fn set_version(&self, zone_id: u64, version: u32) -> Result<bool> {
        let value = self
            .call(
                "domain.zone.version.set",
                vec![self.id_value(zone_id, "zone_id")?, Value::from(version)],
                ErrorContext::default(),
            )
            .await?;
        self.bool_result(&value, "domain.zone.version.set")
    }
}
