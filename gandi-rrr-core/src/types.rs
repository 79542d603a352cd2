//! Public record shape

use gandi_rrr_provider::ZoneRecord;
use serde::{Deserialize, Serialize};

/// A DNS record as callers see it. Provider ids stay inside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
}

impl From<ZoneRecord> for Record {
    fn from(record: ZoneRecord) -> Self {
        Self {
            name: record.name,
            value: record.value,
            record_type: record.record_type,
            ttl: record.ttl,
        }
    }
}
