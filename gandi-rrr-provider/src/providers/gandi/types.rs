//! Conversions between XML-RPC values and zone types

use crate::error::{ProviderError, Result};
use crate::traits::ProviderErrorMapper;
use crate::types::{DomainInfo, NewRecord, ZoneRecord};

use super::GandiProvider;
use super::xmlrpc::Value;

impl GandiProvider {
    fn int_member<T: TryFrom<i64>>(&self, value: &Value, name: &str) -> Result<T> {
        let raw = value
            .member(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| self.parse_error(format!("missing integer member '{name}'")))?;
        T::try_from(raw).map_err(|_| self.parse_error(format!("member '{name}' out of range: {raw}")))
    }

    fn str_member(&self, value: &Value, name: &str) -> Result<String> {
        value
            .member(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.parse_error(format!("missing string member '{name}'")))
    }

    /// Narrow a scalar integer result.
    pub(crate) fn int_result<T: TryFrom<i64>>(&self, value: &Value, what: &str) -> Result<T> {
        let raw = value
            .as_i64()
            .ok_or_else(|| self.parse_error(format!("{what}: expected integer, got {value:?}")))?;
        T::try_from(raw).map_err(|_| self.parse_error(format!("{what}: out of range: {raw}")))
    }

    pub(crate) fn bool_result(&self, value: &Value, what: &str) -> Result<bool> {
        value
            .as_bool()
            .ok_or_else(|| self.parse_error(format!("{what}: expected boolean, got {value:?}")))
    }

    /// Encode an id as an XML-RPC `<int>`, which is signed 64-bit.
    pub(crate) fn id_value(&self, id: u64, param: &str) -> Result<Value> {
        i64::try_from(id)
            .map(Value::Int)
            .map_err(|_| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: param.to_string(),
                detail: format!("{id} exceeds the XML-RPC integer range"),
            })
    }

    pub(crate) fn parse_domain_info(&self, domain: &str, value: &Value) -> Result<DomainInfo> {
        match value.member("zone_id") {
            Some(Value::Int(_)) => Ok(DomainInfo {
                name: value
                    .member("fqdn")
                    .and_then(Value::as_str)
                    .unwrap_or(domain)
                    .to_string(),
                zone_id: self.int_member(value, "zone_id")?,
            }),
            // Domains served by external nameservers have no zone
            Some(Value::Nil) | None => Err(ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: domain.to_string(),
                raw_message: Some("domain has no zone attached".to_string()),
            }),
            Some(other) => Err(self.parse_error(format!("zone_id: unexpected value {other:?}"))),
        }
    }

    pub(crate) fn parse_record(&self, value: &Value) -> Result<ZoneRecord> {
        Ok(ZoneRecord {
            id: self.int_member(value, "id")?,
            name: self.str_member(value, "name")?,
            record_type: self.str_member(value, "type")?,
            value: self.str_member(value, "value")?,
            ttl: self.int_member(value, "ttl")?,
        })
    }

    pub(crate) fn parse_records(&self, value: &Value) -> Result<Vec<ZoneRecord>> {
        value
            .as_array()
            .ok_or_else(|| self.parse_error("record list: expected array"))?
            .iter()
            .map(|item| self.parse_record(item))
            .collect()
    }
}

pub(crate) fn record_params(record: &NewRecord) -> Value {
    Value::structure([
        ("name", Value::from(record.name.as_str())),
        ("type", Value::from(record.record_type.as_str())),
        ("value", Value::from(record.value.as_str())),
        ("ttl", Value::from(record.ttl)),
    ])
}
