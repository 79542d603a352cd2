use serde::{Deserialize, Serialize};

// ============ Zone Types ============

/// Version number that addresses whichever version of a zone is currently active.
pub const ACTIVE_VERSION: u32 = 0;

/// Domain information as reported by the zone API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    /// Fully qualified domain name.
    pub name: String,
    /// Identifier of the zone currently attached to the domain.
    pub zone_id: u64,
}

/// A record stored in one version of a zone.
///
/// The `id` is assigned by the provider and is only meaningful within the
/// `(zone, version)` it was listed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Provider-assigned record identifier.
    pub id: u64,
    /// Record name relative to the zone (e.g., `"www"` or `"@"` for apex).
    pub name: String,
    /// Record type as the provider spells it (e.g., `"TXT"`).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record value.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

impl ZoneRecord {
    /// Whether this record has exactly the given name and type (case-sensitive).
    #[must_use]
    pub fn matches(&self, name: &str, record_type: &str) -> bool {
        self.name == name && self.record_type == record_type
    }
}

/// Request to add a record to a zone version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Record name relative to the zone.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record value.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

// ============ Credentials ============

/// Gandi API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GandiEnvironment {
    /// The live API.
    #[default]
    Production,
    /// The OT&E sandbox, where changes have no effect on real zones.
    Testing,
}

impl std::fmt::Display for GandiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Everything needed to build a zone API backend.
///
/// Pass this to [`create_zone_api()`](crate::create_zone_api) to instantiate one.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "provider": "gandi", "credentials": { "api_key": "...", "environment": "testing" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Gandi XML-RPC API. Requires feature `gandi`.
    #[cfg(feature = "gandi")]
    #[serde(rename = "gandi")]
    Gandi {
        /// Gandi API key for the selected environment.
        api_key: String,
        /// Which Gandi endpoint to talk to.
        #[serde(default)]
        environment: GandiEnvironment,
    },

    /// Process-local backend. Each listed domain starts with an empty zone.
    #[serde(rename = "memory")]
    Memory {
        /// Domains to create at startup.
        #[serde(default)]
        domains: Vec<String>,
    },
}
