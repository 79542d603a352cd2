//! Service configuration and token directory
//!
//! Loaded once at startup from a JSON file and shared read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use gandi_rrr_provider::{GandiEnvironment, ProviderCredentials};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Which zone API backend serves the tokens' domains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gandi,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    #[serde(default, alias = "CertFile")]
    pub cert_file: String,
    #[serde(default, alias = "KeyFile")]
    pub key_file: String,
}

impl TlsConfig {
    /// Both paths are required to serve HTTPS.
    pub fn enabled(&self) -> bool {
        !self.cert_file.is_empty() && !self.key_file.is_empty()
    }
}

/// Gandi API keys, one per environment.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GandiConfig {
    #[serde(default)]
    pub api_prod_key: String,
    #[serde(default)]
    pub api_test_key: String,
}

impl std::fmt::Debug for GandiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GandiConfig")
            .field("api_prod_key", &"<redacted>")
            .field("api_test_key", &"<redacted>")
            .finish()
    }
}

/// A pre-shared token granting access to one record type on one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Domain")]
    pub domain: String,
    #[serde(rename = "type", alias = "Type")]
    pub record_type: String,
    /// TTL given to records written with this token. Does not expire the token.
    #[serde(alias = "TTL")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    #[serde(alias = "Listen")]
    pub listen: String,
    /// Append logs here; empty means stdout.
    #[serde(default, alias = "LogFile")]
    pub log_file: String,
    /// Use the Gandi OT&E environment.
    #[serde(default, alias = "Testing")]
    pub testing: bool,
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default, alias = "TLS")]
    pub tls: TlsConfig,
    #[serde(default)]
    pub gandi: GandiConfig,
    #[serde(default, alias = "Tokens")]
    pub tokens: Vec<Token>,
}

impl Config {
    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_json(&raw)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        log::info!(
            "Loaded {} token(s) from {}",
            config.tokens.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate a config document.
    pub fn from_json(raw: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.listen.trim().is_empty() {
            return Err(CoreError::Config("listen address is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for (index, token) in self.tokens.iter().enumerate() {
            if token.id.is_empty() || token.domain.is_empty() || token.record_type.is_empty() {
                return Err(CoreError::Config(format!(
                    "token #{index}: id, domain and type are required"
                )));
            }
            if !seen.insert(token.id.as_str()) {
                return Err(CoreError::Config(format!(
                    "token #{index}: duplicate id"
                )));
            }
        }

        if self.provider == ProviderKind::Gandi && self.gandi_api_key().is_empty() {
            return Err(CoreError::Config(format!(
                "gandi.{} is required for the {} environment",
                if self.testing { "apiTestKey" } else { "apiProdKey" },
                self.gandi_environment()
            )));
        }

        if !self.tls.enabled() && (!self.tls.cert_file.is_empty() || !self.tls.key_file.is_empty())
        {
            log::warn!("Only one of tls.certFile and tls.keyFile is set, serving plain http");
        }

        Ok(())
    }

    /// Find a token by exact, case-sensitive id.
    pub fn lookup_token(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn gandi_environment(&self) -> GandiEnvironment {
        if self.testing {
            GandiEnvironment::Testing
        } else {
            GandiEnvironment::Production
        }
    }

    fn gandi_api_key(&self) -> &str {
        if self.testing {
            &self.gandi.api_test_key
        } else {
            &self.gandi.api_prod_key
        }
    }

    /// Credentials for building the zone API this config selects.
    ///
    /// The in-memory backend gets one empty zone per token domain.
    pub fn provider_credentials(&self) -> ProviderCredentials {
        match self.provider {
            ProviderKind::Gandi => ProviderCredentials::Gandi {
                api_key: self.gandi_api_key().to_string(),
                environment: self.gandi_environment(),
            },
            ProviderKind::Memory => {
                let mut domains: Vec<String> = Vec::new();
                for token in &self.tokens {
                    if !domains.contains(&token.domain) {
                        domains.push(token.domain.clone());
                    }
                }
                ProviderCredentials::Memory { domains }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMEL: &str = r#"{
        "listen": "127.0.0.1:8080",
        "provider": "memory",
        "tokens": [
            { "id": "abc123", "domain": "example.com", "type": "TXT", "ttl": 300 },
            { "id": "def456", "domain": "example.com", "type": "A", "ttl": 600 },
            { "id": "ghi789", "domain": "example.org", "type": "TXT", "ttl": 60 }
        ]
    }"#;

    #[test]
    fn parses_camel_case() {
        let config = Config::from_json(CAMEL).unwrap();
        assert_eq!(config.listen, "127.0.0.1:8080");
        assert_eq!(config.provider, ProviderKind::Memory);
        assert!(!config.tls.enabled());
        assert_eq!(config.tokens.len(), 3);
        assert_eq!(config.tokens[1].record_type, "A");
    }

    #[test]
    fn accepts_pascal_case_aliases() {
        let raw = r#"{
            "Listen": ":8443",
            "LogFile": "/var/log/gandi-rrr.log",
            "Testing": true,
            "TLS": { "CertFile": "cert.pem", "KeyFile": "key.pem" },
            "gandi": { "apiTestKey": "test-key" },
            "Tokens": [ { "Id": "abc123", "Domain": "example.com", "Type": "TXT", "TTL": 300 } ]
        }"#;
        let config = Config::from_json(raw).unwrap();
        assert_eq!(config.log_file, "/var/log/gandi-rrr.log");
        assert!(config.tls.enabled());
        assert_eq!(config.gandi_environment(), GandiEnvironment::Testing);
        assert_eq!(config.tokens[0].ttl, 300);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let config = Config::from_json(CAMEL).unwrap();
        assert_eq!(config.lookup_token("abc123").map(|t| t.ttl), Some(300));
        assert!(config.lookup_token("ABC123").is_none());
        assert!(config.lookup_token("abc12").is_none());
        assert!(config.lookup_token("").is_none());
    }

    #[test]
    fn rejects_duplicate_token_ids() {
        let raw = r#"{
            "listen": ":8080", "provider": "memory",
            "tokens": [
                { "id": "a", "domain": "example.com", "type": "TXT", "ttl": 300 },
                { "id": "a", "domain": "example.org", "type": "TXT", "ttl": 300 }
            ]
        }"#;
        assert!(matches!(Config::from_json(raw), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_incomplete_token() {
        let raw = r#"{
            "listen": ":8080", "provider": "memory",
            "tokens": [ { "id": "a", "domain": "", "type": "TXT", "ttl": 300 } ]
        }"#;
        assert!(matches!(Config::from_json(raw), Err(CoreError::Config(_))));
    }

    #[test]
    fn gandi_requires_key_for_selected_environment() {
        let raw = r#"{ "listen": ":8080", "gandi": { "apiTestKey": "only-test" } }"#;
        let err = Config::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("apiProdKey"), "{err}");
    }

    #[test]
    fn memory_credentials_list_each_domain_once() {
        let config = Config::from_json(CAMEL).unwrap();
        let ProviderCredentials::Memory { domains } = config.provider_credentials() else {
            panic!("expected memory credentials");
        };
        assert_eq!(domains, vec!["example.com", "example.org"]);
    }

    #[test]
    fn gandi_credentials_follow_testing_flag() {
        let raw = r#"{ "listen": ":8080", "testing": true, "gandi": { "apiTestKey": "k" } }"#;
        let config = Config::from_json(raw).unwrap();
        assert!(matches!(
            config.provider_credentials(),
            ProviderCredentials::Gandi { ref api_key, environment: GandiEnvironment::Testing }
                if api_key == "k"
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/gandi-rrr/config.json").unwrap_err();
        assert!(matches!(err, CoreError::Config(ref msg) if msg.contains("/nonexistent")));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("gandi-rrr-config-{}.json", std::process::id()));
        std::fs::write(&path, CAMEL).unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.tokens.len(), 3);
    }
}
