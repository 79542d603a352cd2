//! Shared helpers for integration tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use gandi_rrr_provider::{
    ACTIVE_VERSION, GandiEnvironment, NewRecord, ProviderCredentials, ZoneApi, create_zone_api,
};

/// Return early from a test when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: environment variable {} not set", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name so concurrent runs don't collide.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

pub fn txt_record(name: &str, value: &str) -> NewRecord {
    NewRecord {
        name: name.to_string(),
        record_type: "TXT".to_string(),
        value: value.to_string(),
        ttl: 300,
    }
}

/// Zone API plus the domain the tests may write to.
pub struct TestContext {
    pub api: Arc<dyn ZoneApi>,
    pub domain: String,
}

impl TestContext {
    /// Gandi OT&E context, from `GANDI_API_KEY` and `TEST_DOMAIN`.
    pub fn gandi() -> Option<Self> {
        let api_key = env::var("GANDI_API_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let api = create_zone_api(ProviderCredentials::Gandi {
            api_key,
            environment: GandiEnvironment::Testing,
        })
        .ok()?;

        Some(Self { api, domain })
    }

    pub fn memory() -> Self {
        let domain = "example.com".to_string();
        let api = create_zone_api(ProviderCredentials::Memory {
            domains: vec![domain.clone()],
        })
        .unwrap_or_else(|e| panic!("memory backend: {e}"));
        Self { api, domain }
    }

    pub async fn zone_id(&self) -> Option<u64> {
        self.api.domain_info(&self.domain).await.ok().map(|d| d.zone_id)
    }

    /// Remove every `_test-` record from the active version.
    pub async fn cleanup_all_test_records(&self, zone_id: u64) {
        let Ok(records) = self.api.list_records(zone_id, ACTIVE_VERSION).await else {
            return;
        };
        if !records.iter().any(|r| r.name.starts_with("_test-")) {
            return;
        }
        let Ok(version) = self.api.new_version(zone_id, ACTIVE_VERSION).await else {
            return;
        };
        if let Ok(draft) = self.api.list_records(zone_id, version).await {
            for record in draft.iter().filter(|r| r.name.starts_with("_test-")) {
                let _ = self.api.delete_record(zone_id, version, record.id).await;
            }
        }
        let _ = self.api.set_version(zone_id, version).await;
    }
}
