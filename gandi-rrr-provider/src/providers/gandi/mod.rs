//! Gandi domain API (XML-RPC) provider

mod error;
mod http;
mod provider;
mod types;
mod xmlrpc;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::types::GandiEnvironment;

pub(crate) const GANDI_PRODUCTION_URL: &str = "https://rpc.gandi.net/xmlrpc/";
pub(crate) const GANDI_TESTING_URL: &str = "https://rpc.ote.gandi.net/xmlrpc/";

/// Gandi zone API client
pub struct GandiProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
}

impl GandiProvider {
    pub fn new(api_key: String, environment: GandiEnvironment) -> Result<Self> {
        let endpoint = match environment {
            GandiEnvironment::Production => GANDI_PRODUCTION_URL,
            GandiEnvironment::Testing => GANDI_TESTING_URL,
        };
        Self::with_endpoint(api_key, endpoint)
    }

    /// Talk to an arbitrary XML-RPC endpoint speaking the Gandi domain API.
    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpUtils::create_client("gandi")?,
            api_key,
            endpoint: endpoint.into(),
        })
    }
}
