//! Gandi XML-RPC transport

use reqwest::header::CONTENT_TYPE;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::redact_for_log;

use super::GandiProvider;
use super::xmlrpc::{self, Value};

impl GandiProvider {
    /// Invoke a remote method. The API key is prepended to `params`.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Vec<Value>,
        context: ErrorContext,
    ) -> Result<Value> {
        let mut all_params = Vec::with_capacity(params.len() + 1);
        all_params.push(Value::from(self.api_key.as_str()));
        all_params.extend(params);

        let body = xmlrpc::encode_call(method, &all_params);
        log::debug!(
            "[{}] Request Body: {}",
            self.provider_name(),
            redact_for_log(&body, &self.api_key)
        );

        let request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(body);

        let response_text =
            HttpUtils::execute_request(request, self.provider_name(), method, &self.endpoint)
                .await?;

        match xmlrpc::decode_response(&response_text) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(fault)) => {
                log::warn!(
                    "[{}] {method} fault {}: {}",
                    self.provider_name(),
                    fault.code,
                    fault.message
                );
                let raw = if fault.code == 0 {
                    RawApiError::new(fault.message)
                } else {
                    RawApiError::with_code(fault.code.to_string(), fault.message)
                };
                Err(self.map_error(raw, context))
            }
            Err(e) => {
                log::error!("[{}] {method}: {e}", self.provider_name());
                log::error!(
                    "[{}] Raw response: {}",
                    self.provider_name(),
                    redact_for_log(&response_text, &self.api_key)
                );
                Err(self.parse_error(e))
            }
        }
    }
}
