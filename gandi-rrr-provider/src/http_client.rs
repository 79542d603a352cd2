//! Generic HTTP client tools
//!
//! Shared request plumbing for providers that talk HTTP. Each provider builds its
//! own `RequestBuilder` (URL, headers, body) and hands it over here for sending,
//! logging and reading the response.
//!
//! Requests are sent exactly once: there is no retry and no request timeout,
//! so every transport failure surfaces as `NetworkError`.

use reqwest::{Client, RequestBuilder};

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Build the HTTP client shared by one provider instance.
    ///
    /// No connect or request timeout is set: a hung remote call hangs the caller.
    pub fn create_client(provider_name: &str) -> Result<Client, ProviderError> {
        Client::builder()
            .user_agent(concat!("gandi-rrr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })
    }

    /// Performs an HTTP request and returns the response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - provider name (for logging and errors)
    /// * `method_name` - remote method name (for logging)
    /// * `url` - endpoint (for logging)
    ///
    /// # Returns
    /// * `Ok(response_text)` for any 2xx response
    /// * `Err(ProviderError::NetworkError)` on transport failure or a non-2xx status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<String, ProviderError> {
        log::debug!("[{provider_name}] {method_name} -> {url}");

        let response =
            request_builder
                .send()
                .await
                .map_err(|e| ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                })?;

        let status = response.status();
        log::debug!("[{provider_name}] Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            log::warn!("[{provider_name}] {method_name} failed with HTTP {status}");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {}: {}", status.as_u16(), truncate_for_log(&response_text)),
            });
        }

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok(response_text)
    }
}
