//! Gandi fault mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::GandiProvider;

/// Fault code Gandi returns for an unknown or revoked API key.
const FAULT_INVALID_API_KEY: &str = "510150";

/// Gandi faults carry their meaning in the fault string, e.g.
/// `Error on object : OBJECT_DOMAIN (CAUSE_NOTFOUND) [Domain 'x' doesn't exist]`.
impl ProviderErrorMapper for GandiProvider {
    fn provider_name(&self) -> &'static str {
        "gandi"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let message = raw.message.as_str();

        if raw.code.as_deref() == Some(FAULT_INVALID_API_KEY) || message.contains("Invalid API key")
        {
            return ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            };
        }

        if message.contains("CAUSE_NORIGHT") {
            return ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            };
        }

        if message.contains("CAUSE_NOTFOUND") {
            return if message.contains("OBJECT_DOMAIN") {
                ProviderError::DomainNotFound {
                    provider: self.provider_name().to_string(),
                    domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            } else {
                ProviderError::RecordNotFound {
                    provider: self.provider_name().to_string(),
                    record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            };
        }

        if message.contains("CAUSE_BADPARAMETER") {
            return ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "general".to_string(),
                detail: raw.message,
            };
        }

        self.unknown_error(raw)
    }
}
