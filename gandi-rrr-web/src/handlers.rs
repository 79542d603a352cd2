//! Request dispatch
//!
//! Every path and method lands in [`dispatch`]. The `Token` header selects
//! the domain and record type; the percent-decoded path (minus its leading
//! `/`) names the record.

use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, web};
use gandi_rrr_core::{CoreError, CoreResult, Token};
use serde::Deserialize;

use crate::logging::RequestLogger;
use crate::responder::{self, RecordList, Reply};
use crate::state::AppState;

const TOKEN_HEADER: &str = "Token";

/// POST body.
#[derive(Debug, Deserialize)]
struct RecordRequest {
    #[serde(default, alias = "Name")]
    name: String,
    #[serde(default, alias = "Value")]
    value: String,
}

impl RecordRequest {
    fn parse(body: &[u8]) -> CoreResult<Self> {
        let request: Self =
            serde_json::from_slice(body).map_err(|e| CoreError::Validation(e.to_string()))?;
        if request.name.is_empty() || request.value.is_empty() {
            return Err(CoreError::Validation("Invalid request".to_string()));
        }
        Ok(request)
    }
}

pub async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let log = RequestLogger::new(&req);
    log.message("Request start");

    let response = match handle(&req, &body, &state, &log).await {
        Ok(reply) => responder::reply(&reply),
        Err(err) => {
            log.error(&err);
            responder::error(&err)
        }
    };

    log.message("Request end");
    response
}

async fn handle(
    req: &HttpRequest,
    body: &[u8],
    state: &AppState,
    log: &RequestLogger,
) -> CoreResult<Reply> {
    let method = req.method();
    if ![Method::GET, Method::POST, Method::DELETE].contains(method) {
        return Err(CoreError::InvalidMethod);
    }

    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|id| state.config.lookup_token(id))
        .ok_or(CoreError::InvalidToken)?;

    let path = urlencoding::decode(req.path())
        .map_err(|e| CoreError::Validation(format!("Invalid record name: {e}")))?;
    let record_name = path.strip_prefix('/').unwrap_or(&path);

    if method == Method::GET {
        get(state, token, log, record_name).await
    } else if method == Method::DELETE {
        delete(state, token, log, record_name).await
    } else {
        let request = RecordRequest::parse(body)?;
        post(state, token, log, &request).await
    }
}

async fn get(
    state: &AppState,
    token: &Token,
    log: &RequestLogger,
    record_name: &str,
) -> CoreResult<Reply> {
    let records = state
        .domains
        .list_records(&token.domain, &token.record_type)
        .await?;

    if record_name.is_empty() {
        log.message(&format!(
            "Returning {} records of type '{}' for domain '{}'",
            records.len(),
            token.record_type,
            token.domain
        ));
        return Ok(Reply::Records(RecordList {
            domain: token.domain.clone(),
            records,
        }));
    }

    let record = records
        .into_iter()
        .find(|r| r.name == record_name)
        .ok_or_else(|| CoreError::RecordNotFound(record_name.to_string()))?;
    log.message(&format!(
        "Returning record '{record_name}' of type '{}' for domain '{}'",
        token.record_type, token.domain
    ));
    Ok(Reply::Record(record))
}

async fn post(
    state: &AppState,
    token: &Token,
    log: &RequestLogger,
    request: &RecordRequest,
) -> CoreResult<Reply> {
    let mut txn = state.domains.start_transaction(&token.domain).await?;
    txn.delete_records(&request.name, &token.record_type).await?;
    txn.add_record(&request.name, &token.record_type, &request.value, token.ttl)
        .await?;
    txn.commit().await?;

    log.message(&format!(
        "Added [{}] '{}' - '{}' to domain '{}'",
        token.record_type, request.name, request.value, token.domain
    ));
    Ok(Reply::Success)
}

async fn delete(
    state: &AppState,
    token: &Token,
    log: &RequestLogger,
    record_name: &str,
) -> CoreResult<Reply> {
    let mut txn = state.domains.start_transaction(&token.domain).await?;
    let deleted = txn.delete_records(record_name, &token.record_type).await?;
    txn.commit().await?;

    log.message(&format!(
        "Removed {deleted} [{}] '{record_name}' records from domain '{}'",
        token.record_type, token.domain
    ));
    Ok(Reply::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lower_and_pascal_case_bodies() {
        let lower = RecordRequest::parse(br#"{"name":"www","value":"hello"}"#).unwrap();
        assert_eq!((lower.name.as_str(), lower.value.as_str()), ("www", "hello"));
        let pascal = RecordRequest::parse(br#"{"Name":"www","Value":"hello"}"#).unwrap();
        assert_eq!(pascal.name, "www");
    }

    #[test]
    fn empty_fields_are_invalid() {
        let bodies: [&[u8]; 3] = [br#"{"name":"","value":"hello"}"#, br#"{"name":"www"}"#, b"{}"];
        for body in bodies {
            let err = RecordRequest::parse(body).unwrap_err();
            assert_eq!(err.to_string(), "Invalid request");
        }
    }

    #[test]
    fn malformed_json_reports_parse_message() {
        let err = RecordRequest::parse(b"{not json").unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg != "Invalid request"));
        assert!(RecordRequest::parse(b"").is_err());
    }
}
