//! JSON response envelopes
//!
//! Every outcome is a `200 OK` with a JSON body: `{"success":true}`,
//! `{"error":"<message>"}`, or the requested data.

use actix_web::HttpResponse;
use gandi_rrr_core::{CoreError, Record};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RecordList {
    pub domain: String,
    pub records: Vec<Record>,
}

#[derive(Serialize)]
struct Success {
    success: bool,
}

#[derive(Serialize)]
struct Failure {
    error: String,
}

/// Successful outcome of a request.
#[derive(Debug)]
pub enum Reply {
    Success,
    Record(Record),
    Records(RecordList),
}

pub fn reply(reply: &Reply) -> HttpResponse {
    match reply {
        Reply::Success => HttpResponse::Ok().json(Success { success: true }),
        Reply::Record(record) => HttpResponse::Ok().json(record),
        Reply::Records(list) => HttpResponse::Ok().json(list),
    }
}

pub fn error(err: &CoreError) -> HttpResponse {
    HttpResponse::Ok().json(Failure {
        error: err.to_string(),
    })
}
