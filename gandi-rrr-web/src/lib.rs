//! gandi-rrr HTTP service
//!
//! Token-scoped read / replace / delete of single DNS records.

pub mod handlers;
pub mod logging;
pub mod responder;
pub mod server;
pub mod state;

pub use server::{configure, run};
pub use state::AppState;
