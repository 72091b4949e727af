//! JSON-RPC client for the ERP server session endpoints.
#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_mut,
    missing_docs,
    missing_debug_implementations
)]

pub mod client;
pub mod models;

pub use client::Client;
pub use models::session::{Credentials, Session};
