//! Models for JSON-RPC envelopes and session payloads.

pub mod jsonrpc;
pub mod session;
