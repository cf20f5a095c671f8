//! Adage - a quote collection with remote sync
//!
//! Adage keeps an ordered collection of text/category quotes, persisted
//! in a local key-value store, and periodically reconciles it against a
//! remote endpoint with a fixed merge policy: union by lowercased text,
//! server wins on collision.

pub mod config;
pub mod reconcile;
pub mod remote;
pub mod storage;
