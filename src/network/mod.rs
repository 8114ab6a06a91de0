//! HTTP networking module
//!
//! Provides the HTTP client used by remote entity sources.

mod client;

pub use client::{BackendResponse, HttpClient};
