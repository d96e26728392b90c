//! HTTP client module for the roster endpoint.
//!
//! This module provides the `ApiClient` for fetching the roster (`GET`) and
//! submitting attendance (`POST`, form-encoded) against a single endpoint
//! URL, plus the `ApiError` kinds every failure is mapped to.

pub mod client;
pub mod error;

pub use client::{parse_roster_body, parse_submit_body, ApiClient, SubmitRequest};
pub use error::ApiError;
