//! Integration tests
//!
//! These tests run the provider and the HTTP client together against the
//! in-memory Appclacks API.

pub mod client_tests;
pub mod lifecycle_tests;
