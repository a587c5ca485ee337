//! End-to-end tests against the real Appclacks API
//!
//! Ignored by default; they create and delete real healthchecks.

pub mod acceptance;
