//! Common test utilities
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::FakeAppclacks;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let fake = FakeAppclacks::start().await;
//!     let provider = fake.provider();
//!     // ...
//! }
//! ```

pub mod fake_api;
pub mod fixtures;

pub use fake_api::FakeAppclacks;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
