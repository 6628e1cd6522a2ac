//! Common test utilities for integration tests.
//!
//! Re-exports the types every endpoint test needs so test files can
//! `use common::*;` and stay focused on request/response shape.

#[allow(unused_imports)]
pub use reqwest::Client;

#[allow(unused_imports)]
pub use cleanroom_client::endpoints;

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use std::time::Duration;

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
