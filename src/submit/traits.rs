//! Trait abstraction for form submission to enable mocking in tests

use super::error::SubmissionError;
use crate::state::FormPayload;
use async_trait::async_trait;

/// Sends a form payload to its action URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// Send one request; returns the final HTTP status on success
    async fn submit(&self, payload: FormPayload) -> Result<u16, SubmissionError>;
}
