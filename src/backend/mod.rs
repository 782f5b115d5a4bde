// src/backend/mod.rs

use crate::errors::Result;
use crate::models::{JobSubmission, ResumeResult, SubmitReceipt};

pub mod http;

pub use http::HttpBackend;

/// The screening service as seen from the dashboard.
///
/// Implementations own their deadlines: a call that outlives its budget must
/// resolve to [`crate::errors::ScreenError::Timeout`].
///
/// Note: async fns are written out as `impl Future` so callers can require `Send`.
pub trait ScreeningBackend: Send + Sync {
    /// Posts a job with its weights and resume attachments.
    ///
    /// Callers must have checked that the weights sum to 100.
    fn submit_job(
        &self,
        submission: &JobSubmission,
    ) -> impl std::future::Future<Output = Result<SubmitReceipt>> + Send;

    /// Lists the resumes scored so far, exactly as the server returns them.
    fn fetch_resumes(&self) -> impl std::future::Future<Output = Result<Vec<ResumeResult>>> + Send;

    /// Absolute link for downloading a stored resume.
    fn download_url(&self, path: &str) -> Option<String>;
}
