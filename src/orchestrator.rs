// src/orchestrator.rs

use crate::backend::ScreeningBackend;
use crate::dashboard::{Dashboard, SubmitPhase};
use crate::errors::Result;
use crate::form::{JobForm, validate_weights};
use crate::models::SubmitReceipt;
use crate::ui::{NotificationKind, SubmitControl, Surface};

pub const SUBMIT_FAILED: &str = "Failed to process job posting";

impl<B: ScreeningBackend, S: Surface> Dashboard<B, S> {
    /// Form submit: validate, post the job, then refresh the listing.
    ///
    /// Weights that do not sum to 100 are rejected before anything is sent.
    /// Every outcome is shown as a notification and also returned. Once the
    /// post has been attempted, the submit control is always put back to rest.
    pub async fn handle_submit(&mut self, form: &JobForm) -> Result<SubmitReceipt> {
        self.expire_notifications();
        self.phase = SubmitPhase::Validating;

        let submission = form.to_submission();
        if let Err(e) = validate_weights(&submission.weights) {
            log::info!("Rejected job posting: {}", e);
            self.report(&e, SUBMIT_FAILED);
            self.phase = SubmitPhase::Done;
            return Err(e);
        }

        self.set_submit(SubmitControl::working());
        self.clear_notifications();
        self.phase = SubmitPhase::Submitting;

        let result = match self.backend.submit_job(&submission).await {
            Ok(receipt) => {
                self.notify(
                    NotificationKind::Success,
                    format!(
                        "Job posted successfully! Processed {} resumes.",
                        receipt.processed
                    ),
                );
                // A failed refresh has already been shown as a warning.
                let _ = self.load_and_render().await;
                Ok(receipt)
            }
            Err(e) => {
                log::error!("Submission error: {}", e);
                self.report(&e, SUBMIT_FAILED);
                Err(e)
            }
        };

        self.set_submit(SubmitControl::at_rest());
        self.phase = SubmitPhase::Done;
        result
    }
}
