// src/dashboard.rs

use std::time::Duration;
use tokio::time::Instant;

use crate::backend::ScreeningBackend;
use crate::errors::{Result, ScreenError};
use crate::models::ResumeResult;
use crate::render::{Listing, build_listing};
use crate::ui::{Loader, Notification, NotificationKind, Notifications, SubmitControl, Surface};

pub const REFRESH_FAILED: &str = "Could not refresh resumes. Please try again.";

/// Where the latest submit gesture is.
///
/// `Idle` means no submit has run yet. `Done` means the latest one finished;
/// the dashboard accepts a new gesture from either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Done,
}

impl SubmitPhase {
    /// True while a submit gesture is running.
    pub fn in_progress(self) -> bool {
        matches!(self, SubmitPhase::Validating | SubmitPhase::Submitting)
    }
}

/// The screening page: a backend plus the surface it is shown on.
///
/// Each user gesture is one `&mut self` call awaited to completion, so two
/// gestures never interleave.
pub struct Dashboard<B, S> {
    pub(crate) backend: B,
    pub(crate) surface: S,
    pub(crate) notifications: Notifications,
    pub(crate) loader: Loader,
    pub(crate) submit: SubmitControl,
    pub(crate) phase: SubmitPhase,
    pub(crate) listing: Option<Listing>,
}

impl<B: ScreeningBackend, S: Surface> Dashboard<B, S> {
    pub fn new(backend: B, surface: S, notification_ttl: Duration) -> Self {
        Self {
            backend,
            surface,
            notifications: Notifications::new(notification_ttl),
            loader: Loader::default(),
            submit: SubmitControl::at_rest(),
            phase: SubmitPhase::Idle,
            listing: None,
        }
    }

    /// Page load: fetch the resumes and show them.
    ///
    /// A failure becomes a warning and is also returned. The loader is hidden
    /// again whatever happens.
    pub async fn load_and_render(&mut self) -> Result<usize> {
        self.expire_notifications();
        self.set_loading(true);

        let outcome = self.backend.fetch_resumes().await;
        let result = match outcome {
            Ok(resumes) => {
                log::debug!("Fetched {} resume(s)", resumes.len());
                self.render(Some(resumes.as_slice()));
                Ok(resumes.len())
            }
            Err(e) => {
                log::warn!("Fetch resumes error: {}", e);
                let message = if e.is_timeout() {
                    e.to_string()
                } else {
                    REFRESH_FAILED.to_string()
                };
                self.notify(NotificationKind::Warning, message);
                Err(e)
            }
        };

        self.set_loading(false);
        result
    }

    /// Rebuilds the resume container from `resumes`.
    pub fn render(&mut self, resumes: Option<&[ResumeResult]>) -> &Listing {
        let backend = &self.backend;
        let listing = build_listing(resumes, |path| backend.download_url(path));
        self.surface.listing_replaced(&listing);
        self.listing.insert(listing)
    }

    /// Shows a notification in front of the others. Returns its id.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let notification = self.notifications.push(kind, message);
        self.surface.notification_added(notification);
        notification.id
    }

    pub fn clear_notifications(&mut self) {
        for id in self.notifications.clear() {
            self.surface.notification_removed(id);
        }
    }

    /// Drops notifications whose time is up.
    pub fn expire_notifications(&mut self) {
        for id in self.notifications.expire(Instant::now()) {
            self.surface.notification_removed(id);
        }
    }

    /// When the next notification is due to disappear, if any are showing.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.notifications.next_expiry()
    }

    pub fn set_loading(&mut self, visible: bool) {
        if self.loader.set(visible) {
            self.surface.loader_changed(visible);
        }
    }

    pub(crate) fn set_submit(&mut self, control: SubmitControl) {
        self.submit = control;
        self.surface.submit_changed(&self.submit);
    }

    pub(crate) fn report(&mut self, error: &ScreenError, fallback: &str) {
        let message = error.to_string();
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        self.notify(NotificationKind::Error, message);
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn loading(&self) -> bool {
        self.loader.is_visible()
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    /// Phase of the latest submit gesture; `Done` once it has finished.
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// The most recently rendered listing.
    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_parts(self) -> (B, S) {
        (self.backend, self.surface)
    }
}
