// src/ui/recording.rs

use crate::render::Listing;
use crate::ui::{Notification, Surface, SubmitControl};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    NotificationAdded(Notification),
    NotificationRemoved(u64),
    LoaderChanged(bool),
    SubmitChanged(SubmitControl),
    ListingReplaced(Listing),
}

/// Keeps every UI mutation in memory, plus the resulting on-screen state.
///
/// Useful for headless embedding and for asserting on gesture sequences.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    visible: Vec<Notification>,
    loader_visible: bool,
    submit: SubmitControl,
    listing: Option<Listing>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications on screen, newest first.
    pub fn visible_notifications(&self) -> &[Notification] {
        &self.visible
    }

    pub fn loader_visible(&self) -> bool {
        self.loader_visible
    }

    pub fn submit(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    pub fn loader_toggles(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::LoaderChanged(visible) => Some(*visible),
                _ => None,
            })
            .collect()
    }

    pub fn submit_states(&self) -> Vec<&SubmitControl> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::SubmitChanged(control) => Some(control),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn notification_added(&mut self, notification: &Notification) {
        self.visible.insert(0, notification.clone());
        self.events
            .push(SurfaceEvent::NotificationAdded(notification.clone()));
    }

    fn notification_removed(&mut self, id: u64) {
        self.visible.retain(|n| n.id != id);
        self.events.push(SurfaceEvent::NotificationRemoved(id));
    }

    fn loader_changed(&mut self, visible: bool) {
        self.loader_visible = visible;
        self.events.push(SurfaceEvent::LoaderChanged(visible));
    }

    fn submit_changed(&mut self, control: &SubmitControl) {
        self.submit = control.clone();
        self.events.push(SurfaceEvent::SubmitChanged(control.clone()));
    }

    fn listing_replaced(&mut self, listing: &Listing) {
        self.listing = Some(listing.clone());
        self.events.push(SurfaceEvent::ListingReplaced(listing.clone()));
    }
}
