// src/ui/mod.rs

use crate::render::Listing;

pub mod notify;
pub mod recording;
pub mod terminal;

pub use notify::{Notification, NotificationKind, Notifications};
pub use recording::{RecordingSurface, SurfaceEvent};
pub use terminal::{ListingFormat, TerminalSurface};

pub const SUBMIT_LABEL: &str = "Post Job";
pub const BUSY_LABEL: &str = "Processing...";

/// Where the dashboard's state becomes visible.
///
/// The dashboard calls these hooks after it changes its own state. It does
/// not look anything up on the surface.
pub trait Surface {
    /// A notification was inserted directly after the anchor.
    fn notification_added(&mut self, notification: &Notification);

    fn notification_removed(&mut self, id: u64);

    /// Only called when visibility actually changes.
    fn loader_changed(&mut self, visible: bool);

    fn submit_changed(&mut self, control: &SubmitControl);

    /// The resume container was rebuilt from scratch.
    fn listing_replaced(&mut self, listing: &Listing);
}

/// State of the form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
    pub busy: bool,
}

impl SubmitControl {
    pub fn at_rest() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
            busy: false,
        }
    }

    pub fn working() -> Self {
        Self {
            enabled: false,
            label: BUSY_LABEL.to_string(),
            busy: true,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        *self == Self::at_rest()
    }
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self::at_rest()
    }
}

/// The page-wide loading indicator. There is only ever one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loader {
    visible: bool,
}

impl Loader {
    /// Returns whether the visibility changed.
    pub fn set(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
