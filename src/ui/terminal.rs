// src/ui/terminal.rs

use std::io::Write;

use crate::render::Listing;
use crate::ui::{Notification, Surface, SubmitControl};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingFormat {
    #[default]
    Text,
    Html,
}

/// Prints the dashboard to a terminal: listing on stdout, everything else on stderr.
pub struct TerminalSurface {
    format: ListingFormat,
}

impl TerminalSurface {
    pub fn new(format: ListingFormat) -> Self {
        Self { format }
    }
}

impl Surface for TerminalSurface {
    fn notification_added(&mut self, notification: &Notification) {
        eprintln!("{}  {}", notification.kind.icon(), notification.message);
    }

    fn notification_removed(&mut self, id: u64) {
        log::debug!("Notification {} dismissed", id);
    }

    fn loader_changed(&mut self, visible: bool) {
        if visible {
            eprintln!("⏳ Loading resumes...");
        }
    }

    fn submit_changed(&mut self, control: &SubmitControl) {
        if control.busy {
            eprintln!("⏳ {}", control.label);
        } else {
            log::debug!("Submit control restored: {}", control.label);
        }
    }

    fn listing_replaced(&mut self, listing: &Listing) {
        let rendered = match self.format {
            ListingFormat::Text => listing.to_string(),
            ListingFormat::Html => match listing.to_html() {
                Ok(html) => html,
                Err(e) => {
                    log::error!("Could not render listing as HTML: {}", e);
                    return;
                }
            },
        };

        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(rendered.as_bytes()).and_then(|_| out.flush()) {
            log::error!("Could not write listing: {}", e);
        }
    }
}
