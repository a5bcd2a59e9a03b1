//! Window icon side effect
//!
//! A terminal has no favicon; the closest thing is the window title, so the
//! terminal sink prefixes the title with the icon's glyph.

use std::io;

use crossterm::{execute, terminal::SetTitle};
use tracing::{debug, warn};

use crate::theme::Icon;

pub const APP_TITLE: &str = "Weathering Heights";

/// Applies the selected icon somewhere the user can see it.
pub trait FaviconSink {
    fn set_favicon(&self, icon: Icon);
}

/// Title shown for `icon`.
pub fn window_title(icon: Icon) -> String {
    format!("{} {}", icon.glyph(), APP_TITLE)
}

/// Writes the window title of the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTitle;

impl FaviconSink for TerminalTitle {
    fn set_favicon(&self, icon: Icon) {
        match execute!(io::stdout(), SetTitle(window_title(icon))) {
            Ok(()) => debug!(icon = icon.name(), path = %icon.path(), "favicon applied"),
            Err(e) => warn!(error = %e, "could not set terminal title"),
        }
    }
}

/// Discards icons (headless and replay runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFavicon;

impl FaviconSink for NoFavicon {
    fn set_favicon(&self, icon: Icon) {
        debug!(icon = icon.name(), "favicon ignored");
    }
}
