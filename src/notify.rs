//! User-facing messages for save and export outcomes.

use std::path::Path;

use crate::error::{PlotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A message for the status line or a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// Message for the result of [`PlotSession::save`](crate::PlotSession::save).
    pub fn for_save(result: &Result<()>, path: &Path) -> Self {
        match result {
            Ok(()) => Self::info("Settings saved", format!("Settings saved to {}", path.display())),
            Err(PlotError::Validation(e)) => Self::error("Invalid parameters", e.to_string()),
            Err(e) => Self::error("Settings not saved", e.to_string()),
        }
    }

    /// Message for the result of an SVG export. Permission problems get their
    /// own caption.
    pub fn for_export(result: &Result<()>, path: &Path) -> Self {
        match result {
            Ok(()) => Self::info("Image saved", format!("Plot saved to {}", path.display())),
            Err(PlotError::Export(e)) => Self::error(e.caption(), e.to_string()),
            Err(e) => Self::error("Error", e.to_string()),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
