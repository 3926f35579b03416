use std::fmt;

use log::{error, info, warn};

/// Level of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An action went through.
    Success,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// Receiver for user-visible messages. Passed in by the caller on every
/// operation that may notify; there is no global sink.
pub trait NotificationSink {
    /// Surfaces `message` to the user at `severity`.
    fn show_notification(&self, message: &str, severity: Severity);
}

/// Sink for headless use: notifications end up in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn show_notification(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!("[{severity}] {message}"),
            Severity::Warning => warn!("[{severity}] {message}"),
            Severity::Error => error!("[{severity}] {message}"),
        }
    }
}
