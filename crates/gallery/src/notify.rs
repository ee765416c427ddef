//! User-facing notices.

use parking_lot::Mutex;
use tracing::warn;

/// Shown when a drop or file selection carries no file list.
pub const NO_FILE_FOUND: &str = "No file found";
/// Shown once per batch that contained a non-image file.
pub const ONLY_IMAGES: &str = "Only images are allowed!";

/// Displays a blocking notice to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!(notice = message, "user notice");
    }
}

/// Keeps every notice, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn count(&self, message: &str) -> usize {
        self.messages.lock().iter().filter(|m| *m == message).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
