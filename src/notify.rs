//! User-facing notifications
//!
//! Every outcome the user must acknowledge (rejected file, missing selection,
//! upload result) goes through a [`Notifier`]. Diagnostics for developers go
//! through `tracing` instead.

use parking_lot::Mutex;

/// Sink for blocking, user-visible alerts
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        println!("{message}");
    }
}

/// Keeps every alert in memory, in order.
///
/// Useful for embedding the form behind another front end and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Snapshot of the alerts raised so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Most recent alert
    pub fn last(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.alert("first");
        notifier.alert("second");

        assert_eq!(notifier.messages(), vec!["first", "second"]);
        assert_eq!(notifier.last().as_deref(), Some("second"));
    }
}
