//! User-visible alerts.

use tracing::warn;

/// Surface for blocking, user-facing messages.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        warn!(%message, "alert");
        eprintln!("⚠️  {message}");
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingNotifier;

#[cfg(test)]
mod recording {
    use std::sync::{Arc, Mutex};

    use super::Notifier;

    /// Collects alerts so tests can inspect them.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct RecordingNotifier {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }
}
