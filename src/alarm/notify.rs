//! Desktop notifications for phase completion.
//!
//! Uses notify-rust for cross-platform delivery. Notifications are
//! best-effort: the platform service may be missing or permission may be
//! denied, and the caller swallows every failure.

use std::sync::{Arc, Mutex};

use notify_rust::{Notification, Timeout};
use tracing::debug;

use super::error::AlarmError;

/// How long the notification stays on screen.
const NOTIFICATION_TIMEOUT_MS: u32 = 5000;

// ============================================================================
// Notifier
// ============================================================================

/// Delivers a short user-facing notification.
pub trait Notifier: Send + Sync {
    /// Shows a notification with the given title and body.
    fn notify(&self, title: &str, body: &str) -> Result<(), AlarmError>;
}

// ============================================================================
// DesktopNotifier
// ============================================================================

/// Notifier backed by the platform notification service.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Creates a new desktop notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), AlarmError> {
        Notification::new()
            .summary(title)
            .body(body)
            .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
            .show()
            .map_err(|e| AlarmError::Notification(e.to_string()))?;

        debug!(title, "notification delivered");
        Ok(())
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// A notifier that records requests instead of showing anything.
#[derive(Debug, Default)]
pub struct MockNotifier {
    /// Recorded (title, body) pairs.
    sent: Arc<Mutex<Vec<(String, String)>>>,
    /// Whether notify calls should fail.
    fail: bool,
}

impl MockNotifier {
    /// Creates a mock notifier that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock notifier whose notify calls fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Returns the notifications recorded so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), AlarmError> {
        if self.fail {
            return Err(AlarmError::Notification("mock failure".to_string()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((title.to_string(), body.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_notifications() {
        let notifier = MockNotifier::new();

        notifier.notify("Focus complete", "Take a break").unwrap();

        let recorded = notifier.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "Focus complete");
        assert_eq!(recorded[0].1, "Take a break");
    }

    #[test]
    fn test_failing_mock() {
        let notifier = MockNotifier::failing();

        assert!(notifier.notify("a", "b").is_err());
        assert!(notifier.recorded().is_empty());
    }
}
