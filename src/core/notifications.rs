//! Transient user-visible notices

use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }
        self.toasts.push(Toast {
            level,
            message,
            expires_at: now + TOAST_DURATION,
        });
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastLevel::Info, message, now);
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastLevel::Success, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastLevel::Error, message, now);
    }

    /// Drop expired notices, returns true if any was removed
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Time until the next notice expires
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .iter()
            .map(|toast| toast.expires_at.saturating_duration_since(now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let now = Instant::now();
        let mut notifications = Notifications::default();
        notifications.success("Saved", now);
        notifications.error("Oops", now + Duration::from_secs(1));

        assert!(!notifications.expire(now + Duration::from_secs(2)));
        assert!(notifications.expire(now + TOAST_DURATION));
        assert_eq!(notifications.toasts().len(), 1);
        assert_eq!(notifications.toasts()[0].level, ToastLevel::Error);
        assert_eq!(
            notifications.next_expiry(now + TOAST_DURATION),
            Some(Duration::from_secs(1))
        );
    }
}
