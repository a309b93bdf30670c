//! Transient toast notifications.
//!
//! `ToastManager` owns the list of currently visible toasts. Toasts expire
//! on their own after a lifetime, or earlier via `dismiss`. Components that
//! want to show feedback without holding the manager return `Notice` values
//! instead; the event loop feeds those in.

use std::time::{Duration, Instant};

/// Severity of a toast, in escalating order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A piece of user feedback produced by a component that does not own the
/// `ToastManager` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// Handle to a pushed toast, usable for manual dismissal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Debug)]
pub struct Toast {
    pub id: ToastId,
    pub severity: Severity,
    pub text: String,
    expires_at: Instant,
}

pub struct ToastManager {
    toasts: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl ToastManager {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    /// Push a toast with the manager's default lifetime. Returns immediately.
    pub fn push(&mut self, severity: Severity, text: impl Into<String>) -> ToastId {
        self.push_for(severity, text, self.lifetime)
    }

    /// Push a toast that expires after `lifetime`.
    pub fn push_for(
        &mut self,
        severity: Severity,
        text: impl Into<String>,
        lifetime: Duration,
    ) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            severity,
            text: text.into(),
            expires_at: Instant::now() + lifetime,
        });
        id
    }

    pub fn info(&mut self, text: impl Into<String>) -> ToastId {
        self.push(Severity::Info, text)
    }

    pub fn success(&mut self, text: impl Into<String>) -> ToastId {
        self.push(Severity::Success, text)
    }

    pub fn warning(&mut self, text: impl Into<String>) -> ToastId {
        self.push(Severity::Warning, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> ToastId {
        self.push(Severity::Error, text)
    }

    pub fn notice(&mut self, notice: Notice) -> ToastId {
        self.push(notice.severity, notice.text)
    }

    /// Remove a toast before its lifetime ends. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: ToastId) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Dismiss the oldest visible toast, if any.
    pub fn dismiss_oldest(&mut self) {
        if let Some(id) = self.toasts.first().map(|t| t.id) {
            self.dismiss(id);
        }
    }

    /// Drop every toast whose lifetime has elapsed. Called once per loop
    /// iteration.
    pub fn tick(&mut self) {
        self.expire_at(Instant::now());
    }

    fn expire_at(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Currently visible toasts, oldest first.
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFETIME: Duration = Duration::from_millis(3000);

    fn manager() -> ToastManager {
        ToastManager::new(LIFETIME)
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut toasts = manager();
        let a = toasts.info("a");
        let b = toasts.error("b");
        let c = toasts.success("c");
        assert!(a < b && b < c);
        assert_eq!(toasts.visible().len(), 3);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut toasts = manager();
        let id = toasts.warning("going away");
        toasts.dismiss(id);
        assert!(toasts.is_empty());
        // Dismissing again is fine.
        toasts.dismiss(id);
        assert!(toasts.is_empty());
    }

    #[test]
    fn toasts_expire_after_lifetime() {
        let mut toasts = manager();
        let start = Instant::now();
        toasts.info("short-lived");

        toasts.expire_at(start + Duration::from_millis(2999));
        assert_eq!(toasts.visible().len(), 1);

        toasts.expire_at(start + LIFETIME + Duration::from_millis(10));
        assert!(toasts.is_empty());
    }

    #[test]
    fn custom_lifetime_outlives_default() {
        let mut toasts = manager();
        let start = Instant::now();
        toasts.push_for(Severity::Error, "sticky", Duration::from_secs(10));
        toasts.expire_at(start + Duration::from_secs(5));
        assert_eq!(toasts.visible().len(), 1);
    }

    #[test]
    fn dismiss_oldest_removes_in_insertion_order() {
        let mut toasts = manager();
        toasts.info("first");
        let second = toasts.info("second");
        toasts.dismiss_oldest();
        assert_eq!(toasts.visible().len(), 1);
        assert_eq!(toasts.visible()[0].id, second);
    }
}
