//! Debounced search input.
//!
//! Every keystroke restarts the quiet-period timer; only the last query in
//! a quiet window fires, and only when it is long enough to be worth a
//! round-trip.

use std::time::{Duration, Instant};

pub struct SearchDebouncer {
    quiet: Duration,
    min_len: usize,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration, min_len: usize) -> Self {
        Self {
            quiet,
            min_len,
            pending: None,
        }
    }

    /// Record the current query text. Resets the quiet-period timer.
    pub fn input(&mut self, query: &str, now: Instant) {
        self.pending = Some((query.trim().to_string(), now));
    }

    /// Drop any pending query without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Return the query to run, once, when the quiet period has elapsed.
    /// Queries shorter than the minimum length are discarded instead.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let (_, at) = self.pending.as_ref()?;
        if now.duration_since(*at) < self.quiet {
            return None;
        }
        let (query, _) = self.pending.take()?;
        if query.chars().count() >= self.min_len {
            Some(query)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> SearchDebouncer {
        SearchDebouncer::new(Duration::from_millis(300), 2)
    }

    #[test]
    fn fires_only_after_quiet_period() {
        let mut d = debouncer();
        let start = Instant::now();
        d.input("hendrix", start);

        assert_eq!(d.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            d.poll(start + Duration::from_millis(300)),
            Some("hendrix".to_string())
        );
        // Fires exactly once.
        assert_eq!(d.poll(start + Duration::from_millis(400)), None);
    }

    #[test]
    fn keystroke_inside_window_postpones_the_fire() {
        let mut d = debouncer();
        let start = Instant::now();
        d.input("he", start);
        d.input("hen", start + Duration::from_millis(200));

        // The first deadline has passed but the second keystroke reset it.
        assert_eq!(d.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            d.poll(start + Duration::from_millis(500)),
            Some("hen".to_string())
        );
    }

    #[test]
    fn short_queries_never_fire() {
        let mut d = debouncer();
        let start = Instant::now();
        d.input("h", start);
        assert_eq!(d.poll(start + Duration::from_secs(1)), None);

        // Whitespace does not count toward the minimum length.
        d.input("  h  ", start);
        assert_eq!(d.poll(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn fired_query_is_trimmed() {
        let mut d = debouncer();
        let start = Instant::now();
        d.input("  miles davis ", start);
        assert_eq!(
            d.poll(start + Duration::from_secs(1)),
            Some("miles davis".to_string())
        );
    }

    #[test]
    fn cancel_discards_pending_query() {
        let mut d = debouncer();
        let start = Instant::now();
        d.input("coltrane", start);
        d.cancel();
        assert_eq!(d.poll(start + Duration::from_secs(1)), None);
    }
}
