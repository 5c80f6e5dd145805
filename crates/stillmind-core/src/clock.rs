//! Last observed server time
//!
//! The app compensates for client clock drift by remembering the most recent
//! `serverDate` the backend reported. [`ServerClock`] is the explicit,
//! shareable handle for that value: the owner constructs one, hands clones
//! to the HTTP layer, and reads back the last observation wherever drift
//! matters.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Shared cell holding the most recently observed server time.
///
/// Clones share the same underlying value. Each observation overwrites the
/// previous one; there is no expiry and no monotonicity check.
#[derive(Debug, Clone, Default)]
pub struct ServerClock {
    inner: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl ServerClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a server time, replacing any previous observation.
    pub fn observe(&self, t: DateTime<Utc>) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(t);
    }

    /// The most recently observed server time, if any.
    pub fn last_observed(&self) -> Option<DateTime<Utc>> {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Offset of the last observed server time from the local clock at the
    /// moment of the call. `None` before the first observation.
    pub fn skew(&self) -> Option<chrono::TimeDelta> {
        self.last_observed().map(|t| t - Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_starts_empty() {
        assert_eq!(ServerClock::new().last_observed(), None);
    }

    #[test]
    fn test_observe_overwrites() {
        let clock = ServerClock::new();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        clock.observe(first);
        assert_eq!(clock.last_observed(), Some(first));

        clock.observe(second);
        assert_eq!(clock.last_observed(), Some(second));
    }

    #[test]
    fn test_clones_share_the_value() {
        let clock = ServerClock::new();
        let handle = clock.clone();

        let t = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        handle.observe(t);

        assert_eq!(clock.last_observed(), Some(t));
    }
}
