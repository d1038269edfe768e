//! Time sources for scheduling toast expiry.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use jiff::{SignedDuration, Timestamp};

/// Provides the current time.
///
/// Injected into [`NotificationQueue`] so expiry can be driven by the wall
/// clock in production and stepped by hand in tests.
///
/// [`NotificationQueue`]: crate::NotificationQueue
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// The default [`Clock`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A [`Clock`] that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Timestamp,
    elapsed_ms: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            start,
            elapsed_ms: AtomicI64::new(0),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: SignedDuration) {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.elapsed_ms.fetch_add(millis, Ordering::SeqCst);
    }

    /// Returns how far the clock has moved since it was created.
    pub fn elapsed(&self) -> SignedDuration {
        SignedDuration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    /// Starts at the Unix epoch.
    fn default() -> Self {
        Self::new(Timestamp::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.start + self.elapsed()
    }
}
