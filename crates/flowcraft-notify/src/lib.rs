#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod clock;
mod queue;
mod scheduler;
mod toast;

#[doc(hidden)]
pub mod prelude;

pub use clock::{Clock, ManualClock, SystemClock};
pub use queue::{DEFAULT_TOAST_TTL, NotificationQueue};
pub use scheduler::ExpiryScheduler;
pub use toast::{Severity, Toast, ToastId};

/// Tracing target for notification operations.
pub const TRACING_TARGET: &str = "flowcraft_notify";
