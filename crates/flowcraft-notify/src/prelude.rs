//! Prelude module for convenient imports.
//!
//! ```rust
//! use flowcraft_notify::prelude::*;
//! ```

pub use crate::{Clock, ManualClock, NotificationQueue, Severity, SystemClock, Toast, ToastId};
