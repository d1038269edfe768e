//! Toast notification types.

use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};
use uuid::Uuid;

/// Unique identifier for a toast.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    /// Creates a new random toast ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a toast ID from an existing UUID.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ToastId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// How a toast is presented.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Debug, AsRefStr, StrumDisplay, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Neutral information.
    Info,
}

/// A short-lived message shown to the user.
///
/// Serializes to the `{ id, message, type }` shape the rendering layer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Toast id, used to dismiss it.
    pub id: ToastId,
    /// Message text.
    pub message: String,
    /// Presentation severity.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// When the toast was pushed.
    #[serde(skip)]
    pub created_at: Timestamp,
}

impl Toast {
    /// Creates a toast with a fresh id.
    pub fn new(message: impl Into<String>, severity: Severity, created_at: Timestamp) -> Self {
        Self {
            id: ToastId::new(),
            message: message.into(),
            severity,
            created_at,
        }
    }
}
