//! Editor configuration.

use derive_builder::Builder;
use flowcraft_graph::ValidationMode;
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default toast shown after a successful save.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Flow saved successfully.";

/// Toast shown when a save is rejected by validation.
pub const SAVE_FAILED_MESSAGE: &str = "Cannot save flow. Ensure all nodes are connected.";

/// Default toast lifetime in milliseconds.
const DEFAULT_TOAST_TTL_MS: u64 = 3000;

/// Longest accepted toast lifetime: one day.
const MAX_TOAST_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// How long a toast stays visible, in milliseconds.
    #[builder(default = "DEFAULT_TOAST_TTL_MS")]
    pub toast_ttl_ms: u64,

    /// Which save validation rule to apply.
    #[builder(default)]
    pub validation_mode: ValidationMode,

    /// Message of the toast pushed after a successful save.
    #[builder(default = "DEFAULT_SUCCESS_MESSAGE.to_owned()")]
    pub success_message: String,
}

impl EditorConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        check(
            self.toast_ttl_ms.unwrap_or(DEFAULT_TOAST_TTL_MS),
            self.success_message.as_deref().unwrap_or(DEFAULT_SUCCESS_MESSAGE),
        )
    }
}

impl EditorConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            toast_ttl_ms: DEFAULT_TOAST_TTL_MS,
            validation_mode: ValidationMode::default(),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_owned(),
        }
    }

    /// Returns the toast lifetime.
    #[inline]
    pub fn toast_ttl(&self) -> SignedDuration {
        SignedDuration::from_millis(i64::try_from(self.toast_ttl_ms).unwrap_or(i64::MAX))
    }

    /// Validates the configuration.
    ///
    /// Configurations built through [`EditorConfigBuilder`] are already
    /// checked; this covers deserialized ones.
    pub fn validate(&self) -> Result<()> {
        check(self.toast_ttl_ms, &self.success_message).map_err(Error::InvalidConfig)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check(toast_ttl_ms: u64, success_message: &str) -> std::result::Result<(), String> {
    if toast_ttl_ms == 0 {
        return Err("toast_ttl_ms must be at least 1".into());
    }
    if toast_ttl_ms > MAX_TOAST_TTL_MS {
        return Err(format!("toast_ttl_ms must not exceed {MAX_TOAST_TTL_MS}"));
    }
    if success_message.trim().is_empty() {
        return Err("success_message must not be empty".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.toast_ttl(), SignedDuration::from_millis(3000));
        assert_eq!(config.validation_mode, ValidationMode::Counting);
        assert_eq!(config.success_message, "Flow saved successfully.");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = EditorConfigBuilder::default().build().unwrap();
        assert_eq!(built, EditorConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = EditorConfigBuilder::default()
            .toast_ttl_ms(5_000_u64)
            .validation_mode(ValidationMode::Strict)
            .success_message("Saved!")
            .build()
            .unwrap();

        assert_eq!(config.toast_ttl(), SignedDuration::from_secs(5));
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.success_message, "Saved!");
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(EditorConfigBuilder::default().toast_ttl_ms(0_u64).build().is_err());
        assert!(
            EditorConfigBuilder::default()
                .success_message("  ")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_toast_ttl_upper_bound() {
        let one_day = EditorConfigBuilder::default()
            .toast_ttl_ms(MAX_TOAST_TTL_MS)
            .build()
            .unwrap();
        assert_eq!(one_day.toast_ttl(), SignedDuration::from_hours(24));

        assert!(
            EditorConfigBuilder::default()
                .toast_ttl_ms(MAX_TOAST_TTL_MS + 1)
                .build()
                .is_err()
        );

        let huge: EditorConfig =
            serde_json::from_str(r#"{ "toastTtlMs": 18446744073709551615 }"#).unwrap();
        assert!(matches!(huge.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "validationMode": "strict" }"#).unwrap();
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.toast_ttl_ms, 3000);
        assert_eq!(config.success_message, DEFAULT_SUCCESS_MESSAGE);

        let zero: EditorConfig = serde_json::from_str(r#"{ "toastTtlMs": 0 }"#).unwrap();
        assert!(matches!(zero.validate(), Err(Error::InvalidConfig(_))));
    }
}
