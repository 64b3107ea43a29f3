//! Validator configuration: element ids, messages and timings

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the form lives in the page and how feedback is presented.
///
/// Every field has a default matching the stock subscription page, so an
/// empty TOML document or JS object yields [`ValidatorConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Selector locating the form
    pub form_selector: String,

    pub email_id: String,

    pub phone_id: String,

    /// Id of the form-level error banner
    pub form_error_id: String,

    /// Class toggled to hide error containers and the banner
    pub hidden_class: String,

    /// Quiet period before "as you type" validation runs
    pub debounce_ms: u64,

    pub email_message: String,

    pub phone_message: String,

    /// Attribute set on the form once listeners are attached
    pub attached_marker: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            form_selector: "#subscribe form".to_string(),
            email_id: "subscribe-email".to_string(),
            phone_id: "subscribe-phone".to_string(),
            form_error_id: "subscribe-form-error".to_string(),
            hidden_class: "hidden".to_string(),
            debounce_ms: 1000,
            email_message: "Vul een geldig e\u{2011}mailadres in.".to_string(),
            phone_message: "Gebruik alleen cijfers, spaties, +, ( ) of -.".to_string(),
            attached_marker: "data-validation-attached".to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every lookup fail silently
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("formSelector", &self.form_selector),
            ("emailId", &self.email_id),
            ("phoneId", &self.phone_id),
            ("formErrorId", &self.form_error_id),
            ("hiddenClass", &self.hidden_class),
            ("attachedMarker", &self.attached_marker),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{} must not be empty", key)));
            }
        }

        if self.hidden_class.contains(char::is_whitespace) {
            return Err(Error::InvalidConfig(
                "hiddenClass must be a single class name".to_string(),
            ));
        }

        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
