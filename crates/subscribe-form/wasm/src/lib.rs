//! Subscribe Form WASM
//!
//! Browser entry point for subscription form validation. On load the
//! module attaches validation to `#subscribe form` with the default
//! configuration; `attachValidation` re-runs attachment manually, e.g.
//! after the form has been injected into the page.

pub mod dom;
pub mod logging;

use dom::{WebDocument, WindowScheduler};
use subscribe_form_core::{self as validation, AttachOutcome, ValidatorConfig};
use wasm_bindgen::prelude::*;

/// Set panic hook and logging, then attach once the document is parsed
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(tracing::Level::INFO);

    if let Some((document, scheduler)) = browser() {
        validation::attach_when_ready(&document, &scheduler, &ValidatorConfig::default());
    }
}

fn browser() -> Option<(WebDocument, WindowScheduler)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    Some((WebDocument(document), WindowScheduler::new(window)))
}

fn parse_config(config: JsValue) -> Result<ValidatorConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ValidatorConfig::default());
    }

    let config: ValidatorConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Attach validation to the subscription form now.
///
/// # Returns
/// `true` when this call registered the listeners; `false` when the form
/// is missing or was already wired.
///
/// # Example (JavaScript)
/// ```javascript
/// attachValidation();
/// attachValidation({ emailId: 'newsletter-email', debounceMs: 500 });
/// ```
#[wasm_bindgen(js_name = attachValidation)]
pub fn attach_validation(config: JsValue) -> Result<bool, JsValue> {
    let config = parse_config(config)?;
    let Some((document, scheduler)) = browser() else {
        return Ok(false);
    };

    let outcome = validation::attach(&document, &scheduler, &config);
    Ok(outcome == AttachOutcome::Attached)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(value: Option<String>) -> bool {
    validation::is_valid_email(value.as_deref())
}

/// Quick phone validation (empty counts as valid)
#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone_js(value: Option<String>) -> bool {
    validation::is_valid_phone(value.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_email_validation() {
        assert!(is_valid_email_js(Some("user@example.com".to_string())));
        assert!(!is_valid_email_js(Some("bad".to_string())));
        assert!(!is_valid_email_js(None));
    }

    #[wasm_bindgen_test]
    fn test_phone_validation() {
        assert!(is_valid_phone_js(None));
        assert!(is_valid_phone_js(Some("+31 6 1234567".to_string())));
        assert!(!is_valid_phone_js(Some("123".to_string())));
    }

    #[wasm_bindgen_test]
    fn test_missing_config_uses_defaults() {
        let config = parse_config(JsValue::UNDEFINED).unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }
}
