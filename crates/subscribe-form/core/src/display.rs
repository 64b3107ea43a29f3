//! Inline error display for form fields.
//!
//! A field points at its error container through `aria-describedby`.
//! The error text, the container's visibility and the field's
//! `aria-invalid` marker are always updated together.

use crate::dom::{Document, Element};

/// Attribute linking a field to its error container
pub const DESCRIBED_BY: &str = "aria-describedby";

/// Attribute marking a field invalid for assistive technology
pub const ARIA_INVALID: &str = "aria-invalid";

/// Shows and clears per-field error messages
#[derive(Clone)]
pub struct ErrorDisplay<D: Document> {
    document: D,
    hidden_class: String,
}

impl<D: Document> ErrorDisplay<D> {
    pub fn new(document: D, hidden_class: impl Into<String>) -> Self {
        Self {
            document,
            hidden_class: hidden_class.into(),
        }
    }

    /// Show `message` for `field`. No-op when the error container is missing.
    pub fn show(&self, field: &D::Element, message: &str) {
        let Some(target) = self.error_target(field) else {
            return;
        };

        target.set_text_content(message);
        target.remove_class(&self.hidden_class);
        field.set_attribute(ARIA_INVALID, "true");
    }

    /// Clear the error for `field`. No-op when the error container is missing.
    pub fn clear(&self, field: &D::Element) {
        let Some(target) = self.error_target(field) else {
            return;
        };

        target.set_text_content("");
        target.add_class(&self.hidden_class);
        field.remove_attribute(ARIA_INVALID);
    }

    pub fn hidden_class(&self) -> &str {
        &self.hidden_class
    }

    fn error_target(&self, field: &D::Element) -> Option<D::Element> {
        let id = field.attribute(DESCRIBED_BY)?;
        self.document.element_by_id(&id)
    }
}
