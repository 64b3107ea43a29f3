//! Form orchestration: wires field validation and gates submission.
//!
//! Per field (email, phone) three independent listeners are registered:
//!
//! - `input`, debounced: re-validate once typing has paused
//! - `input`, immediate: drop the field's error and hide the form banner
//! - `blur`: validate right away
//!
//! On `submit` both fields are validated synchronously. Any failure
//! cancels the submission, reveals the banner and focuses the first
//! invalid field (email before phone).

use crate::config::ValidatorConfig;
use crate::debounce::{debounce, Scheduler};
use crate::display::ErrorDisplay;
use crate::dom::{Document, Element, EventKind, FormEvent, ReadyState};
use crate::validators::FieldKind;
use std::rc::Rc;
use tracing::{debug, trace};

/// Result of an attach attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Listeners were registered by this call
    Attached,
    /// The page has no subscription form
    FormMissing,
    /// The form was already wired by an earlier call
    AlreadyAttached,
}

/// Validation state for one subscription form
pub struct FormValidator<D: Document> {
    email: Option<D::Element>,
    phone: Option<D::Element>,
    form_error: Option<D::Element>,
    display: ErrorDisplay<D>,
    email_message: String,
    phone_message: String,
}

impl<D: Document> FormValidator<D> {
    /// Look up the fields and banner named in `config`. Any may be absent.
    pub fn new(document: &D, config: &ValidatorConfig) -> Self {
        Self {
            email: document.element_by_id(&config.email_id),
            phone: document.element_by_id(&config.phone_id),
            form_error: document.element_by_id(&config.form_error_id),
            display: ErrorDisplay::new(document.clone(), config.hidden_class.clone()),
            email_message: config.email_message.clone(),
            phone_message: config.phone_message.clone(),
        }
    }

    pub fn field(&self, kind: FieldKind) -> Option<&D::Element> {
        match kind {
            FieldKind::Email => self.email.as_ref(),
            FieldKind::Phone => self.phone.as_ref(),
        }
    }

    fn message(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Email => &self.email_message,
            FieldKind::Phone => &self.phone_message,
        }
    }

    /// Validate one field and update its error display.
    ///
    /// A field missing from the page counts as valid and is left alone.
    pub fn validate_field(&self, kind: FieldKind) -> bool {
        let Some(field) = self.field(kind) else {
            return true;
        };

        let value = field.value();
        let valid = kind.check(value.as_deref());
        trace!(field = kind.name(), valid, "validated field");

        if valid {
            self.display.clear(field);
        } else {
            self.display.show(field, self.message(kind));
        }
        valid
    }

    pub fn validate_email(&self) -> bool {
        self.validate_field(FieldKind::Email)
    }

    pub fn validate_phone(&self) -> bool {
        self.validate_field(FieldKind::Phone)
    }

    /// Validate every field (no short-circuit, so all errors show)
    pub fn validate_all(&self) -> bool {
        let email_ok = self.validate_email();
        let phone_ok = self.validate_phone();
        email_ok && phone_ok
    }

    /// Drop stale error state while the user is correcting a field
    pub fn reset_field(&self, kind: FieldKind) {
        if let Some(field) = self.field(kind) {
            self.display.clear(field);
        }
        self.hide_banner();
    }

    /// Gate a submit event. Returns `true` when submission may proceed.
    pub fn handle_submit(&self, event: &dyn FormEvent) -> bool {
        let email_ok = self.validate_email();
        let phone_ok = self.validate_phone();

        if email_ok && phone_ok {
            self.hide_banner();
            debug!("subscription form passed validation");
            return true;
        }

        event.prevent_default();
        if let Some(banner) = &self.form_error {
            banner.remove_class(self.display.hidden_class());
        }

        let first_invalid = if !email_ok {
            self.email.as_ref()
        } else {
            self.phone.as_ref()
        };
        if let Some(field) = first_invalid {
            field.focus();
        }

        debug!(email_ok, phone_ok, "blocked subscription form submission");
        false
    }

    fn hide_banner(&self) {
        if let Some(banner) = &self.form_error {
            banner.add_class(self.display.hidden_class());
        }
    }
}

/// Wire validation onto the subscription form right now.
///
/// Safe to call again (e.g. after the form is injected dynamically): a
/// form that already carries the attached marker is left untouched.
pub fn attach<D, S>(document: &D, scheduler: &S, config: &ValidatorConfig) -> AttachOutcome
where
    D: Document,
    S: Scheduler,
{
    let Some(form) = document.query_selector(&config.form_selector) else {
        debug!(selector = %config.form_selector, "no subscription form on page");
        return AttachOutcome::FormMissing;
    };

    if form.attribute(&config.attached_marker).is_some() {
        debug!("subscription form already has validation attached");
        return AttachOutcome::AlreadyAttached;
    }

    // Listeners own the validator for the lifetime of the page
    let validator = Rc::new(FormValidator::new(document, config));

    for kind in [FieldKind::Email, FieldKind::Phone] {
        if let Some(input) = validator.field(kind) {
            wire_field(&validator, input, kind, scheduler, config);
        }
    }

    let on_submit = Rc::clone(&validator);
    form.add_listener(
        EventKind::Submit,
        Rc::new(move |event: &dyn FormEvent| {
            on_submit.handle_submit(event);
        }),
    );
    form.set_attribute(&config.attached_marker, "true");

    debug!(
        email = validator.email.is_some(),
        phone = validator.phone.is_some(),
        banner = validator.form_error.is_some(),
        "attached subscription form validation"
    );
    AttachOutcome::Attached
}

fn wire_field<D, S>(
    validator: &Rc<FormValidator<D>>,
    input: &D::Element,
    kind: FieldKind,
    scheduler: &S,
    config: &ValidatorConfig,
) where
    D: Document,
    S: Scheduler,
{
    let deferred = Rc::clone(validator);
    let debounced = debounce(scheduler.clone(), config.debounce_delay(), move |()| {
        deferred.validate_field(kind);
    });
    input.add_listener(
        EventKind::Input,
        Rc::new(move |_: &dyn FormEvent| debounced.call(())),
    );

    let on_input = Rc::clone(validator);
    input.add_listener(
        EventKind::Input,
        Rc::new(move |_: &dyn FormEvent| on_input.reset_field(kind)),
    );

    let on_blur = Rc::clone(validator);
    input.add_listener(
        EventKind::Blur,
        Rc::new(move |_: &dyn FormEvent| {
            on_blur.validate_field(kind);
        }),
    );
}

/// Attach once the document is parsed.
///
/// Returns the outcome when attaching ran immediately, or `None` when it
/// was deferred to the document's ready callback.
pub fn attach_when_ready<D, S>(
    document: &D,
    scheduler: &S,
    config: &ValidatorConfig,
) -> Option<AttachOutcome>
where
    D: Document,
    S: Scheduler,
{
    if document.ready_state() != ReadyState::Loading {
        return Some(attach(document, scheduler, config));
    }

    let deferred_document = document.clone();
    let deferred_scheduler = scheduler.clone();
    let deferred_config = config.clone();
    document.on_ready(Box::new(move || {
        attach(&deferred_document, &deferred_scheduler, &deferred_config);
    }));
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{ARIA_INVALID, DESCRIBED_BY};
    use crate::memory::{ManualClock, MemoryDocument, MemoryEvent};
    use pretty_assertions::assert_eq;

    fn page(email: &str, phone: &str) -> (MemoryDocument, FormValidator<MemoryDocument>) {
        let document = MemoryDocument::new();
        let email_input = document.create_input("subscribe-email", email);
        email_input.set_attribute(DESCRIBED_BY, "email-error");
        document.create_element("email-error");
        let phone_input = document.create_input("subscribe-phone", phone);
        phone_input.set_attribute(DESCRIBED_BY, "phone-error");
        document.create_element("phone-error");
        document.create_element("subscribe-form-error");

        let validator = FormValidator::new(&document, &ValidatorConfig::default());
        (document, validator)
    }

    #[test]
    fn test_missing_fields_are_valid() {
        let document = MemoryDocument::new();
        let validator = FormValidator::new(&document, &ValidatorConfig::default());

        assert!(validator.validate_email());
        assert!(validator.validate_phone());
        assert!(validator.handle_submit(&MemoryEvent::default()));
    }

    #[test]
    fn test_validate_field_shows_configured_message() {
        let (document, validator) = page("bad", "abc");

        assert!(!validator.validate_all());

        let email_error = document.element_by_id("email-error").unwrap();
        let phone_error = document.element_by_id("phone-error").unwrap();
        assert_eq!(email_error.text_content(), ValidatorConfig::default().email_message);
        assert_eq!(phone_error.text_content(), ValidatorConfig::default().phone_message);
    }

    #[test]
    fn test_submit_focuses_phone_when_only_phone_invalid() {
        let (document, validator) = page("user@example.com", "123");
        let event = MemoryEvent::default();

        assert!(!validator.handle_submit(&event));
        assert!(event.default_prevented());
        assert_eq!(document.focused_id().as_deref(), Some("subscribe-phone"));

        let phone = document.element_by_id("subscribe-phone").unwrap();
        assert_eq!(phone.attribute(ARIA_INVALID).as_deref(), Some("true"));
    }

    #[test]
    fn test_attach_without_form() {
        let document = MemoryDocument::new();
        let outcome = attach(&document, &ManualClock::new(), &ValidatorConfig::default());
        assert_eq!(outcome, AttachOutcome::FormMissing);
    }

    #[test]
    fn test_attach_when_ready_defers_while_loading() {
        let document = MemoryDocument::loading();
        let form = document.create_element("form");
        document.register_selector("#subscribe form", &form);
        let clock = ManualClock::new();

        let outcome = attach_when_ready(&document, &clock, &ValidatorConfig::default());
        assert_eq!(outcome, None);
        assert_eq!(form.listener_count(EventKind::Submit), 0);

        document.finish_loading();
        assert_eq!(form.listener_count(EventKind::Submit), 1);
    }
}
