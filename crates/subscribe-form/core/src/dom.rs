//! Capability interface over the page.
//!
//! The validator only needs to read values, flip attributes/classes,
//! move focus and register listeners. Hosts implement these traits; host
//! failures are handled (logged) inside the host and never surface here.

use std::rc::Rc;

/// DOM events the validator listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Blur,
    Submit,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Blur => "blur",
            EventKind::Submit => "submit",
        }
    }
}

/// The part of a dispatched event a handler may act on
pub trait FormEvent {
    /// Cancel the event's default action (form submission)
    fn prevent_default(&self);

    fn default_prevented(&self) -> bool;
}

/// Event callback registered on an element
pub type Listener = Rc<dyn Fn(&dyn FormEvent)>;

/// A page element: form, input, or error container
pub trait Element: Clone + 'static {
    /// Current value of a form control; `None` when the element has no value
    fn value(&self) -> Option<String>;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    fn set_text_content(&self, text: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn focus(&self);

    fn add_listener(&self, kind: EventKind, listener: Listener);
}

/// Document loading state, mirroring `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// The page root elements are looked up from
pub trait Document: Clone + 'static {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    fn ready_state(&self) -> ReadyState;

    /// Run `callback` once the document has finished parsing
    fn on_ready(&self, callback: Box<dyn FnOnce()>);
}
