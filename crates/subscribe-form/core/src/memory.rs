//! In-memory host for the capability traits.
//!
//! A small headless page: elements with values, attributes, classes and
//! listeners, a document that resolves ids and registered selectors, and
//! a manual clock standing in for the event loop's timers. Everything is
//! single-threaded and shared through `Rc`, like the browser objects it
//! replaces.

use crate::debounce::Scheduler;
use crate::dom::{Document, Element, EventKind, FormEvent, Listener, ReadyState};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

/// Event dispatched by [`MemoryElement::dispatch`]
#[derive(Debug, Default)]
pub struct MemoryEvent {
    prevented: Cell<bool>,
}

impl FormEvent for MemoryEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }

    fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

/// Observable state of an element, for comparing before/after
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    pub value: Option<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
}

struct ElementState {
    id: String,
    value: Option<String>,
    text: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    listeners: Vec<(EventKind, Listener)>,
}

/// An element owned by a [`MemoryDocument`]
#[derive(Clone)]
pub struct MemoryElement {
    state: Rc<RefCell<ElementState>>,
    focused: Rc<RefCell<Option<String>>>,
}

impl MemoryElement {
    pub fn id(&self) -> String {
        self.state.borrow().id.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.state.borrow_mut().value = Some(value.to_string());
    }

    pub fn text_content(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn snapshot(&self) -> ElementSnapshot {
        let state = self.state.borrow();
        ElementSnapshot {
            value: state.value.clone(),
            text: state.text.clone(),
            attributes: state.attributes.clone(),
            classes: state.classes.clone(),
        }
    }

    /// Run every listener for `kind` in registration order.
    ///
    /// Returns `false` when a listener cancelled the default action.
    pub fn dispatch(&self, kind: EventKind) -> bool {
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        let event = MemoryEvent::default();
        let target: &dyn FormEvent = &event;
        for listener in listeners {
            listener(target);
        }
        !event.default_prevented()
    }

    /// Replace the value and fire `input`, as one keystroke would
    pub fn type_text(&self, value: &str) {
        self.set_value(value);
        self.dispatch(EventKind::Input);
    }

    pub fn blur(&self) {
        self.dispatch(EventKind::Blur);
    }

    /// Fire `submit`; `true` when submission would proceed
    pub fn submit(&self) -> bool {
        self.dispatch(EventKind::Submit)
    }
}

impl Element for MemoryElement {
    fn value(&self) -> Option<String> {
        self.state.borrow().value.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.state.borrow_mut().attributes.remove(name);
    }

    fn set_text_content(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }

    fn add_class(&self, class: &str) {
        self.state.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.remove(class);
    }

    fn focus(&self) {
        let id = self.id();
        *self.focused.borrow_mut() = Some(id);
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        self.state.borrow_mut().listeners.push((kind, listener));
    }
}

struct DocumentState {
    ready_state: ReadyState,
    by_id: HashMap<String, MemoryElement>,
    selectors: HashMap<String, MemoryElement>,
    ready_callbacks: Vec<Box<dyn FnOnce()>>,
}

/// A headless document
#[derive(Clone)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
    focused: Rc<RefCell<Option<String>>>,
}

impl MemoryDocument {
    /// A document that has already finished parsing
    pub fn new() -> Self {
        Self::with_ready_state(ReadyState::Complete)
    }

    /// A document still parsing; see [`MemoryDocument::finish_loading`]
    pub fn loading() -> Self {
        Self::with_ready_state(ReadyState::Loading)
    }

    fn with_ready_state(ready_state: ReadyState) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                ready_state,
                by_id: HashMap::new(),
                selectors: HashMap::new(),
                ready_callbacks: Vec::new(),
            })),
            focused: Rc::new(RefCell::new(None)),
        }
    }

    /// Create an element without a value (container, banner, form)
    pub fn create_element(&self, id: &str) -> MemoryElement {
        self.insert(id, None)
    }

    /// Create a text input holding `value`
    pub fn create_input(&self, id: &str, value: &str) -> MemoryElement {
        self.insert(id, Some(value.to_string()))
    }

    fn insert(&self, id: &str, value: Option<String>) -> MemoryElement {
        let element = MemoryElement {
            state: Rc::new(RefCell::new(ElementState {
                id: id.to_string(),
                value,
                text: String::new(),
                attributes: BTreeMap::new(),
                classes: BTreeSet::new(),
                listeners: Vec::new(),
            })),
            focused: Rc::clone(&self.focused),
        };
        self.state
            .borrow_mut()
            .by_id
            .insert(id.to_string(), element.clone());
        element
    }

    /// Make `selector` resolve to `element` in [`Document::query_selector`]
    pub fn register_selector(&self, selector: &str, element: &MemoryElement) {
        self.state
            .borrow_mut()
            .selectors
            .insert(selector.to_string(), element.clone());
    }

    /// Id of the element that last received focus
    pub fn focused_id(&self) -> Option<String> {
        self.focused.borrow().clone()
    }

    /// Move to `Interactive` and run the deferred ready callbacks
    pub fn finish_loading(&self) {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            state.ready_state = ReadyState::Interactive;
            std::mem::take(&mut state.ready_callbacks)
        };
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.state.borrow().by_id.get(id).cloned()
    }

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        self.state.borrow().selectors.get(selector).cloned()
    }

    fn ready_state(&self) -> ReadyState {
        self.state.borrow().ready_state
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        self.state.borrow_mut().ready_callbacks.push(callback);
    }
}

struct ClockState {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<u64, (Duration, Box<dyn FnOnce()>)>,
}

/// Timers driven by hand instead of by wall-clock time
#[derive(Clone)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                now: Duration::ZERO,
                next_handle: 1,
                timers: BTreeMap::new(),
            })),
        }
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Move time forward, firing due timers in deadline order.
    ///
    /// Timers scheduled by a firing callback run too if they fall due
    /// within the same advance.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;

        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .filter(|(_, (deadline, _))| *deadline <= target)
                    .min_by_key(|(handle, (deadline, _))| (*deadline, **handle))
                    .map(|(handle, _)| *handle);

                let entry = next.and_then(|handle| state.timers.remove(&handle));
                match entry {
                    Some((deadline, callback)) => {
                        state.now = deadline;
                        callback
                    }
                    None => break,
                }
            };
            due();
        }

        self.state.borrow_mut().now = target;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualClock {
    type Handle = u64;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> u64 {
        let mut state = self.state.borrow_mut();
        let handle = state.next_handle;
        state.next_handle += 1;
        let deadline = state.now + delay;
        state.timers.insert(handle, (deadline, callback));
        handle
    }

    fn clear_timeout(&self, handle: u64) {
        self.state.borrow_mut().timers.remove(&handle);
    }
}
