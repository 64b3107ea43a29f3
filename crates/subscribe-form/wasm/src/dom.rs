//! Browser implementation of the core capability traits on `web-sys`.
//!
//! DOM calls that can throw are logged and swallowed: validation keeps
//! going even if one attribute write fails.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use subscribe_form_core::{Document, Element, EventKind, FormEvent, Listener, ReadyState, Scheduler};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement};

/// The page's `document`
#[derive(Clone)]
pub struct WebDocument(pub web_sys::Document);

/// Any element of the page
#[derive(Clone)]
pub struct WebElement(pub web_sys::Element);

/// A dispatched DOM event
pub struct WebEvent(pub web_sys::Event);

#[derive(Default)]
struct TimerClosures {
    /// Scheduled and not yet fired, by timeout handle
    pending: HashMap<i32, Closure<dyn FnMut()>>,
    /// Fired closures, dropped on the next scheduler call (never from inside themselves)
    spent: Vec<Closure<dyn FnMut()>>,
}

/// `setTimeout`/`clearTimeout` on the window.
///
/// Owns the JS closures it hands out, so a cleared timeout releases its
/// callback and everything the callback captured.
#[derive(Clone)]
pub struct WindowScheduler {
    window: web_sys::Window,
    closures: Rc<RefCell<TimerClosures>>,
}

impl WindowScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            closures: Rc::new(RefCell::new(TimerClosures::default())),
        }
    }

    /// Timeouts scheduled and neither fired nor cleared
    pub fn pending_timers(&self) -> usize {
        self.closures.borrow().pending.len()
    }

    fn release_spent(&self) {
        self.closures.borrow_mut().spent.clear();
    }
}

fn log_failure(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!("{} failed: {:?}", action, err);
    }
}

impl FormEvent for WebEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn default_prevented(&self) -> bool {
        self.0.default_prevented()
    }
}

impl Element for WebElement {
    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        self.0
            .dyn_ref::<HtmlTextAreaElement>()
            .map(|textarea| textarea.value())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        log_failure("setAttribute", self.0.set_attribute(name, value));
    }

    fn remove_attribute(&self, name: &str) {
        log_failure("removeAttribute", self.0.remove_attribute(name));
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn add_class(&self, class: &str) {
        log_failure("classList.add", self.0.class_list().add_1(class));
    }

    fn remove_class(&self, class: &str) {
        log_failure("classList.remove", self.0.class_list().remove_1(class));
    }

    fn focus(&self) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            log_failure("focus", element.focus());
        }
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let event = WebEvent(event);
            let event: &dyn FormEvent = &event;
            listener(event);
        });
        log_failure(
            "addEventListener",
            self.0
                .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref()),
        );
        // Listeners live as long as the page
        closure.forget();
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        match self.0.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(err) => {
                tracing::warn!("querySelector({}) failed: {:?}", selector, err);
                None
            }
        }
    }

    fn ready_state(&self) -> ReadyState {
        match self.0.ready_state().as_str() {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(move || callback());
        log_failure(
            "addEventListener(DOMContentLoaded)",
            self.0
                .add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref()),
        );
    }
}

impl Scheduler for WindowScheduler {
    type Handle = i32;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> i32 {
        self.release_spent();

        let own_handle = Rc::new(Cell::new(None::<i32>));
        let fired_handle = Rc::clone(&own_handle);
        let closures = Rc::clone(&self.closures);
        let closure = Closure::<dyn FnMut()>::once(move || {
            callback();
            if let Some(handle) = fired_handle.get() {
                let mut closures = closures.borrow_mut();
                if let Some(fired) = closures.pending.remove(&handle) {
                    closures.spent.push(fired);
                }
            }
        });

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(handle) => {
                own_handle.set(Some(handle));
                self.closures.borrow_mut().pending.insert(handle, closure);
                handle
            }
            Err(err) => {
                tracing::warn!("setTimeout failed: {:?}", err);
                // Browsers never hand out 0, so clearing it is a no-op
                0
            }
        }
    }

    fn clear_timeout(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
        self.closures.borrow_mut().pending.remove(&handle);
        self.release_spent();
    }
}
