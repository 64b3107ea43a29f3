//! Subscribe Form Core
//!
//! Client-side validation for the subscription form: email and phone
//! checks, inline error display, debounced "as you type" feedback and
//! submission gating.
//!
//! The logic talks to the page only through the capability traits in
//! [`dom`] and [`debounce::Scheduler`], so it runs unchanged against the
//! browser (see the `subscribe-form-wasm` crate) or against the
//! in-memory host in [`memory`].
//!
//! ## Example
//!
//! ```rust
//! use subscribe_form_core::memory::{ManualClock, MemoryDocument};
//! use subscribe_form_core::{attach, AttachOutcome, ValidatorConfig};
//!
//! let document = MemoryDocument::new();
//! let form = document.create_element("subscribe-form");
//! document.register_selector("#subscribe form", &form);
//!
//! let clock = ManualClock::new();
//! let outcome = attach(&document, &clock, &ValidatorConfig::default());
//! assert_eq!(outcome, AttachOutcome::Attached);
//! ```

pub mod config;
pub mod debounce;
pub mod display;
pub mod dom;
pub mod error;
pub mod form;
pub mod memory;
pub mod validators;

pub use config::ValidatorConfig;
pub use debounce::{debounce, Debounced, Scheduler};
pub use display::ErrorDisplay;
pub use dom::{Document, Element, EventKind, FormEvent, Listener, ReadyState};
pub use error::{Error, Result};
pub use form::{attach, attach_when_ready, AttachOutcome, FormValidator};
pub use validators::{is_valid_email, is_valid_phone, FieldKind};
