//! Email and phone validators (purely syntactic)

use once_cell::sync::Lazy;
use regex::Regex;

// Something@something.tld with a TLD of at least two characters.
// Counts chars, not UTF-16 units: a single astral char is a 1-char TLD here.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap()
});

// Optional leading +, then digits, spaces, parentheses or dashes
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9\s()\-]{6,}$").unwrap()
});

/// Validate an email address.
///
/// `None` stands for a control without a string value and is rejected,
/// as is anything that is empty after trimming.
pub fn is_valid_email<'a>(value: impl Into<Option<&'a str>>) -> bool {
    let Some(value) = value.into() else {
        return false;
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    EMAIL_REGEX.is_match(trimmed)
}

/// Validate a phone number. The field is optional: `None` and `""` pass.
pub fn is_valid_phone<'a>(value: impl Into<Option<&'a str>>) -> bool {
    match value.into() {
        None | Some("") => true,
        Some(value) => PHONE_REGEX.is_match(value.trim()),
    }
}

/// Which predicate a form field is checked with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Email,
    Phone,
}

impl FieldKind {
    pub fn check(&self, value: Option<&str>) -> bool {
        match self {
            FieldKind::Email => is_valid_email(value),
            FieldKind::Phone => is_valid_phone(value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
        }
    }
}
