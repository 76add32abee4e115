//! Input validation shared by the services
//!
//! Rules are checked together and every failure is reported, so a client
//! sees all rejected fields of one request at once.

use crate::error::{ApiError, ApiResult, FieldError};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Accumulates field errors for a single input
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &'static str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// `Ok` when nothing was recorded, `ApiError::InvalidInput` otherwise
    pub fn finish(self) -> ApiResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(self.errors))
        }
    }
}

/// Whether `value` has at least `min` characters
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Characters allowed in the local part besides ASCII alphanumerics
const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Simple email validation
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }

    // Must have exactly one @ symbol
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty()
        || local.len() > 64
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
    {
        return false;
    }

    // Domain needs a dot, hostname labels, and a top-level label of two letters or more
    let labels: Vec<&str> = domain.split('.').collect();
    let valid_labels = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels.len() >= 2 && valid_labels && tld_ok
}
