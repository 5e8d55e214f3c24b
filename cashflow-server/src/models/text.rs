//! Record title and description validation
//!
//! Lengths are counted in characters, not bytes. JSON numbers are taken in
//! their decimal text form (`12345` becomes `"12345"`).

use std::borrow::Cow;

use serde_json::Value;

use super::FieldErrorKind;

/// Minimum length for record titles
pub const MIN_TITLE_LEN: usize = 3;

/// Maximum length for record titles
pub const MAX_TITLE_LEN: usize = 50;

/// Maximum length for record descriptions
pub const MAX_DESCRIPTION_LEN: usize = 140;

fn text_of(value: &Value) -> Result<Cow<'_, str>, FieldErrorKind> {
    match value {
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        _ => Err(FieldErrorKind::NotAString),
    }
}

/// Validated record title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// Create a new title.
    ///
    /// # Rules
    /// - At least 3 characters
    /// - At most 50 characters
    pub fn new(s: &str) -> Result<Self, FieldErrorKind> {
        let len = s.chars().count();

        if len < MIN_TITLE_LEN {
            return Err(FieldErrorKind::TooShort { min: MIN_TITLE_LEN });
        }

        if len > MAX_TITLE_LEN {
            return Err(FieldErrorKind::TooLong { max: MAX_TITLE_LEN });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn from_json(value: &Value) -> Result<Self, FieldErrorKind> {
        Self::new(&text_of(value)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated record description (empty is allowed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(s: &str) -> Result<Self, FieldErrorKind> {
        if s.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(FieldErrorKind::TooLong {
                max: MAX_DESCRIPTION_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn from_json(value: &Value) -> Result<Self, FieldErrorKind> {
        Self::new(&text_of(value)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
