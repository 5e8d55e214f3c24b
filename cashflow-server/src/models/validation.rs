//! Validation error types
//!
//! Input is validated field by field and every failure is collected, so a
//! single 422 response can enumerate all rejected fields.

use std::fmt;

/// Where a rejected value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Path,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Path => "path",
        }
    }
}

/// Why a single value was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required field is absent
    Missing,

    /// Field was explicitly null but the column never is
    NotNullable,

    /// String shorter than the minimum length (in characters)
    TooShort { min: usize },

    /// String longer than the maximum length (in characters)
    TooLong { max: usize },

    /// Decimal carries more fractional digits than allowed
    TooPrecise { max_places: u32 },

    /// Decimal has too many integer digits to carry the fixed fractional ones
    TooLarge { max_places: u32 },

    NotADecimal,
    NotAString,
    NotADateTime,
    NotAnInteger,
    NotAnObject,

    /// Body could not be read as JSON at all
    MalformedJson { reason: String },
}

impl FieldErrorKind {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "value_error.missing",
            Self::NotNullable => "type_error.none.not_allowed",
            Self::TooShort { .. } => "value_error.any_str.min_length",
            Self::TooLong { .. } => "value_error.any_str.max_length",
            Self::TooPrecise { .. } => "value_error.decimal.max_places",
            Self::TooLarge { .. } => "value_error.decimal.max_digits",
            Self::NotADecimal => "type_error.decimal",
            Self::NotAString => "type_error.str",
            Self::NotADateTime => "value_error.datetime",
            Self::NotAnInteger => "type_error.integer",
            Self::NotAnObject => "type_error.dict",
            Self::MalformedJson { .. } => "value_error.jsondecode",
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "field required"),
            Self::NotNullable => write!(f, "none is not an allowed value"),
            Self::TooShort { min } => {
                write!(f, "ensure this value has at least {} characters", min)
            }
            Self::TooLong { max } => {
                write!(f, "ensure this value has at most {} characters", max)
            }
            Self::TooPrecise { max_places } => write!(
                f,
                "ensure that there are no more than {} decimal places",
                max_places
            ),
            Self::TooLarge { max_places } => write!(
                f,
                "ensure that the value fits with {} decimal places",
                max_places
            ),
            Self::NotADecimal => write!(f, "value is not a valid decimal"),
            Self::NotAString => write!(f, "str type expected"),
            Self::NotADateTime => write!(f, "invalid datetime format"),
            Self::NotAnInteger => write!(f, "value is not a valid integer"),
            Self::NotAnObject => write!(f, "value is not a valid dict"),
            Self::MalformedJson { reason } => write!(f, "invalid JSON body: {}", reason),
        }
    }
}

/// A rejected value and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub location: Location,
    /// `None` when the whole body was rejected
    pub field: Option<&'static str>,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn body(field: &'static str, kind: FieldErrorKind) -> Self {
        Self {
            location: Location::Body,
            field: Some(field),
            kind,
        }
    }

    pub fn whole_body(kind: FieldErrorKind) -> Self {
        Self {
            location: Location::Body,
            field: None,
            kind,
        }
    }

    pub fn path(field: &'static str, kind: FieldErrorKind) -> Self {
        Self {
            location: Location::Path,
            field: Some(field),
            kind,
        }
    }

    /// Location path, e.g. `["body", "amount"]`
    pub fn loc(&self) -> Vec<&'static str> {
        std::iter::once(self.location.as_str())
            .chain(self.field)
            .collect()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc().join("."), self.kind)
    }
}

/// Validation failure for one request, holding every rejected field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether `field` is among the rejected fields
    pub fn rejects(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == Some(field))
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}
