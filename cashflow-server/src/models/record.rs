//! Record schemas: Create, Update and Read
//!
//! Create and Update are parsed from a JSON object. Every field is checked
//! and all failures are reported together. Unknown keys are ignored.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    parse_timestamp, Amount, Description, FieldError, FieldErrorKind, Patch, Title,
    ValidationError,
};
use crate::db::{Record, RecordId};

/// A type parsed and validated from a JSON request body
pub trait Schema: Sized {
    fn from_json(body: &Value) -> Result<Self, ValidationError>;
}

/// Payload for creating a record. `amount` is required.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCreate {
    pub amount: Amount,
    pub description: Option<Description>,
    pub title: Option<Title>,
    pub happened_at: Option<NaiveDateTime>,
}

impl Schema for RecordCreate {
    fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::of(body)?;

        let amount = fields.required("amount", Amount::from_json);
        let description = fields.optional("description", Description::from_json);
        let title = fields.optional("title", Title::from_json);
        let happened_at = fields.optional("happened_at", parse_timestamp);

        let errors = fields.finish();
        match amount {
            Some(amount) if errors.is_empty() => Ok(Self {
                amount,
                description,
                title,
                happened_at,
            }),
            _ => Err(errors),
        }
    }
}

/// Change-set for updating a record.
///
/// Only fields present in the payload are part of the change-set. `amount`
/// can be replaced but never cleared, so an explicit null is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub amount: Option<Amount>,
    pub description: Patch<Description>,
    pub title: Patch<Title>,
    pub happened_at: Patch<NaiveDateTime>,
}

impl RecordUpdate {
    /// True when the payload supplied no known field.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_unset()
            && self.title.is_unset()
            && self.happened_at.is_unset()
    }
}

impl Schema for RecordUpdate {
    fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::of(body)?;

        let amount = match fields.patch("amount", Amount::from_json) {
            Patch::Unset => None,
            Patch::Value(amount) => Some(amount),
            Patch::Null => {
                fields.reject("amount", FieldErrorKind::NotNullable);
                None
            }
        };
        let description = fields.patch("description", Description::from_json);
        let title = fields.patch("title", Title::from_json);
        let happened_at = fields.patch("happened_at", parse_timestamp);

        let errors = fields.finish();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            amount,
            description,
            title,
            happened_at,
        })
    }
}

/// Public representation of a record.
///
/// Audit timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRead {
    pub id: RecordId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub title: Option<String>,
    pub happened_at: Option<NaiveDateTime>,
}

impl From<Record> for RecordRead {
    fn from(r: Record) -> Self {
        Self {
            id: r.id,
            amount: r.amount,
            description: r.description,
            title: r.title,
            happened_at: r.happened_at,
        }
    }
}

/// Field-by-field reader over a JSON object that collects failures.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: ValidationError,
}

impl<'a> Fields<'a> {
    fn of(body: &'a Value) -> Result<Self, ValidationError> {
        let map = body
            .as_object()
            .ok_or_else(|| FieldError::whole_body(FieldErrorKind::NotAnObject))?;

        Ok(Self {
            map,
            errors: ValidationError::default(),
        })
    }

    fn reject(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.errors.push(FieldError::body(field, kind));
    }

    fn parse<T>(
        &mut self,
        field: &'static str,
        value: &Value,
        parse: impl FnOnce(&Value) -> Result<T, FieldErrorKind>,
    ) -> Option<T> {
        match parse(value) {
            Ok(v) => Some(v),
            Err(kind) => {
                self.reject(field, kind);
                None
            }
        }
    }

    fn required<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, FieldErrorKind>,
    ) -> Option<T> {
        let map = self.map;
        match map.get(field) {
            None => {
                self.reject(field, FieldErrorKind::Missing);
                None
            }
            Some(Value::Null) => {
                self.reject(field, FieldErrorKind::NotNullable);
                None
            }
            Some(value) => self.parse(field, value, parse),
        }
    }

    /// Absent and null both mean "no value".
    fn optional<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, FieldErrorKind>,
    ) -> Option<T> {
        let map = self.map;
        match map.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.parse(field, value, parse),
        }
    }

    fn patch<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, FieldErrorKind>,
    ) -> Patch<T> {
        let map = self.map;
        match map.get(field) {
            None => Patch::Unset,
            Some(Value::Null) => Patch::Null,
            Some(value) => match self.parse(field, value, parse) {
                Some(v) => Patch::Value(v),
                // Rejected; the error is already recorded.
                None => Patch::Unset,
            },
        }
    }

    fn finish(self) -> ValidationError {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_record() -> Value {
        json!({
            "amount": 12.34,
            "title": "title",
            "description": "description",
            "happened_at": "2020-05-16T18:00:00",
        })
    }

    #[test]
    fn create_parses_all_fields() {
        let record = RecordCreate::from_json(&new_record()).unwrap();
        assert_eq!(record.amount.value().to_string(), "12.34");
        assert_eq!(record.title.unwrap().as_str(), "title");
        assert_eq!(record.description.unwrap().as_str(), "description");
        assert_eq!(
            record.happened_at.unwrap().to_string(),
            "2020-05-16 18:00:00"
        );
    }

    #[test]
    fn create_must_have_amount() {
        let mut body = new_record();
        body.as_object_mut().unwrap().remove("amount");

        let err = RecordCreate::from_json(&body).unwrap_err();
        assert!(err.rejects("amount"));
        assert_eq!(err.errors()[0].kind, FieldErrorKind::Missing);
    }

    #[test]
    fn create_only_amount() {
        let record = RecordCreate::from_json(&json!({"amount": "5"})).unwrap();
        assert!(record.title.is_none());
        assert!(record.description.is_none());
        assert!(record.happened_at.is_none());
    }

    #[test]
    fn create_reports_every_failing_field() {
        let body = json!({
            "amount": 12.345,
            "title": "ab",
            "description": "a".repeat(141),
            "happened_at": "abc",
        });

        let err = RecordCreate::from_json(&body).unwrap_err();
        assert_eq!(err.errors().len(), 4);
        for field in ["amount", "title", "description", "happened_at"] {
            assert!(err.rejects(field), "{field} should be rejected");
        }
    }

    #[test]
    fn create_rejects_non_object() {
        let err = RecordCreate::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.errors()[0].field, None);
        assert_eq!(err.errors()[0].kind, FieldErrorKind::NotAnObject);
    }

    #[test]
    fn create_ignores_unknown_fields() {
        let mut body = new_record();
        body["key"] = json!("value");
        assert!(RecordCreate::from_json(&body).is_ok());
    }

    #[test]
    fn update_has_no_required_fields() {
        let update = RecordUpdate::from_json(&json!({})).unwrap();
        assert!(update.is_empty());
        assert_eq!(update, RecordUpdate::default());
    }

    #[test]
    fn update_distinguishes_null_from_unset() {
        let update = RecordUpdate::from_json(&json!({"title": null})).unwrap();
        assert_eq!(update.title, Patch::Null);
        assert!(update.description.is_unset());
        assert!(!update.is_empty());
    }

    #[test]
    fn update_rejects_null_amount() {
        let err = RecordUpdate::from_json(&json!({"amount": null})).unwrap_err();
        assert_eq!(err.errors()[0].kind, FieldErrorKind::NotNullable);
    }

    #[test]
    fn update_field_constraints() {
        assert!(RecordUpdate::from_json(&json!({"title": "a".repeat(51)})).is_err());
        assert!(RecordUpdate::from_json(&json!({"title": "aa"})).is_err());
        assert!(RecordUpdate::from_json(&json!({"description": "a".repeat(141)})).is_err());
        assert!(RecordUpdate::from_json(&json!({"amount": 12.345})).is_err());
        assert!(RecordUpdate::from_json(&json!({"happened_at": "abc"})).is_err());
    }

    #[test]
    fn update_ignores_unknown_fields() {
        let mut body = new_record();
        body["key"] = json!("value");

        let with_unknown = RecordUpdate::from_json(&body).unwrap();
        let without = RecordUpdate::from_json(&new_record()).unwrap();
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn read_hides_audit_timestamps() {
        let created = NaiveDateTime::parse_from_str("2020-05-16T18:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let record = Record {
            id: 7,
            created_at: created,
            updated_at: created,
            amount: Decimal::new(2512, 2),
            description: None,
            happened_at: Some(created),
            title: Some("Title 2".into()),
        };

        let body = serde_json::to_value(RecordRead::from(record)).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 7,
                "amount": 25.12,
                "description": null,
                "title": "Title 2",
                "happened_at": "2020-05-16T18:00:00",
            })
        );
    }
}
