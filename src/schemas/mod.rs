//! Request body schemas.
//!
//! A schema is a static rule table interpreted by [`Schema::validate`]. Rules
//! are checked in table order and the first failure wins; keys the table does
//! not declare are rejected after all declared rules pass.

use serde_json::{Map, Value};

/// JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
}

/// Default value inserted for an absent optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Bool(bool),
}

impl FieldDefault {
    fn to_value(self) -> Value {
        match self {
            FieldDefault::Bool(b) => Value::Bool(b),
        }
    }
}

/// A single field rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldType,
    pub required: bool,
    pub default: Option<FieldDefault>,
}

impl FieldRule {
    const fn optional(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    const fn required(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    fn check(&self, value: &Value) -> Result<(), String> {
        match (self.kind, value) {
            (FieldType::String, Value::String(s)) if s.is_empty() => {
                Err(format!("\"{}\" is not allowed to be empty", self.name))
            }
            (FieldType::String, Value::String(_)) => Ok(()),
            (FieldType::String, _) => Err(format!("\"{}\" must be a string", self.name)),
            (FieldType::Boolean, Value::Bool(_)) => Ok(()),
            (FieldType::Boolean, _) => Err(format!("\"{}\" must be a boolean", self.name)),
        }
    }
}

/// A declarative object schema.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    rules: &'static [FieldRule],
}

/// Schema for `POST /contacts`.
pub const CREATE_CONTACT: Schema = Schema {
    rules: &[
        FieldRule::required("name", FieldType::String),
        FieldRule::optional("email", FieldType::String),
        FieldRule::optional("phone", FieldType::String),
        FieldRule::optional("favorite", FieldType::Boolean)
            .with_default(FieldDefault::Bool(false)),
    ],
};

/// Schema for `PUT /contacts/{id}` and `PATCH /contacts/{id}/favorite`.
pub const UPDATE_CONTACT: Schema = Schema {
    rules: &[
        FieldRule::optional("name", FieldType::String),
        FieldRule::optional("email", FieldType::String),
        FieldRule::optional("phone", FieldType::String),
        FieldRule::optional("favorite", FieldType::Boolean),
    ],
};

impl Schema {
    /// Validate `payload`, returning the object with declared defaults applied.
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, String> {
        let Value::Object(object) = payload else {
            return Err("\"value\" must be of type object".to_string());
        };

        let mut validated = object.clone();
        for rule in self.rules {
            match object.get(rule.name) {
                Some(value) => rule.check(value)?,
                None if rule.required => return Err(format!("\"{}\" is required", rule.name)),
                None => {
                    if let Some(default) = rule.default {
                        validated.insert(rule.name.to_string(), default.to_value());
                    }
                }
            }
        }

        if let Some(unknown) = object
            .keys()
            .find(|key| !self.rules.iter().any(|rule| rule.name == key.as_str()))
        {
            return Err(format!("\"{}\" is not allowed", unknown));
        }

        Ok(validated)
    }
}

/// Reject a body with no fields at all. Kept apart from [`Schema::validate`]
/// because the update schema itself accepts `{}`.
pub fn require_any_field(payload: &Map<String, Value>) -> Result<(), String> {
    if payload.is_empty() {
        return Err("Body must have at least one field".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_requires_name() {
        let err = CREATE_CONTACT
            .validate(&json!({ "email": "ada@example.com" }))
            .unwrap_err();
        assert_eq!(err, "\"name\" is required");
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let err = CREATE_CONTACT.validate(&json!({ "name": "" })).unwrap_err();
        assert_eq!(err, "\"name\" is not allowed to be empty");
    }

    #[test]
    fn test_create_applies_favorite_default() {
        let validated = CREATE_CONTACT.validate(&json!({ "name": "Ada" })).unwrap();
        assert_eq!(validated["favorite"], json!(false));
    }

    #[test]
    fn test_create_keeps_explicit_favorite() {
        let validated = CREATE_CONTACT
            .validate(&json!({ "name": "Ada", "favorite": true }))
            .unwrap();
        assert_eq!(validated["favorite"], json!(true));
    }

    #[test]
    fn test_type_errors() {
        assert_eq!(
            CREATE_CONTACT.validate(&json!({ "name": 42 })).unwrap_err(),
            "\"name\" must be a string"
        );
        assert_eq!(
            UPDATE_CONTACT
                .validate(&json!({ "favorite": "yes" }))
                .unwrap_err(),
            "\"favorite\" must be a boolean"
        );
        assert_eq!(
            UPDATE_CONTACT
                .validate(&json!({ "email": null }))
                .unwrap_err(),
            "\"email\" must be a string"
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = CREATE_CONTACT
            .validate(&json!({ "phone": 1, "favorite": "no" }))
            .unwrap_err();
        assert_eq!(err, "\"name\" is required");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = UPDATE_CONTACT
            .validate(&json!({ "name": "Ada", "nickname": "A" }))
            .unwrap_err();
        assert_eq!(err, "\"nickname\" is not allowed");
    }

    #[test]
    fn test_non_object_rejected() {
        let err = UPDATE_CONTACT.validate(&json!(["name"])).unwrap_err();
        assert_eq!(err, "\"value\" must be of type object");
    }

    #[test]
    fn test_update_accepts_empty_object() {
        let validated = UPDATE_CONTACT.validate(&json!({})).unwrap();
        assert!(validated.is_empty());
        assert_eq!(
            require_any_field(&validated).unwrap_err(),
            "Body must have at least one field"
        );
    }

    #[test]
    fn test_update_has_no_defaults() {
        let validated = UPDATE_CONTACT.validate(&json!({ "name": "Bob" })).unwrap();
        assert!(validated.get("favorite").is_none());
        assert!(require_any_field(&validated).is_ok());
    }
}
