//! Contact model and request payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A contact as it appears in list responses, without timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub favorite: bool,
}

impl From<Contact> for ContactSummary {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            favorite: contact.favorite,
        }
    }
}

/// Request body for creating a new contact.
///
/// Built from a payload already accepted by the create schema, so `favorite`
/// is always present by the time this is deserialized.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

/// Request body for updating an existing contact. Absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub favorite: Option<bool>,
}

/// Generate a fresh contact identifier.
pub fn new_contact_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `id` has the shape of an identifier issued by [`new_contact_id`]:
/// a lowercase hyphenated UUID.
pub fn is_valid_contact_id(id: &str) -> bool {
    Uuid::try_parse(id).is_ok_and(|uuid| uuid.hyphenated().to_string() == id)
}
