use serde::{Deserialize, Serialize};

use crate::domain::types::{PersonId, PersonName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: PersonName,
    #[serde(default)]
    pub contact_info: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewPerson {
    pub name: PersonName,
    /// Free-form phone number or email; sent as an empty field when absent.
    pub contact_info: String,
}

impl NewPerson {
    #[must_use]
    pub fn new(name: PersonName, contact_info: Option<String>) -> Self {
        Self {
            name,
            contact_info: contact_info
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        }
    }
}
