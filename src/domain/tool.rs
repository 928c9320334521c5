use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{BrandName, PersonName, ToolId, ToolName};

/// A trackable piece of equipment together with its current lend status.
///
/// The server owns these records; clients only hold read-only copies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub id: ToolId,
    pub name: ToolName,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub brand: Option<BrandName>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub image_path: Option<String>,
    /// Name of the person currently holding the tool.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub borrower: Option<PersonName>,
    #[serde(default)]
    pub lent_on: Option<NaiveDate>,
}

/// Reads an optional free-text column, treating blank strings as missing.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| T::try_from(raw).ok()))
}

impl Tool {
    /// Creates an available tool with only the required fields set.
    pub fn new(id: ToolId, name: ToolName) -> Self {
        Self {
            id,
            name,
            brand: None,
            description: None,
            value: None,
            image_path: None,
            borrower: None,
            lent_on: None,
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: BrandName) -> Self {
        self.brand = Some(brand);
        self
    }

    pub fn is_lent(&self) -> bool {
        self.borrower.is_some()
    }

    /// Returns a copy marked as lent to `borrower` on `lent_on`.
    #[must_use]
    pub fn lent_to(&self, borrower: PersonName, lent_on: NaiveDate) -> Self {
        Self {
            borrower: Some(borrower),
            lent_on: Some(lent_on),
            ..self.clone()
        }
    }

    /// Returns a copy with the loan cleared.
    #[must_use]
    pub fn returned(&self) -> Self {
        Self {
            borrower: None,
            lent_on: None,
            ..self.clone()
        }
    }

    /// Checks whether the tool would be part of a listing for the given filters.
    ///
    /// Search text is matched case-insensitively against name, description and
    /// brand; the brand filter must match exactly, ignoring case.
    pub fn matches(&self, search: &str, brand: Option<&BrandName>) -> bool {
        if let Some(brand) = brand {
            let same_brand = self
                .brand
                .as_ref()
                .is_some_and(|own| own.to_lowercase() == brand.to_lowercase());
            if !same_brand {
                return false;
            }
        }

        let term = search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
            || self
                .brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(&term))
    }
}

/// Payload for creating a tool through the quick-add flow.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewTool {
    pub name: ToolName,
}

impl NewTool {
    #[must_use]
    pub fn new(name: ToolName) -> Self {
        Self { name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn drill() -> Tool {
        let mut tool = Tool::new(
            ToolId::new(1).expect("valid id"),
            ToolName::new("Hammer Drill").expect("valid name"),
        )
        .with_brand(BrandName::new("Makita").expect("valid brand"));
        tool.description = Some("Cordless, 18V".to_string());
        tool
    }

    #[test]
    fn deserializes_api_payload() {
        let tool: Tool = serde_json::from_str(
            r#"{"id": 3, "name": "Saw", "brand": null, "value": 12.5,
                "image_path": "images/saw.jpg", "borrower": "Ann", "lent_on": "2024-05-01"}"#,
        )
        .expect("valid tool");

        assert_eq!(tool.id.get(), 3);
        assert_eq!(tool.value, Some(dec!(12.5)));
        assert_eq!(tool.borrower.as_deref(), Some("Ann"));
        assert_eq!(tool.lent_on, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(tool.description.is_none());
    }

    #[test]
    fn blank_brand_and_borrower_read_as_missing() {
        let tool: Tool = serde_json::from_str(
            r#"{"id": 4, "name": "Level", "brand": "  ", "borrower": ""}"#,
        )
        .expect("valid tool");

        assert!(tool.brand.is_none());
        assert!(!tool.is_lent());
    }

    #[test]
    fn matches_search_across_fields() {
        let tool = drill();
        assert!(tool.matches("", None));
        assert!(tool.matches("drill", None));
        assert!(tool.matches("18v", None));
        assert!(tool.matches("MAKI", None));
        assert!(!tool.matches("sander", None));
    }

    #[test]
    fn matches_brand_filter_ignoring_case() {
        let tool = drill();
        let makita = BrandName::new("makita").expect("valid brand");
        let bosch = BrandName::new("Bosch").expect("valid brand");
        assert!(tool.matches("", Some(&makita)));
        assert!(!tool.matches("", Some(&bosch)));
    }

    #[test]
    fn lend_and_return_toggle_status() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        let lent = drill().lent_to(PersonName::new("Bo").expect("valid name"), date);
        assert!(lent.is_lent());
        assert_eq!(lent.lent_on, Some(date));

        let back = lent.returned();
        assert!(!back.is_lent());
        assert!(back.lent_on.is_none());
    }
}
