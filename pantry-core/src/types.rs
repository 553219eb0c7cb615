use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An item as read back from the recognition service.
///
/// `expires` is the service's date text, never an empty string. It is only
/// validated as a calendar date when the add-item form commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedItem {
    pub name: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// An item tracked in the kitchen inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<NaiveDate>,
}

/// An item committed by the add-item form, before the inventory assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<NaiveDate>,
}

impl NewInventoryItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            expires: None,
        }
    }

    pub fn expiring(mut self, date: NaiveDate) -> Self {
        self.expires = Some(date);
        self
    }

    pub(crate) fn with_id(self, id: String) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            quantity: self.quantity,
            expires: self.expires,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_item_omits_absent_fields() {
        let item = RecognizedItem {
            name: "Milk".to_string(),
            quantity: "1 carton".to_string(),
            expires: None,
            confidence: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Milk", "quantity": "1 carton"}));
    }

    #[test]
    fn test_inventory_item_date_serializes_as_iso() {
        let item = NewInventoryItem::new("Eggs", "12")
            .expiring(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap())
            .with_id("abc".to_string());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["expires"], "2024-06-14");
        assert_eq!(json["id"], "abc");
    }
}
