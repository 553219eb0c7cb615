//! Normalization of free-text recognition replies.
//!
//! The recognition service is asked for a bare JSON object, but replies often
//! arrive wrapped in a markdown code fence or surrounded by prose. `normalize`
//! turns any such reply into a fully populated [`RecognizedItem`], or fails
//! with [`NormalizationError::Unparseable`].
//!
//! Parsing runs an ordered list of [`ParseStrategy`] values over the
//! fence-stripped text and takes the first one that yields a JSON object.

use serde_json::{Map, Value};

use crate::error::NormalizationError;
use crate::types::RecognizedItem;

/// Confidence reported for every normalized item. No scoring is performed.
pub const CONFIDENCE: f32 = 0.9;

/// Name used when the reply has no usable `name` field.
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// Quantity used when the reply has no usable `quantity` field.
pub const DEFAULT_QUANTITY: &str = "1";

const FENCE: &str = "```";

/// A way of reading a JSON object out of reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole text is the object.
    Strict,
    /// The object spans the first `{` through the last `}`.
    BraceScan,
}

impl ParseStrategy {
    /// Strategies in the order they are attempted.
    pub const ALL: &'static [ParseStrategy] = &[ParseStrategy::Strict, ParseStrategy::BraceScan];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::Strict => "strict",
            ParseStrategy::BraceScan => "brace_scan",
        }
    }

    fn attempt(self, text: &str) -> Option<Map<String, Value>> {
        let candidate = match self {
            ParseStrategy::Strict => text,
            ParseStrategy::BraceScan => brace_span(text)?,
        };

        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

/// Normalize a raw recognition reply into a [`RecognizedItem`].
pub fn normalize(raw: &str) -> Result<RecognizedItem, NormalizationError> {
    normalize_with_strategy(raw).map(|(item, _)| item)
}

/// Like [`normalize`], but also reports which strategy recovered the object.
pub fn normalize_with_strategy(
    raw: &str,
) -> Result<(RecognizedItem, ParseStrategy), NormalizationError> {
    let text = strip_code_fence(raw.trim());

    ParseStrategy::ALL
        .iter()
        .find_map(|strategy| {
            strategy
                .attempt(text)
                .map(|fields| (build_item(&fields), *strategy))
        })
        .ok_or(NormalizationError::Unparseable)
}

/// Remove a leading code fence (optionally tagged `json`) and a trailing fence.
///
/// Text that does not start with a fence is returned unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim();
    rest.strip_suffix(FENCE).unwrap_or(rest).trim_end()
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

fn build_item(fields: &Map<String, Value>) -> RecognizedItem {
    RecognizedItem {
        name: text_field(fields, "name").unwrap_or_else(|| UNKNOWN_ITEM.to_string()),
        quantity: text_field(fields, "quantity").unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
        expires: text_field(fields, "expires"),
        confidence: Some(CONFIDENCE),
    }
}

/// Read a scalar field as text. Blank strings, `null` and non-scalar values
/// count as missing.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let item = normalize(r#"{"name":"Milk","quantity":"2","expires":"2024-06-12"}"#).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, "2");
        assert_eq!(item.expires.as_deref(), Some("2024-06-12"));
        assert_eq!(item.confidence, Some(CONFIDENCE));
    }

    #[test]
    fn test_empty_expiry_is_absent() {
        let item = normalize(r#"{"name":"Milk","quantity":"2","expires":""}"#).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, "2");
        assert_eq!(item.expires, None);
    }

    #[test]
    fn test_fenced_json() {
        let item = normalize("```json\n{\"name\":\"Eggs\",\"quantity\":\"12\"}\n```").unwrap();
        assert_eq!(item.name, "Eggs");
        assert_eq!(item.quantity, "12");
        assert_eq!(item.expires, None);
    }

    #[test]
    fn test_untagged_fence() {
        let item = normalize("```\n{\"name\":\"Bread\"}\n```").unwrap();
        assert_eq!(item.name, "Bread");
    }

    #[test]
    fn test_empty_object_defaults() {
        let item = normalize("{}").unwrap();
        assert_eq!(item.name, UNKNOWN_ITEM);
        assert_eq!(item.quantity, DEFAULT_QUANTITY);
        assert_eq!(item.expires, None);
    }

    #[test]
    fn test_not_json() {
        assert_eq!(normalize("not json at all"), Err(NormalizationError::Unparseable));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), Err(NormalizationError::Unparseable));
        assert_eq!(normalize("   \n"), Err(NormalizationError::Unparseable));
    }

    #[test]
    fn test_prose_around_object_uses_brace_scan() {
        let (item, strategy) = normalize_with_strategy(
            "Sure! Here is the item:\n{\"name\":\"Chicken\",\"quantity\":\"500g\"}\nLet me know.",
        )
        .unwrap();
        assert_eq!(strategy, ParseStrategy::BraceScan);
        assert_eq!(item.name, "Chicken");
        assert_eq!(item.quantity, "500g");
    }

    #[test]
    fn test_clean_reply_uses_strict() {
        let (_, strategy) = normalize_with_strategy(r#"{"name":"Rice"}"#).unwrap();
        assert_eq!(strategy, ParseStrategy::Strict);
    }

    #[test]
    fn test_non_object_json_is_unparseable() {
        assert_eq!(normalize("[1, 2, 3]"), Err(NormalizationError::Unparseable));
        assert_eq!(normalize("\"Milk\""), Err(NormalizationError::Unparseable));
        assert_eq!(normalize("42"), Err(NormalizationError::Unparseable));
    }

    #[test]
    fn test_reversed_braces_are_unparseable() {
        assert_eq!(normalize("} oops {"), Err(NormalizationError::Unparseable));
    }

    #[test]
    fn test_numeric_quantity_is_kept_as_text() {
        let item = normalize(r#"{"name":"Eggs","quantity":12}"#).unwrap();
        assert_eq!(item.quantity, "12");
    }

    #[test]
    fn test_null_and_blank_fields_default() {
        let item = normalize(r#"{"name":"  ","quantity":null,"expires":"   "}"#).unwrap();
        assert_eq!(item.name, UNKNOWN_ITEM);
        assert_eq!(item.quantity, DEFAULT_QUANTITY);
        assert_eq!(item.expires, None);
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json {}"), "{}");
        assert_eq!(strip_code_fence("{}"), "{}");
    }

    #[test]
    fn test_idempotent() {
        let raw = "```json\n{\"name\":\"Tomatoes\",\"quantity\":\"6\",\"expires\":\"2024-06-17\"}\n```";
        assert_eq!(normalize(raw), normalize(raw));
    }
}
