//! Prompt for turning a spoken transcript into an item.

pub const SPEECH_PARSE_PROMPT_NAME: &str = "speech_parse";

pub const SPEECH_PARSE_MAX_TOKENS: u32 = 150;

pub fn render_speech_parse_system_prompt() -> String {
    r#"You are a helpful food inventory assistant.
Parse spoken text about food items and extract:
- Item name (e.g., "Milk", "Eggs", "Bread")
- Quantity (e.g., "1 carton", "12", "1 loaf")
- Expiration date if mentioned (format: YYYY-MM-DD)

Examples:
- "Add 2 cartons of milk" -> {"name": "Milk", "quantity": "2 cartons", "expires": ""}
- "I have 12 eggs expiring on December 25th" -> {"name": "Eggs", "quantity": "12", "expires": "2024-12-25"}
- "Add bread" -> {"name": "Bread", "quantity": "1", "expires": ""}
- "We bought chicken" -> {"name": "Chicken", "quantity": "1", "expires": ""}

Return ONLY a JSON object with this structure:
{
  "name": "item name",
  "quantity": "quantity string",
  "expires": "YYYY-MM-DD or empty string if not mentioned"
}"#
    .to_string()
}

/// The user turn is the transcript itself, trimmed.
pub fn render_speech_parse_user_prompt(transcript: &str) -> String {
    transcript.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_system_prompt() {
        let prompt = render_speech_parse_system_prompt();
        assert!(prompt.contains("Parse spoken text"));
        assert!(prompt.contains("We bought chicken"));
    }

    #[test]
    fn test_render_user_prompt() {
        assert_eq!(
            render_speech_parse_user_prompt("  add two cartons of milk \n"),
            "add two cartons of milk"
        );
    }
}
