//! Golden file tests for recognition reply normalization.
//!
//! Each fixture in `fixtures/replies/` holds a raw service reply and the item
//! it should normalize to, or `null` when the reply must be rejected.
//!
//! Test format:
//! ```json
//! {
//!   "raw": "```json\n{\"name\": \"Eggs\"}\n```",
//!   "expected": { "name": "Eggs", "quantity": "1", "expires": null }
//! }
//! ```

use pantry_core::normalize::CONFIDENCE;
use pantry_core::{normalize, NormalizationError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TestCase {
    raw: String,
    expected: Option<Expected>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Expected {
    name: String,
    quantity: String,
    expires: Option<String>,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/replies");

    let mut cases = Vec::new();

    for entry in fs::read_dir(&fixtures_dir).expect("Failed to read fixtures directory") {
        let path = entry.expect("Failed to read directory entry").path();

        if path.extension().map(|e| e == "json").unwrap_or(false) {
            let name = path.file_stem().unwrap().to_string_lossy().into_owned();
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            let case: TestCase = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
            cases.push((name, case));
        }
    }

    cases.sort_by(|a, b| a.0.cmp(&b.0));

    assert!(!cases.is_empty(), "No test fixtures found in {:?}", fixtures_dir);

    cases
}

#[test]
fn test_reply_golden_files() {
    let cases = load_test_cases();
    let mut failures = Vec::new();

    for (name, case) in &cases {
        let actual = normalize(&case.raw);

        let ok = match (&case.expected, &actual) {
            (Some(expected), Ok(item)) => {
                let got = Expected {
                    name: item.name.clone(),
                    quantity: item.quantity.clone(),
                    expires: item.expires.clone(),
                };
                got == *expected && item.confidence == Some(CONFIDENCE)
            }
            (None, Err(NormalizationError::Unparseable)) => true,
            _ => false,
        };

        if !ok {
            failures.push(format!(
                "\n=== {} ===\nInput: {:?}\nExpected: {:#?}\nActual:   {:#?}\n",
                name, case.raw, case.expected, actual
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "\n{} failures across {} tests:\n{}",
        failures.len(),
        cases.len(),
        failures.concat()
    );
}

/// Wrapping a payload in fences or prose must not change what is recovered.
#[test]
fn test_wrapping_does_not_change_fields() {
    let payloads = [
        r#"{"name":"Milk","quantity":"2 cartons","expires":"2024-06-12"}"#,
        r#"{"name":"Rice","quantity":"2kg"}"#,
        r#"{"quantity":"3","expires":""}"#,
        r#"{"name":"Eggs","quantity":12,"expires":null}"#,
    ];

    for payload in payloads {
        let direct = normalize(payload).unwrap();

        let wrapped = [
            format!("```json\n{}\n```", payload),
            format!("```\n{}\n```", payload),
            format!("Here you go:\n{}", payload),
            format!("{}\nLet me know if you need anything else.", payload),
            format!("\n\n   {}   \n", payload),
        ];

        for raw in &wrapped {
            assert_eq!(normalize(raw).unwrap(), direct, "wrapping changed fields: {:?}", raw);
        }
    }
}
