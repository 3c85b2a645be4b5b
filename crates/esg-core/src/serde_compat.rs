//! Deserializers for fields whose stored shape varies between writers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetList {
    Joined(String),
    Items(Vec<String>),
}

/// Reads a dataset list stored either as a comma-joined string or as a JSON
/// array of names. `null` reads as empty.
///
/// Arrays are joined with `,` so both shapes end up identical.
pub fn comma_joined<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<DatasetList>::deserialize(deserializer)? {
        Some(DatasetList::Joined(joined)) => joined,
        Some(DatasetList::Items(items)) => items.join(","),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "comma_joined")]
        selected_input: String,
    }

    fn parse(json: serde_json::Value) -> String {
        serde_json::from_value::<Params>(json).unwrap().selected_input
    }

    #[test]
    fn test_accepts_both_shapes() {
        assert_eq!(parse(serde_json::json!({"selected_input": "A,B"})), "A,B");
        assert_eq!(
            parse(serde_json::json!({"selected_input": ["A", "B"]})),
            "A,B"
        );
    }

    #[test]
    fn test_null_and_missing_read_as_empty() {
        assert_eq!(parse(serde_json::json!({"selected_input": null})), "");
        assert_eq!(parse(serde_json::json!({})), "");
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(serde_json::from_value::<Params>(serde_json::json!({"selected_input": 3})).is_err());
    }
}
