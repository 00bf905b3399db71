//! Config types for layout construction.
//!
//! These deserialize from JSON/YAML and are compiled into a runtime
//! [`ConditionLayout`](crate::ConditionLayout) by
//! [`Registry::load_layout()`](crate::Registry::load_layout).
//!
//! ```json
//! {
//!   "matchType": "any",
//!   "conditions": [
//!     { "subject": "department", "arguments": { "ids": ["1"] } },
//!     { "subject": "categoryTree", "arguments": { "ids": [12, "13"] }, "toBe": false }
//!   ]
//! }
//! ```

use crate::MatchType;
use serde::{Deserialize, Deserializer};

/// Configuration for a [`ConditionLayout`](crate::ConditionLayout).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// How condition results combine. Defaults to `all`.
    #[serde(default)]
    pub match_type: MatchType,

    /// Conditions, in evaluation order.
    #[serde(default)]
    pub conditions: Vec<ConditionConfig>,
}

/// Configuration for one condition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    /// Registered subject naming the check (e.g. `"categoryTree"`).
    pub subject: String,

    /// Arguments passed to the check.
    #[serde(default)]
    pub arguments: ArgumentsConfig,

    /// Expected outcome of the check. `false` inverts it.
    #[serde(default = "default_to_be")]
    pub to_be: bool,
}

fn default_to_be() -> bool {
    true
}

/// Arguments of a condition: the target ids.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgumentsConfig {
    /// Target ids; strings or numbers.
    #[serde(default)]
    pub ids: Vec<IdValue>,
}

/// An id as it appears in config or upstream data: a string or a number.
///
/// Ids are compared as strings, so numbers are stringified and strings are
/// normalized by [`into_normalized`](Self::into_normalized).
///
/// Variant order matters for untagged deserialization: integers that fit in
/// `i64` become `Number`, larger ones `Unsigned`, everything else `Float`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    /// A string id.
    Text(String),
    /// A numeric id.
    Number(i64),
    /// An integer id above `i64::MAX`.
    Unsigned(u64),
    /// A non-integer number, or an integer written with a fraction (`12.0`).
    Float(f64),
}

impl IdValue {
    /// Convert to the normalized string form used for comparison.
    #[must_use]
    pub fn into_normalized(self) -> String {
        match self {
            Self::Text(s) => crate::normalize_id(&s).to_owned(),
            Self::Number(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            // Integral floats print without a fraction; -0 prints as 0.
            Self::Float(n) if n == 0.0 => "0".to_owned(),
            Self::Float(n) => n.to_string(),
        }
    }
}

impl From<&str> for IdValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for IdValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Serde helper: deserialize a string-or-number id into its normalized string.
///
/// Use with `#[serde(deserialize_with = "condlayout::deserialize_id")]`.
///
/// # Errors
///
/// Fails if the value is neither a string nor an integer.
pub fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    IdValue::deserialize(deserializer).map(IdValue::into_normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = serde_json::json!({
            "matchType": "any",
            "conditions": [
                { "subject": "department", "arguments": { "ids": ["1"] } },
                { "subject": "categoryTree", "arguments": { "ids": [12, " 13 "] }, "toBe": false }
            ]
        });

        let config: LayoutConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.match_type, MatchType::Any);
        assert_eq!(config.conditions.len(), 2);
        assert!(config.conditions[0].to_be);
        assert!(!config.conditions[1].to_be);
        assert_eq!(
            config.conditions[1].arguments.ids,
            vec![IdValue::Number(12), IdValue::Text(" 13 ".into())]
        );
    }

    #[test]
    fn defaults() {
        let json = serde_json::json!({ "conditions": [{ "subject": "category" }] });
        let config: LayoutConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.match_type, MatchType::All);
        assert!(config.conditions[0].arguments.ids.is_empty());
        assert!(config.conditions[0].to_be);
    }

    #[test]
    fn deserialize_yaml() {
        let yaml = r#"
matchType: none
conditions:
  - subject: category
    arguments:
      ids: ["7", 8]
"#;
        let config: LayoutConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.match_type, MatchType::None);
        assert_eq!(config.conditions[0].arguments.ids.len(), 2);
    }

    #[test]
    fn unknown_match_type_is_rejected() {
        let json = serde_json::json!({ "matchType": "most", "conditions": [] });
        assert!(serde_json::from_value::<LayoutConfig>(json).is_err());
    }

    #[test]
    fn id_value_normalizes() {
        assert_eq!(IdValue::from(" 42 ").into_normalized(), "42");
        assert_eq!(IdValue::from(42).into_normalized(), "42");
    }

    #[test]
    fn large_and_fractional_numbers_are_stringified() {
        let json = r#"{ "conditions": [{ "subject": "category", "arguments": { "ids": [9223372036854775808, 12.0, 1.5, -0.0] } }] }"#;
        let config: LayoutConfig = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = config.conditions[0]
            .arguments
            .ids
            .iter()
            .cloned()
            .map(IdValue::into_normalized)
            .collect();
        assert_eq!(ids, vec!["9223372036854775808", "12", "1.5", "0"]);
        assert_eq!(
            config.conditions[0].arguments.ids[0],
            IdValue::Unsigned(9_223_372_036_854_775_808)
        );
    }

    #[test]
    fn deserialize_id_helper() {
        #[derive(Deserialize)]
        struct Node {
            #[serde(deserialize_with = "deserialize_id")]
            id: String,
        }

        let a: Node = serde_json::from_value(serde_json::json!({ "id": 9 })).unwrap();
        let b: Node = serde_json::from_value(serde_json::json!({ "id": "9" })).unwrap();
        assert_eq!(a.id, b.id);
        assert!(serde_json::from_value::<Node>(serde_json::json!({ "id": true })).is_err());

        let big: Node = serde_json::from_str(r#"{ "id": 9223372036854775808 }"#).unwrap();
        assert_eq!(big.id, "9223372036854775808");
        let float: Node = serde_json::from_str(r#"{ "id": 12.0 }"#).unwrap();
        assert_eq!(float.id, "12");
    }
}
