//! Attribute maps applied to nodes and edges in the generated document

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Styling attributes keyed by DOT attribute name.
///
/// Keys are unique and keep the order they were first inserted in, which is
/// the order they are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy with `key` set to `value`.
    ///
    /// An existing key keeps its position and only its value changes.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut attributes = self.0.clone();
        attributes.insert(key.into(), value.into());
        Self(attributes)
    }

    /// Returns a copy without `key`, keeping the order of the rest
    pub fn without(&self, key: &str) -> Self {
        let mut attributes = self.0.clone();
        attributes.shift_remove(key);
        Self(attributes)
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Renders as a DOT attribute list: `[]`, or `[key = "value" ...]`
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} = {}", key, quoted(value))?;
        }
        f.write_str("]")
    }
}

/// Wraps a DOT string in double quotes, escaping embedded quotes
pub fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_brackets() {
        assert_eq!(Attributes::new().to_string(), "[]");
    }

    #[test]
    fn test_render_keeps_insertion_order() {
        let attributes: Attributes = [("color", "red"), ("label", "go"), ("style", "dashed")]
            .into_iter()
            .collect();
        assert_eq!(
            attributes.to_string(),
            r#"[color = "red" label = "go" style = "dashed"]"#
        );
    }

    #[test]
    fn test_with_overrides_in_place() {
        let attributes: Attributes = [("label", "old"), ("color", "blue")].into_iter().collect();
        let updated = attributes.with("label", "yes");

        assert_eq!(updated.to_string(), r#"[label = "yes" color = "blue"]"#);
        // the source map is untouched
        assert_eq!(attributes.get("label"), Some("old"));
    }

    #[test]
    fn test_with_appends_new_key() {
        let attributes: Attributes = [("color", "blue")].into_iter().collect();
        assert_eq!(
            attributes.with("label", "no").to_string(),
            r#"[color = "blue" label = "no"]"#
        );
    }

    #[test]
    fn test_without() {
        let attributes: Attributes = [("color", "blue"), ("label", "x"), ("style", "bold")]
            .into_iter()
            .collect();
        let stripped = attributes.without("label");

        assert!(!stripped.contains("label"));
        assert_eq!(stripped.to_string(), r#"[color = "blue" style = "bold"]"#);
        assert_eq!(attributes.len(), 3);

        // removing a missing key is a no-op
        assert_eq!(stripped.without("label"), stripped);
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted("Paid?"), "\"Paid?\"");
        assert_eq!(quoted("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_deserialize_keeps_order() {
        let attributes: Attributes =
            serde_json::from_str(r#"{"style": "dotted", "color": "red"}"#).unwrap();
        assert_eq!(
            attributes.to_string(),
            r#"[style = "dotted" color = "red"]"#
        );
    }
}
