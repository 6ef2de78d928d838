use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Template source or rendered output
///
/// Immutable: every transform returns a new `Document`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(String);

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named start/end token pair delimiting an optional block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerPair {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    /// Marker with explicit tokens
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Marker using the collector-template convention:
    /// `{{ start <name> }}` ... `{{ stop <name> }}`
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            start: format!("{{{{ start {} }}}}", name),
            end: format!("{{{{ stop {} }}}}", name),
            name,
        }
    }
}

/// Keep or drop the blocks delimited by one marker pair
///
/// `keep_interior` is caller policy per marker; nothing about the marker
/// itself implies a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDirective {
    pub marker: MarkerPair,
    pub keep_interior: bool,
}

impl ToggleDirective {
    /// Strip the tokens, keep the enclosed content
    pub fn keep(marker: MarkerPair) -> Self {
        Self {
            marker,
            keep_interior: true,
        }
    }

    /// Strip the tokens and the enclosed content
    pub fn remove(marker: MarkerPair) -> Self {
        Self {
            marker,
            keep_interior: false,
        }
    }
}

/// One located occurrence of a marker pair, as byte offsets into the document
///
/// `start..interior_start` is the start token, `interior_end..end` the end token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub interior_start: usize,
    pub interior_end: usize,
    pub end: usize,
}

/// What a placeholder looks like in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderSyntax {
    /// `{{key}}` or `{{ key }}`
    #[default]
    Braces,
    /// `${key}` or `$key`
    Dollar,
}

/// Flat placeholder name to value mapping
///
/// Values are stringified on insertion. Deserializes from a map whose values
/// are strings, numbers or booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, serde_json::Value>",
    into = "BTreeMap<String, String>"
)]
pub struct ParameterMap {
    values: BTreeMap<String, String>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl TryFrom<BTreeMap<String, serde_json::Value>> for ParameterMap {
    type Error = String;

    fn try_from(raw: BTreeMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(format!(
                        "parameter '{}' must be a string, number or boolean, got {}",
                        key, other
                    ))
                }
            };
            values.insert(key, text);
        }
        Ok(Self { values })
    }
}

impl From<ParameterMap> for BTreeMap<String, String> {
    fn from(params: ParameterMap) -> Self {
        params.values
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterMap::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
