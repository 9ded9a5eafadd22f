//! Configuration tree values.
//!
//! A configuration tree is an insertion-ordered mapping from string keys to
//! [`ConfigValue`]s. The shape mirrors what `ci.json` may contain: strings,
//! booleans, lists of strings, nested objects, and `null`. Anything else
//! (numbers, lists of non-strings) is rejected at deserialization time.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single value in a configuration tree.
///
/// Variant order matters for the untagged deserializer: `null` must be tried
/// before anything else and a list must be tried before a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    String(String),
    List(Vec<String>),
    Tree(ConfigTree),
}

impl ConfigValue {
    /// Short type name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Tree(_) => "object",
        }
    }

    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(value: Vec<&str>) -> Self {
        ConfigValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(value: ConfigTree) -> Self {
        ConfigValue::Tree(value)
    }
}

/// Insertion-ordered configuration mapping.
///
/// Equality is order-sensitive: two trees with the same entries in a
/// different order are different trees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree(IndexMap<String, ConfigValue>);

impl PartialEq for ConfigTree {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for ConfigTree {}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Look up a value by dot-separated path (e.g. `inspections.phpunit.coverage`).
    #[cfg(test)]
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_tree()?.get(part)?;
        }
        Some(current)
    }

    /// Insert `value` under `key`, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove `key` while preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl IntoIterator for ConfigTree {
    type Item = (String, ConfigValue);
    type IntoIter = indexmap::map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// A required configuration field is missing or has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path of the offending key.
    pub path: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Typed, path-aware accessors over one section of the tree.
///
/// `prefix` is the dot-separated location of `tree`, used only for messages.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    prefix: &'a str,
    tree: &'a ConfigTree,
}

impl<'a> Section<'a> {
    pub fn new(prefix: &'a str, tree: &'a ConfigTree) -> Self {
        Self { prefix, tree }
    }

    pub fn path_of(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    fn require(&self, key: &str) -> Result<&'a ConfigValue, ValidationError> {
        self.tree
            .get(key)
            .ok_or_else(|| ValidationError::new(self.path_of(key), "missing required field"))
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &ConfigValue) -> ValidationError {
        ValidationError::new(
            self.path_of(key),
            format!("expected {expected}, found {}", found.type_name()),
        )
    }

    pub fn bool(&self, key: &str) -> Result<bool, ValidationError> {
        match self.require(key)? {
            ConfigValue::Bool(value) => Ok(*value),
            other => Err(self.wrong_type(key, "boolean", other)),
        }
    }

    /// A required, non-blank string.
    pub fn str(&self, key: &str) -> Result<&'a str, ValidationError> {
        match self.require(key)? {
            ConfigValue::String(value) if value.trim().is_empty() => Err(ValidationError::new(
                self.path_of(key),
                "must not be empty",
            )),
            ConfigValue::String(value) => Ok(value.as_str()),
            other => Err(self.wrong_type(key, "string", other)),
        }
    }

    /// An optional string: absent or `null` yield `None`.
    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>, ValidationError> {
        match self.tree.get(key) {
            None | Some(ConfigValue::Null) => Ok(None),
            Some(ConfigValue::String(value)) if value.trim().is_empty() => Err(
                ValidationError::new(self.path_of(key), "must not be empty when set"),
            ),
            Some(ConfigValue::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(self.wrong_type(key, "string or null", other)),
        }
    }

    pub fn list(&self, key: &str) -> Result<&'a [String], ValidationError> {
        match self.require(key)? {
            ConfigValue::List(items) => Ok(items.as_slice()),
            other => Err(self.wrong_type(key, "list of strings", other)),
        }
    }

    pub fn section(&self, key: &str) -> Result<(String, &'a ConfigTree), ValidationError> {
        match self.require(key)? {
            ConfigValue::Tree(tree) => Ok((self.path_of(key), tree)),
            other => Err(self.wrong_type(key, "object", other)),
        }
    }
}
