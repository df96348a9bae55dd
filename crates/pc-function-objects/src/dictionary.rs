//! Keyword dictionaries for function object configuration.
//!
//! A `Dictionary` is a named, ordered key-value mapping read from YAML or JSON.
//! Values are deserialized on lookup, so each caller asks for exactly the type
//! it needs and gets a `MissingKey` / `InvalidEntry` error naming the key.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::{FunctionObjectError, FunctionObjectResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    name: String,
    entries: Mapping,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mapping::new(),
        }
    }

    /// Wrap a YAML value, which must be a mapping (or null for an empty dictionary).
    pub fn from_value(name: impl Into<String>, value: Value) -> FunctionObjectResult<Self> {
        let name = name.into();
        match value {
            Value::Mapping(entries) => Ok(Self { name, entries }),
            Value::Null => Ok(Self::new(name)),
            other => Err(FunctionObjectError::InvalidEntry {
                key: name.clone(),
                dict: name,
                message: format!("expected a mapping, found {}", value_kind(&other)),
            }),
        }
    }

    pub fn from_yaml_str(name: impl Into<String>, text: &str) -> FunctionObjectResult<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_value(name, value)
    }

    pub fn from_json_str(name: impl Into<String>, text: &str) -> FunctionObjectResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(name, value)
    }

    /// Read a dictionary file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file(path: &Path) -> FunctionObjectResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(name, &text),
            _ => Self::from_yaml_str(name, &text),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().filter_map(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set an entry, replacing any previous value.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> FunctionObjectResult<()> {
        let value = serde_yaml::to_value(value)?;
        self.entries.insert(Value::from(key), value);
        Ok(())
    }

    /// Builder-style `set` for plain YAML values.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.entries.insert(Value::from(key), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Required entry.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> FunctionObjectResult<T> {
        match self.entries.get(key) {
            Some(value) => self.convert(key, value),
            None => Err(FunctionObjectError::MissingKey {
                key: key.to_string(),
                dict: self.name.clone(),
            }),
        }
    }

    /// Optional entry with a default.
    pub fn lookup_or_default<T: DeserializeOwned>(&self, key: &str, default: T) -> FunctionObjectResult<T> {
        match self.entries.get(key) {
            Some(value) => self.convert(key, value),
            None => Ok(default),
        }
    }

    /// Nested dictionary named after its key.
    pub fn sub_dict(&self, key: &str) -> FunctionObjectResult<Dictionary> {
        let value = self
            .entries
            .get(key)
            .cloned()
            .ok_or_else(|| FunctionObjectError::MissingKey {
                key: key.to_string(),
                dict: self.name.clone(),
            })?;
        Self::from_value(key, value).map_err(|_| FunctionObjectError::InvalidEntry {
            key: key.to_string(),
            dict: self.name.clone(),
            message: "expected a sub-dictionary".to_string(),
        })
    }

    /// All entries that are themselves dictionaries, in insertion order.
    pub fn sub_dicts(&self) -> impl Iterator<Item = Dictionary> + '_ {
        self.entries.iter().filter_map(|(key, value)| match (key, value) {
            (Value::String(name), Value::Mapping(entries)) => Some(Dictionary {
                name: name.clone(),
                entries: entries.clone(),
            }),
            _ => None,
        })
    }

    fn convert<T: DeserializeOwned>(&self, key: &str, value: &Value) -> FunctionObjectResult<T> {
        serde_yaml::from_value(value.clone()).map_err(|e| FunctionObjectError::InvalidEntry {
            key: key.to_string(),
            dict: self.name.clone(),
            message: e.to_string(),
        })
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FUNCTIONS: &str = "
pipeFlow:
  type: pipeCalc
  faceZone: cut
  active: true
second:
  type: pipeCalc
  faceZone: outletZone
  U: Umean
note: not a dictionary
";

    #[test]
    fn typed_lookup_and_defaults() {
        let dict = Dictionary::from_yaml_str("functions", FUNCTIONS).unwrap();
        let pipe = dict.sub_dict("pipeFlow").unwrap();
        assert_eq!(pipe.lookup::<String>("faceZone").unwrap(), "cut");
        assert!(pipe.lookup::<bool>("active").unwrap());
        assert_eq!(pipe.lookup_or_default("U", "U".to_string()).unwrap(), "U");
    }

    #[test]
    fn missing_key_names_the_dictionary() {
        let dict = Dictionary::from_yaml_str("pipeFlow", "type: pipeCalc").unwrap();
        match dict.lookup::<String>("faceZone") {
            Err(FunctionObjectError::MissingKey { key, dict }) => {
                assert_eq!(key, "faceZone");
                assert_eq!(dict, "pipeFlow");
            }
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_invalid_entry() {
        let dict = Dictionary::from_yaml_str("d", "active: [1, 2]").unwrap();
        assert!(matches!(
            dict.lookup::<bool>("active"),
            Err(FunctionObjectError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn sub_dicts_keep_order_and_skip_scalars() {
        let dict = Dictionary::from_yaml_str("functions", FUNCTIONS).unwrap();
        let names: Vec<String> = dict.sub_dicts().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["pipeFlow", "second"]);
    }

    #[test]
    fn json_and_yaml_agree() {
        let yaml = Dictionary::from_yaml_str("d", "faceZone: cut\nactive: false").unwrap();
        let json = Dictionary::from_json_str("d", r#"{"faceZone": "cut", "active": false}"#).unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn builder_and_remove() {
        let mut dict = Dictionary::new("d").with("faceZone", "cut").with("log", false);
        assert_eq!(dict.len(), 2);
        assert!(dict.remove("log"));
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["faceZone"]);
        dict.set("writeInterval", 5_usize).unwrap();
        assert_eq!(dict.lookup::<usize>("writeInterval").unwrap(), 5);
    }

    #[test]
    fn scalar_root_is_rejected() {
        assert!(Dictionary::from_yaml_str("d", "42").is_err());
        assert!(Dictionary::from_yaml_str("d", "").unwrap().is_empty());
    }
}
