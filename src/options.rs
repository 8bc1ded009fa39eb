use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::error::OptionsError;
use crate::utils::string::unquote_string;

/// Caller-supplied discovery options, passed to the selected builder as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryOptions {
    values: BTreeMap<String, serde_json::Value>,
}

impl DiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Reads a scalar option as text. `KEY=VALUE` pairs parse `2021` or
    /// `true` as JSON, so numbers and booleans come back in their written
    /// form. `null` and compound values read as unset.
    pub fn get_str(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.get(key)? {
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
            serde_json::Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Accepts either a single string or an array of strings.
    pub fn get_str_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            serde_json::Value::String(s) => Some(vec![s.clone()]),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.values.iter()
    }

    /// Later values win.
    pub fn merge(&mut self, other: DiscoveryOptions) {
        self.values.extend(other.values);
    }

    /// Parses `KEY=VALUE`. The value is read as JSON when it parses, otherwise
    /// it is kept as a (possibly quoted) string.
    pub fn parse_pair(pair: &str) -> Result<(String, serde_json::Value), OptionsError> {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| OptionsError::invalid_pair(pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(OptionsError::invalid_pair(pair));
        }

        let value = serde_json::from_str(raw.trim())
            .unwrap_or_else(|_| serde_json::Value::String(unquote_string(raw)));
        trace!(key, %value, "parsed option");
        Ok((key.to_string(), value))
    }

    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, OptionsError> {
        let mut options = Self::new();
        for pair in pairs {
            let (key, value) = Self::parse_pair(pair.as_ref())?;
            options.insert(key, value);
        }
        Ok(options)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading discovery options");

        let content = fs::read_to_string(path)
            .map_err(|e| OptionsError::file_read_error(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let options: Self = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| OptionsError::parse_error(path, e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| OptionsError::parse_error(path, e.to_string()))?,
            _ => return Err(OptionsError::unsupported_format(extension)),
        };

        debug!(count = options.len(), "loaded discovery options");
        Ok(options)
    }

    /// Options file first, then `KEY=VALUE` pairs on top.
    pub fn from_sources<S: AsRef<str>>(
        file: Option<&Path>,
        pairs: &[S],
    ) -> Result<Self, OptionsError> {
        let mut options = match file {
            Some(path) => Self::load_file(path)?,
            None => Self::new(),
        };
        options.merge(Self::from_pairs(pairs)?);
        Ok(options)
    }
}
