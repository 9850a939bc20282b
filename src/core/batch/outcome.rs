//! Per-item outcomes and their metadata

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Key every [`Meta`] carries
pub const ERROR_KEY: &str = "error";

/// Closed set of metadata value kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for MetaValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Diagnostic fields attached to an outcome
///
/// Always holds an `error` flag; the constructors set it, `insert` refuses
/// to overwrite it with anything but a bool, and deserialization rejects a
/// map without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, MetaValue>")]
pub struct Meta(BTreeMap<String, MetaValue>);

impl TryFrom<BTreeMap<String, MetaValue>> for Meta {
    type Error = String;

    fn try_from(fields: BTreeMap<String, MetaValue>) -> Result<Self, Self::Error> {
        match fields.get(ERROR_KEY) {
            Some(MetaValue::Bool(_)) => Ok(Self(fields)),
            Some(other) => Err(format!("meta `{ERROR_KEY}` must be a bool, got {other:?}")),
            None => Err(format!("meta is missing the `{ERROR_KEY}` flag")),
        }
    }
}

impl Meta {
    /// Metadata for a successful item
    pub fn ok() -> Self {
        Self::with_error_flag(false)
    }

    /// Metadata for a failed item
    pub fn failed() -> Self {
        Self::with_error_flag(true)
    }

    fn with_error_flag(error: bool) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(ERROR_KEY.to_string(), MetaValue::Bool(error));
        Self(fields)
    }

    /// Add or replace a caller-defined field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        let key = key.into();
        let value = value.into();
        if key == ERROR_KEY && !matches!(value, MetaValue::Bool(_)) {
            warn!(value = ?value, "Ignoring non-bool value for the meta error flag");
            return;
        }
        self.0.insert(key, value);
    }

    /// Builder-style [`Meta::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Value of the `error` flag
    pub fn is_error(&self) -> bool {
        matches!(self.0.get(ERROR_KEY), Some(MetaValue::Bool(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of one unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { payload: T, meta: Meta },
    Failure { meta: Meta },
}

impl<T> Outcome<T> {
    /// Successful outcome with `error: false` metadata
    pub fn success(payload: T) -> Self {
        Self::Success {
            payload,
            meta: Meta::ok(),
        }
    }

    /// Failed outcome with `error: true` metadata
    pub fn failure() -> Self {
        Self::Failure {
            meta: Meta::failed(),
        }
    }

    /// Attach a caller-defined metadata field
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.meta_mut().insert(key, value);
        self
    }

    pub fn meta(&self) -> &Meta {
        match self {
            Self::Success { meta, .. } | Self::Failure { meta } => meta,
        }
    }

    fn meta_mut(&mut self) -> &mut Meta {
        match self {
            Self::Success { meta, .. } | Self::Failure { meta } => meta,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Consume the outcome, keeping the payload of a success
    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }
}
