//! Read-only configuration snapshot and feature flags.
//!
//! The store is injected into every builder call instead of being read from
//! global state. Keys are dot-separated paths (`Auth.Authenticators`); a
//! [`Snapshot`] resolves them either as flat top-level keys or by walking
//! nested mappings, so both configuration layouts work.

pub mod keys;

use crate::error::{json_type, Error, Result};
use crate::options::Options;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fs, path::Path};
use tracing::debug;

/// Source of configuration values.
pub trait ConfigStore: Send + Sync {
    fn read(&self, key: &str) -> Option<Value>;
}

/// Immutable JSON configuration tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    root: Map<String, Value>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a JSON file whose top level is a mapping.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON mapping.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse a snapshot from a JSON document whose top level is a mapping.
    ///
    /// # Errors
    /// Returns an error if the document is not valid JSON or not a mapping.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(Error::MalformedTable {
                key: "<root>".to_string(),
                found: json_type(&other),
            }),
        }
    }

    /// Builder form of [`Snapshot::write`].
    #[must_use]
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.write(key, value);
        self
    }

    /// Write `value` at the dot-separated `key`, creating nested mappings as needed.
    ///
    /// A flat top-level key with the same name is removed so the nested value
    /// is the one observed by [`ConfigStore::read`].
    pub fn write(&mut self, key: &str, value: Value) {
        if key.contains('.') {
            self.root.remove(key);
        }

        let mut segments = key.split('.').peekable();
        let mut node = &mut self.root;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                node.insert(segment.to_string(), value);
                return;
            }

            let child = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(next) = child else {
                return;
            };
            node = next;
        }
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.root.get(key) {
            return Some(value);
        }

        let mut segments = key.split('.');
        let first = segments.next()?;
        segments.try_fold(self.root.get(first)?, |node, segment| node.get(segment))
    }
}

impl ConfigStore for Snapshot {
    fn read(&self, key: &str) -> Option<Value> {
        self.lookup(key).cloned()
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Option<Value> {
        (**self).read(key)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn read(&self, key: &str) -> Option<Value> {
        (**self).read(key)
    }
}

/// Feature flags controlling which stages and authenticators are assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub social_login_enabled: bool,
    pub otp_enabled: bool,
    pub authorization_enabled: bool,
}

impl FeatureFlags {
    #[must_use]
    pub const fn new(social_login: bool, otp: bool, authorization: bool) -> Self {
        Self {
            social_login_enabled: social_login,
            otp_enabled: otp,
            authorization_enabled: authorization,
        }
    }

    /// Read all flags from the store. Missing or null flags are `false`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFlag`] if a flag holds a non-boolean value.
    pub fn from_store(store: &dyn ConfigStore) -> Result<Self> {
        Ok(Self {
            social_login_enabled: read_flag(store, keys::SOCIAL_LOGIN)?,
            otp_enabled: read_flag(store, keys::OTP_LOGIN)?,
            authorization_enabled: read_flag(store, keys::AUTHORIZATION_ENABLE)?,
        })
    }
}

/// Read a boolean flag, treating a missing or null value as `false`.
///
/// # Errors
/// Returns [`Error::InvalidFlag`] for any other non-boolean value.
pub fn read_flag(store: &dyn ConfigStore, key: &str) -> Result<bool> {
    match store.read(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(enabled)) => Ok(enabled),
        Some(other) => Err(Error::InvalidFlag {
            key: key.to_string(),
            found: json_type(&other),
        }),
    }
}

/// Read an option mapping, treating a missing or null value as empty.
///
/// # Errors
/// Returns [`Error::MalformedOptions`] if the value is not a mapping.
pub fn read_options(store: &dyn ConfigStore, key: &str) -> Result<Options> {
    match store.read(key) {
        None | Some(Value::Null) => Ok(Options::new()),
        Some(Value::Object(options)) => Ok(options),
        Some(other) => Err(Error::MalformedOptions {
            entry: key.to_string(),
            found: json_type(&other),
        }),
    }
}
