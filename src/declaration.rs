//! Parsing of declarative authenticator and identifier tables.
//!
//! A table is either a mapping (`name -> options | null`) or a list whose
//! items are bare class names (`"Authentication.JwtSubject"`) or mappings of
//! `name -> options | null`. Every form normalizes to the same ordered list
//! of [`Declaration`]s.

use crate::error::{json_type, Error, Result};
use crate::kinds::short_name;
use crate::options::Options;
use serde_json::Value;
use std::collections::HashSet;

const CLASS_NAME: &str = "className";

/// One declared entry, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    /// Entry name: the mapping key, or the short name of a bare class name.
    pub name: String,
    /// Class name used to resolve the kind: `className` if given, else the entry name.
    pub class_name: String,
    /// Explicit options with `className` removed.
    pub options: Options,
}

impl Declaration {
    fn bare(class_name: &str) -> Self {
        Self {
            name: short_name(class_name).to_string(),
            class_name: class_name.to_string(),
            options: Options::new(),
        }
    }

    fn keyed(name: &str, value: Value) -> Result<Self> {
        let mut options = match value {
            Value::Null => Options::new(),
            Value::Object(options) => options,
            other => {
                return Err(Error::MalformedOptions {
                    entry: name.to_string(),
                    found: json_type(&other),
                })
            }
        };

        let class_name = match options.remove(CLASS_NAME) {
            None | Some(Value::Null) => name.to_string(),
            Some(Value::String(class_name)) => class_name,
            Some(other) => {
                return Err(Error::UnknownKind {
                    entry: name.to_string(),
                    class_name: other.to_string(),
                })
            }
        };

        Ok(Self {
            name: name.to_string(),
            class_name,
            options,
        })
    }
}

/// Parse the table stored under `key`. A missing or null table is empty.
///
/// # Errors
/// Returns a configuration error if the table or one of its entries is
/// malformed, or if two entries share a name.
pub fn parse_table(key: &str, table: Option<Value>) -> Result<Vec<Declaration>> {
    let mut declarations = Vec::new();

    match table {
        None | Some(Value::Null) => {}
        Some(Value::Object(entries)) => {
            for (name, value) in entries {
                declarations.push(Declaration::keyed(&name, value)?);
            }
        }
        Some(Value::Array(items)) => {
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::String(class_name) => declarations.push(Declaration::bare(&class_name)),
                    Value::Object(entries) => {
                        for (name, value) in entries {
                            declarations.push(Declaration::keyed(&name, value)?);
                        }
                    }
                    other => {
                        return Err(Error::MalformedOptions {
                            entry: format!("{key}[{index}]"),
                            found: json_type(&other),
                        })
                    }
                }
            }
        }
        Some(other) => {
            return Err(Error::MalformedTable {
                key: key.to_string(),
                found: json_type(&other),
            })
        }
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = declarations.iter().find(|d| !seen.insert(d.name.as_str())) {
        return Err(Error::ConflictingDeclaration {
            entry: duplicate.name.clone(),
        });
    }

    Ok(declarations)
}
