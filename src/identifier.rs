//! Identifier descriptors built from `Auth.Identifiers`.

use crate::declaration::parse_table;
use crate::error::{Error, Result};
use crate::kinds::{IdentifierKind, KindRegistry};
use crate::options::{merge, Options};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdentifierSpec {
    pub name: String,
    pub kind: IdentifierKind,
    pub options: Options,
}

#[derive(Clone, Copy, Debug)]
pub struct IdentifierFactory<'a> {
    registry: &'a KindRegistry,
}

impl<'a> IdentifierFactory<'a> {
    #[must_use]
    pub fn new(registry: &'a KindRegistry) -> Self {
        Self { registry }
    }

    /// Build the ordered identifier list from the raw `table`.
    ///
    /// Bare and keyed declarations go through the same default merge.
    ///
    /// # Errors
    /// Returns a configuration error for malformed entries or unknown class names.
    pub fn build(&self, table: Option<Value>) -> Result<Vec<IdentifierSpec>> {
        parse_table(crate::config::keys::IDENTIFIERS, table)?
            .into_iter()
            .map(|declaration| {
                let kind = self
                    .registry
                    .identifier_kind(&declaration.class_name)
                    .ok_or_else(|| Error::UnknownKind {
                        entry: declaration.name.clone(),
                        class_name: declaration.class_name.clone(),
                    })?;
                let options = merge(&self.registry.identifier_defaults(&kind), &declaration.options);
                debug!(identifier = %declaration.name, kind = %kind, "identifier resolved");

                Ok(IdentifierSpec {
                    name: declaration.name,
                    kind,
                    options,
                })
            })
            .collect()
    }
}
