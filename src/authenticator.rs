//! Authenticator descriptors built from `Auth.Authenticators`.

use crate::declaration::{parse_table, Declaration};
use crate::error::{Error, Result};
use crate::kinds::{AuthenticatorKind, KindRegistry};
use crate::options::{merge, Options};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Data-only blueprint of one authenticator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthenticatorSpec {
    pub name: String,
    pub kind: AuthenticatorKind,
    pub options: Options,
    /// Position in the authentication service, starting at 0.
    pub order: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct AuthenticatorFactory<'a> {
    registry: &'a KindRegistry,
}

impl<'a> AuthenticatorFactory<'a> {
    #[must_use]
    pub fn new(registry: &'a KindRegistry) -> Self {
        Self { registry }
    }

    /// Build the ordered authenticator list from the raw `table`.
    ///
    /// Entries keep their declaration order. When `otp_enabled` is set a
    /// two-factor authenticator is appended last and an explicit two-factor
    /// entry in the table only contributes its options to that one. Without
    /// one-time passwords an explicit two-factor entry stays where it was
    /// declared.
    ///
    /// # Errors
    /// Returns a configuration error for malformed entries, unknown class
    /// names, or more than one explicit two-factor entry.
    pub fn build(&self, table: Option<Value>, otp_enabled: bool) -> Result<Vec<AuthenticatorSpec>> {
        let declarations = parse_table(crate::config::keys::AUTHENTICATORS, table)?;

        let mut specs = Vec::with_capacity(declarations.len() + 1);
        let mut two_factor: Option<Declaration> = None;
        let mut two_factor_declared = false;

        for declaration in declarations {
            let kind = self.resolve(&declaration)?;

            if kind == AuthenticatorKind::TwoFactor {
                if two_factor_declared {
                    return Err(Error::ConflictingDeclaration {
                        entry: declaration.name,
                    });
                }
                two_factor_declared = true;

                if otp_enabled {
                    debug!(authenticator = %declaration.name, "two-factor entry moved last");
                    two_factor = Some(declaration);
                    continue;
                }
            }

            specs.push(self.spec(declaration.name, kind, &declaration.options, specs.len()));
        }

        if otp_enabled {
            let (name, explicit) = two_factor.map_or_else(
                || (AuthenticatorKind::TwoFactor.name().to_string(), Options::new()),
                |d| (d.name, d.options),
            );
            specs.push(self.spec(name, AuthenticatorKind::TwoFactor, &explicit, specs.len()));
        }

        Ok(specs)
    }

    fn resolve(&self, declaration: &Declaration) -> Result<AuthenticatorKind> {
        self.registry
            .authenticator_kind(&declaration.class_name)
            .ok_or_else(|| Error::UnknownKind {
                entry: declaration.name.clone(),
                class_name: declaration.class_name.clone(),
            })
    }

    fn spec(
        &self,
        name: String,
        kind: AuthenticatorKind,
        explicit: &Options,
        order: usize,
    ) -> AuthenticatorSpec {
        let options = merge(&self.registry.authenticator_defaults(&kind), explicit);
        debug!(authenticator = %name, kind = %kind, order, "authenticator resolved");

        AuthenticatorSpec {
            name,
            kind,
            options,
            order,
        }
    }
}
