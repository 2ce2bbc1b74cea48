//! Authenticator and identifier kinds, class-name resolution and defaults.
//!
//! Class names follow `[Namespace.]Name`, where the namespace may contain
//! `/` (`Authentication.Session`, `CakeDC/Auth.Form`, `Form`). Built-in
//! kinds are resolved by their short name; custom kinds must be registered
//! in a [`KindRegistry`] together with their defaults.

use crate::options::Options;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

/// Default resolver injected into identifiers that look up users.
pub const DEFAULT_RESOLVER: &str = "Orm";

/// Default URL checker of the two-factor authenticator.
pub const DEFAULT_URL_CHECKER: &str = "Default";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AuthenticatorKind {
    Session,
    Form,
    Token,
    TwoFactor,
    Custom(String),
}

impl AuthenticatorKind {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Session => "Session",
            Self::Form => "Form",
            Self::Token => "Token",
            Self::TwoFactor => "TwoFactor",
            Self::Custom(name) => name,
        }
    }

    fn builtin(short_name: &str) -> Option<Self> {
        match short_name {
            "Session" => Some(Self::Session),
            "Form" => Some(Self::Form),
            "Token" => Some(Self::Token),
            "TwoFactor" => Some(Self::TwoFactor),
            _ => None,
        }
    }

    fn builtin_defaults(&self) -> Option<Options> {
        let defaults = match self {
            Self::Session => json!({
                "fields": {"username": "username"},
                "sessionKey": "Auth",
                "identify": false,
                "identityAttribute": "identity",
            }),
            Self::Form => json!({
                "loginUrl": null,
                "fields": {"username": "username", "password": "password"},
                "keyCheckEnabledRecaptcha": "Users.reCaptcha.login",
            }),
            Self::Token => json!({
                "header": null,
                "queryParam": null,
                "tokenPrefix": null,
            }),
            Self::TwoFactor => json!({
                "loginUrl": null,
                "urlChecker": DEFAULT_URL_CHECKER,
                "skipTwoFactorVerify": true,
            }),
            Self::Custom(_) => return None,
        };
        Some(into_options(defaults))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Password,
    Token,
    JwtSubject,
    Custom(String),
}

impl IdentifierKind {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Password => "Password",
            Self::Token => "Token",
            Self::JwtSubject => "JwtSubject",
            Self::Custom(name) => name,
        }
    }

    fn builtin(short_name: &str) -> Option<Self> {
        match short_name {
            "Password" => Some(Self::Password),
            "Token" => Some(Self::Token),
            "JwtSubject" => Some(Self::JwtSubject),
            _ => None,
        }
    }

    fn builtin_defaults(&self) -> Option<Options> {
        let defaults = match self {
            Self::Password => json!({
                "resolver": DEFAULT_RESOLVER,
                "passwordHasher": null,
            }),
            Self::Token => json!({
                "dataField": "token",
                "resolver": DEFAULT_RESOLVER,
            }),
            // JWT subjects are tokens too and share the token resolver.
            Self::JwtSubject => json!({
                "tokenField": "id",
                "dataField": "sub",
                "resolver": DEFAULT_RESOLVER,
            }),
            Self::Custom(_) => return None,
        };
        Some(into_options(defaults))
    }
}

macro_rules! kind_display_serialize {
    ($($kind:ty),*) => {$(
        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $kind {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    )*};
}

kind_display_serialize!(AuthenticatorKind, IdentifierKind);

/// Short name of a class name: the part after the last `.`.
#[must_use]
pub fn short_name(class_name: &str) -> &str {
    class_name
        .rsplit_once('.')
        .map_or(class_name, |(_, name)| name)
}

#[derive(Clone, Debug)]
struct CustomKind {
    name: String,
    class_name: Option<String>,
    defaults: Options,
}

impl CustomKind {
    /// A kind registered with a full class name only answers to that name
    /// or its bare kind name; any namespace is accepted otherwise.
    fn matches_class(&self, class_name: &str, short: &str) -> bool {
        match self.class_name.as_deref() {
            Some(full) => full == class_name || self.name == class_name,
            None => self.name == short,
        }
    }
}

/// Kind resolution table: the built-in kinds plus registered custom ones.
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    authenticators: Vec<CustomKind>,
    identifiers: Vec<CustomKind>,
}

impl KindRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom authenticator kind.
    ///
    /// `class_name` is an optional fully qualified alias (`App.Ldap`); the
    /// short `name` always resolves. A later registration with the same name
    /// replaces the earlier one.
    #[must_use]
    pub fn with_authenticator(
        mut self,
        name: impl Into<String>,
        class_name: Option<&str>,
        defaults: Options,
    ) -> Self {
        register(&mut self.authenticators, name.into(), class_name, defaults);
        self
    }

    /// Register a custom identifier kind. See [`KindRegistry::with_authenticator`].
    #[must_use]
    pub fn with_identifier(
        mut self,
        name: impl Into<String>,
        class_name: Option<&str>,
        defaults: Options,
    ) -> Self {
        register(&mut self.identifiers, name.into(), class_name, defaults);
        self
    }

    /// Resolve an authenticator class name, or `None` if it is unknown.
    #[must_use]
    pub fn authenticator_kind(&self, class_name: &str) -> Option<AuthenticatorKind> {
        resolve(
            &self.authenticators,
            class_name,
            AuthenticatorKind::builtin,
            AuthenticatorKind::Custom,
        )
    }

    /// Resolve an identifier class name, or `None` if it is unknown.
    #[must_use]
    pub fn identifier_kind(&self, class_name: &str) -> Option<IdentifierKind> {
        resolve(
            &self.identifiers,
            class_name,
            IdentifierKind::builtin,
            IdentifierKind::Custom,
        )
    }

    #[must_use]
    pub fn authenticator_defaults(&self, kind: &AuthenticatorKind) -> Options {
        kind.builtin_defaults()
            .unwrap_or_else(|| custom_defaults(&self.authenticators, kind.name()))
    }

    #[must_use]
    pub fn identifier_defaults(&self, kind: &IdentifierKind) -> Options {
        kind.builtin_defaults()
            .unwrap_or_else(|| custom_defaults(&self.identifiers, kind.name()))
    }
}

fn register(kinds: &mut Vec<CustomKind>, name: String, class_name: Option<&str>, defaults: Options) {
    kinds.retain(|kind| kind.name != name);
    kinds.push(CustomKind {
        name,
        class_name: class_name.map(ToString::to_string),
        defaults,
    });
}

fn resolve<K>(
    custom: &[CustomKind],
    class_name: &str,
    builtin: fn(&str) -> Option<K>,
    wrap: fn(String) -> K,
) -> Option<K> {
    if let Some(kind) = custom.iter().find(|kind| kind.class_name.as_deref() == Some(class_name)) {
        return Some(wrap(kind.name.clone()));
    }

    let short = short_name(class_name);
    if let Some(kind) = builtin(short) {
        return Some(kind);
    }

    custom
        .iter()
        .find(|kind| kind.matches_class(class_name, short))
        .map(|kind| wrap(kind.name.clone()))
}

fn custom_defaults(kinds: &[CustomKind], name: &str) -> Options {
    kinds
        .iter()
        .find(|kind| kind.name == name)
        .map(|kind| kind.defaults.clone())
        .unwrap_or_default()
}

fn into_options(value: Value) -> Options {
    match value {
        Value::Object(options) => options,
        _ => Options::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_name("Authentication.Session"), "Session");
        assert_eq!(short_name("CakeDC/Auth.Form"), "Form");
        assert_eq!(short_name("Token"), "Token");
        assert_eq!(short_name("Broken."), "");
    }

    #[test]
    fn builtin_authenticators_resolve_by_short_name() {
        let registry = KindRegistry::new();

        assert_eq!(
            registry.authenticator_kind("Authentication.Session"),
            Some(AuthenticatorKind::Session)
        );
        assert_eq!(registry.authenticator_kind("CakeDC/Auth.Form"), Some(AuthenticatorKind::Form));
        assert_eq!(
            registry.authenticator_kind("CakeDC/Auth.TwoFactor"),
            Some(AuthenticatorKind::TwoFactor)
        );
        assert_eq!(registry.authenticator_kind("Nonexistent.Thing"), None);
    }

    #[test]
    fn builtin_identifiers_resolve_by_short_name() {
        let registry = KindRegistry::new();

        assert_eq!(registry.identifier_kind("Authentication.Password"), Some(IdentifierKind::Password));
        assert_eq!(registry.identifier_kind("Token"), Some(IdentifierKind::Token));
        assert_eq!(
            registry.identifier_kind("Authentication.JwtSubject"),
            Some(IdentifierKind::JwtSubject)
        );
        assert_eq!(registry.identifier_kind("Authentication.Session"), None);
    }

    #[test]
    fn custom_kinds_need_registration() {
        let defaults = into_options(json!({"host": "ldap://localhost"}));
        let registry = KindRegistry::new().with_authenticator("Ldap", Some("App.Ldap"), defaults.clone());

        assert_eq!(
            registry.authenticator_kind("App.Ldap"),
            Some(AuthenticatorKind::Custom("Ldap".to_string()))
        );
        assert_eq!(
            registry.authenticator_kind("Ldap"),
            Some(AuthenticatorKind::Custom("Ldap".to_string()))
        );
        assert_eq!(registry.authenticator_kind("Other.Ldap"), None);
        assert_eq!(
            registry.authenticator_defaults(&AuthenticatorKind::Custom("Ldap".to_string())),
            defaults
        );
        assert_eq!(registry.identifier_kind("App.Ldap"), None);
    }

    #[test]
    fn custom_full_class_name_wins_over_builtin() {
        let registry =
            KindRegistry::new().with_identifier("ApiToken", Some("App.Token"), Options::new());

        assert_eq!(
            registry.identifier_kind("App.Token"),
            Some(IdentifierKind::Custom("ApiToken".to_string()))
        );
        assert_eq!(registry.identifier_kind("Authentication.Token"), Some(IdentifierKind::Token));
    }

    #[test]
    fn custom_kind_without_class_name_accepts_any_namespace() {
        let registry = KindRegistry::new().with_identifier("Ldap", None, Options::new());

        assert_eq!(
            registry.identifier_kind("Vendor/Directory.Ldap"),
            Some(IdentifierKind::Custom("Ldap".to_string()))
        );
        assert_eq!(
            registry.identifier_kind("Ldap"),
            Some(IdentifierKind::Custom("Ldap".to_string()))
        );
    }

    #[test]
    fn reregistering_replaces_defaults() {
        let registry = KindRegistry::new()
            .with_identifier("Ldap", None, into_options(json!({"a": 1})))
            .with_identifier("Ldap", None, into_options(json!({"b": 2})));

        assert_eq!(
            registry.identifier_defaults(&IdentifierKind::Custom("Ldap".to_string())),
            into_options(json!({"b": 2}))
        );
    }

    #[test]
    fn identifier_defaults() {
        let registry = KindRegistry::new();

        assert_eq!(
            Value::Object(registry.identifier_defaults(&IdentifierKind::Password)),
            json!({"resolver": "Orm", "passwordHasher": null})
        );
        assert_eq!(
            Value::Object(registry.identifier_defaults(&IdentifierKind::Token)),
            json!({"dataField": "token", "resolver": "Orm"})
        );
        assert_eq!(
            Value::Object(registry.identifier_defaults(&IdentifierKind::JwtSubject)),
            json!({"tokenField": "id", "dataField": "sub", "resolver": "Orm"})
        );
    }

    #[test]
    fn two_factor_defaults() {
        let registry = KindRegistry::new();

        assert_eq!(
            Value::Object(registry.authenticator_defaults(&AuthenticatorKind::TwoFactor)),
            json!({"loginUrl": null, "urlChecker": "Default", "skipTwoFactorVerify": true})
        );
    }

    #[test]
    fn kinds_serialize_as_names() {
        assert_eq!(serde_json::to_value(AuthenticatorKind::TwoFactor).ok(), Some(json!("TwoFactor")));
        assert_eq!(
            serde_json::to_value(IdentifierKind::Custom("Ldap".to_string())).ok(),
            Some(json!("Ldap"))
        );
        assert_eq!(AuthenticatorKind::Form.to_string(), "Form");
    }
}
