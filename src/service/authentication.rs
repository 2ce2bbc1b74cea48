//! Authentication service assembly.

use super::{ServiceDescriptor, ServiceLoader};
use crate::authenticator::{AuthenticatorFactory, AuthenticatorSpec};
use crate::config::{keys, read_flag, ConfigStore};
use crate::error::Result;
use crate::identifier::{IdentifierFactory, IdentifierSpec};
use crate::kinds::KindRegistry;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Authenticators and identifiers for the external authentication runtime.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AuthenticationService {
    pub authenticators: Vec<AuthenticatorSpec>,
    pub identifiers: Vec<IdentifierSpec>,
}

impl AuthenticationService {
    #[must_use]
    pub fn authenticator(&self, name: &str) -> Option<&AuthenticatorSpec> {
        self.authenticators.iter().find(|spec| spec.name == name)
    }

    #[must_use]
    pub fn identifier(&self, name: &str) -> Option<&IdentifierSpec> {
        self.identifiers.iter().find(|spec| spec.name == name)
    }
}

pub struct AuthenticationServiceBuilder<'a, Req, Res, S = AuthenticationService> {
    store: &'a dyn ConfigStore,
    registry: &'a KindRegistry,
    loader: Option<&'a ServiceLoader<Req, Res, S>>,
}

impl<'a, Req, Res> AuthenticationServiceBuilder<'a, Req, Res> {
    #[must_use]
    pub fn new(store: &'a dyn ConfigStore, registry: &'a KindRegistry) -> Self {
        Self {
            store,
            registry,
            loader: None,
        }
    }
}

impl<'a, Req, Res, S> AuthenticationServiceBuilder<'a, Req, Res, S> {
    /// Replace normal construction with `loader`.
    #[must_use]
    pub fn with_loader<L>(
        self,
        loader: Option<&'a ServiceLoader<Req, Res, L>>,
    ) -> AuthenticationServiceBuilder<'a, Req, Res, L> {
        AuthenticationServiceBuilder {
            store: self.store,
            registry: self.registry,
            loader,
        }
    }

    /// Build the authentication service for one request.
    ///
    /// With a loader attached, nothing is read from the store and the
    /// loader's value is returned as is.
    ///
    /// # Errors
    /// Returns a configuration error for invalid flags or tables, or the
    /// loader's own error.
    #[instrument(skip_all)]
    pub fn build(
        &self,
        request: &Req,
        response: &Res,
    ) -> Result<ServiceDescriptor<AuthenticationService, S>> {
        if let Some(loader) = self.loader {
            debug!("authentication service deferred to {}", keys::AUTHENTICATION_SERVICE_LOADER);
            return loader.load(request, response).map(ServiceDescriptor::Deferred);
        }

        let otp_enabled = read_flag(self.store, keys::OTP_LOGIN)?;
        let authenticators = AuthenticatorFactory::new(self.registry)
            .build(self.store.read(keys::AUTHENTICATORS), otp_enabled)?;
        let identifiers = IdentifierFactory::new(self.registry).build(self.store.read(keys::IDENTIFIERS))?;

        info!(
            authenticators = authenticators.len(),
            identifiers = identifiers.len(),
            otp_enabled,
            "authentication service built"
        );

        Ok(ServiceDescriptor::Built(AuthenticationService {
            authenticators,
            identifiers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Snapshot;
    use crate::error::Error;
    use crate::kinds::AuthenticatorKind;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn empty_configuration_builds_empty_service() {
        let store = Snapshot::new();
        let registry = KindRegistry::new();

        let descriptor = AuthenticationServiceBuilder::new(&store, &registry).build(&(), &());

        assert!(matches!(
            descriptor,
            Ok(ServiceDescriptor::Built(ref service)) if *service == AuthenticationService::default()
        ));
    }

    #[test]
    fn otp_flag_appends_two_factor() {
        let store = Snapshot::new()
            .with(keys::AUTHENTICATORS, json!(["Authentication.Session"]))
            .with(keys::OTP_LOGIN, json!(true));
        let registry = KindRegistry::new();

        let descriptor = AuthenticationServiceBuilder::new(&store, &registry)
            .build(&(), &())
            .ok();
        let kinds: Vec<AuthenticatorKind> = descriptor
            .as_ref()
            .and_then(ServiceDescriptor::built)
            .map(|service| service.authenticators.iter().map(|a| a.kind.clone()).collect())
            .unwrap_or_default();

        assert_eq!(kinds, vec![AuthenticatorKind::Session, AuthenticatorKind::TwoFactor]);
    }

    #[test]
    fn loader_skips_configuration() {
        let store = Snapshot::new()
            .with(keys::AUTHENTICATORS, json!(42))
            .with(keys::OTP_LOGIN, json!("garbage"));
        let registry = KindRegistry::new();
        let service = Arc::new("custom service");
        let expected = Arc::clone(&service);
        let loader = ServiceLoader::new(move |_: &(), _: &()| Ok(Arc::clone(&service)));

        let descriptor = AuthenticationServiceBuilder::new(&store, &registry)
            .with_loader(Some(&loader))
            .build(&(), &());

        let loaded = descriptor.ok().and_then(ServiceDescriptor::into_deferred);
        assert!(loaded.is_some_and(|loaded| Arc::ptr_eq(&loaded, &expected)));
    }

    #[test]
    fn garbage_configuration_fails_without_loader() {
        let store = Snapshot::new().with(keys::OTP_LOGIN, json!("garbage"));
        let registry = KindRegistry::new();

        let result = AuthenticationServiceBuilder::new(&store, &registry).build(&(), &());

        assert!(matches!(result, Err(Error::InvalidFlag { .. })));
    }

    #[test]
    fn lookup_by_name() {
        let store = Snapshot::new()
            .with(keys::AUTHENTICATORS, json!({"Form": {"loginUrl": "/login"}}))
            .with(keys::IDENTIFIERS, json!(["Password"]));
        let registry = KindRegistry::new();

        let service = AuthenticationServiceBuilder::new(&store, &registry)
            .build(&(), &())
            .ok()
            .and_then(|descriptor| descriptor.built().cloned())
            .unwrap_or_default();

        assert_eq!(
            service.authenticator("Form").and_then(|a| a.options.get("loginUrl")),
            Some(&json!("/login"))
        );
        assert!(service.identifier("Password").is_some());
        assert!(service.authenticator("Session").is_none());
    }
}
