//! Plugin entry point tying configuration, pipeline and services together.

use crate::config::{keys, read_options, ConfigStore, FeatureFlags};
use crate::error::Result;
use crate::kinds::KindRegistry;
use crate::options::Options;
use crate::pipeline::{assemble_with, Pipeline};
use crate::service::{
    AuthenticationService, AuthenticationServiceBuilder, AuthorizationService,
    AuthorizationServiceBuilder, ServiceDescriptor, ServiceLoader,
};
use std::{fmt, sync::Arc};
use tracing::{info, instrument};

/// Service provider for the authentication and authorization stages.
///
/// `Req` and `Res` are the host framework's request and response types;
/// they are only passed through to loaders. `A` and `Z` are the values the
/// authentication and authorization loaders produce.
pub struct Plugin<Req = (), Res = (), A = AuthenticationService, Z = AuthorizationService> {
    store: Arc<dyn ConfigStore>,
    registry: KindRegistry,
    authentication_loader: Option<ServiceLoader<Req, Res, A>>,
    authorization_loader: Option<ServiceLoader<Req, Res, Z>>,
}

impl<Req, Res> Plugin<Req, Res> {
    #[must_use]
    pub fn new<C: ConfigStore + 'static>(store: C) -> Self {
        Self::from_shared(Arc::new(store))
    }

    #[must_use]
    pub fn from_shared(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            registry: KindRegistry::new(),
            authentication_loader: None,
            authorization_loader: None,
        }
    }
}

impl<Req, Res, A, Z> Plugin<Req, Res, A, Z> {
    #[must_use]
    pub fn with_registry(mut self, registry: KindRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Hand authentication service construction over to `loader`.
    #[must_use]
    pub fn with_authentication_loader<L>(
        self,
        loader: ServiceLoader<Req, Res, L>,
    ) -> Plugin<Req, Res, L, Z> {
        Plugin {
            store: self.store,
            registry: self.registry,
            authentication_loader: Some(loader),
            authorization_loader: self.authorization_loader,
        }
    }

    /// Hand authorization service construction over to `loader`.
    #[must_use]
    pub fn with_authorization_loader<L>(
        self,
        loader: ServiceLoader<Req, Res, L>,
    ) -> Plugin<Req, Res, A, L> {
        Plugin {
            store: self.store,
            registry: self.registry,
            authentication_loader: self.authentication_loader,
            authorization_loader: Some(loader),
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// # Errors
    /// Returns [`crate::Error::InvalidFlag`] if a flag is not a boolean.
    pub fn feature_flags(&self) -> Result<FeatureFlags> {
        FeatureFlags::from_store(self.store())
    }

    /// Assemble the middleware pipeline from the current flags.
    ///
    /// # Errors
    /// Returns a configuration error for invalid flags or a malformed
    /// `Auth.AuthorizationMiddleware` mapping.
    #[instrument(skip_all)]
    pub fn middleware(&self) -> Result<Pipeline> {
        let flags = self.feature_flags()?;
        let authorization_options = if flags.authorization_enabled {
            read_options(self.store(), keys::AUTHORIZATION_MIDDLEWARE)?
        } else {
            Options::new()
        };

        let pipeline = assemble_with(&flags, &authorization_options);
        info!(stages = pipeline.len(), "middleware pipeline assembled");

        Ok(pipeline)
    }

    /// Build the authentication service for one request.
    ///
    /// # Errors
    /// See [`AuthenticationServiceBuilder::build`].
    pub fn authentication_service(
        &self,
        request: &Req,
        response: &Res,
    ) -> Result<ServiceDescriptor<AuthenticationService, A>> {
        AuthenticationServiceBuilder::new(self.store(), &self.registry)
            .with_loader(self.authentication_loader.as_ref())
            .build(request, response)
    }

    /// Build the authorization service for one request.
    ///
    /// # Errors
    /// See [`AuthorizationServiceBuilder::build`].
    pub fn authorization_service(
        &self,
        request: &Req,
        response: &Res,
    ) -> Result<ServiceDescriptor<AuthorizationService, Z>> {
        AuthorizationServiceBuilder::new()
            .with_loader(self.authorization_loader.as_ref())
            .build(request, response)
    }
}

impl<Req, Res, A, Z> fmt::Debug for Plugin<Req, Res, A, Z> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("registry", &self.registry)
            .field("authentication_loader", &self.authentication_loader.is_some())
            .field("authorization_loader", &self.authorization_loader.is_some())
            .finish_non_exhaustive()
    }
}
