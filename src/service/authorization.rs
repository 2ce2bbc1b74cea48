//! Authorization service assembly.

use super::{ServiceDescriptor, ServiceLoader};
use crate::config::keys;
use crate::error::Result;
use serde::Serialize;
use tracing::{debug, instrument};

/// Policy resolution is external; the built service carries an empty
/// resolver collection for the authorization runtime to fill.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizationService {
    pub resolvers: Vec<String>,
}

pub struct AuthorizationServiceBuilder<'a, Req, Res, S = AuthorizationService> {
    loader: Option<&'a ServiceLoader<Req, Res, S>>,
}

impl<Req, Res> AuthorizationServiceBuilder<'_, Req, Res> {
    #[must_use]
    pub fn new() -> Self {
        Self { loader: None }
    }
}

impl<Req, Res> Default for AuthorizationServiceBuilder<'_, Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, Req, Res, S> AuthorizationServiceBuilder<'a, Req, Res, S> {
    #[must_use]
    pub fn with_loader<L>(
        self,
        loader: Option<&'a ServiceLoader<Req, Res, L>>,
    ) -> AuthorizationServiceBuilder<'a, Req, Res, L> {
        AuthorizationServiceBuilder { loader }
    }

    /// Build the authorization service for one request.
    ///
    /// # Errors
    /// Returns the loader's own error when a loader is attached.
    #[instrument(skip_all)]
    pub fn build(
        &self,
        request: &Req,
        response: &Res,
    ) -> Result<ServiceDescriptor<AuthorizationService, S>> {
        if let Some(loader) = self.loader {
            debug!("authorization service deferred to {}", keys::AUTHORIZATION_SERVICE_LOADER);
            return loader.load(request, response).map(ServiceDescriptor::Deferred);
        }

        debug!("authorization service built with an empty resolver collection");
        Ok(ServiceDescriptor::Built(AuthorizationService::default()))
    }
}
