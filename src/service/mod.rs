//! Service descriptors and the loader override.
//!
//! A builder either assembles a descriptor from configuration
//! ([`ServiceDescriptor::Built`]) or, when a [`ServiceLoader`] is attached,
//! hands construction over to it and returns its value untouched
//! ([`ServiceDescriptor::Deferred`]).

pub mod authentication;
pub mod authorization;

pub use self::authentication::{AuthenticationService, AuthenticationServiceBuilder};
pub use self::authorization::{AuthorizationService, AuthorizationServiceBuilder};

use crate::error::{BoxError, Error, Result};
use serde::Serialize;
use std::{fmt, sync::Arc};

/// Which service a pipeline stage obtains from the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceKind {
    Authentication,
    Authorization,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "source", content = "service", rename_all = "lowercase")]
pub enum ServiceDescriptor<B, S> {
    Built(B),
    Deferred(S),
}

impl<B, S> ServiceDescriptor<B, S> {
    #[must_use]
    pub fn built(&self) -> Option<&B> {
        match self {
            Self::Built(service) => Some(service),
            Self::Deferred(_) => None,
        }
    }

    #[must_use]
    pub fn deferred(&self) -> Option<&S> {
        match self {
            Self::Built(_) => None,
            Self::Deferred(service) => Some(service),
        }
    }

    #[must_use]
    pub fn into_deferred(self) -> Option<S> {
        match self {
            Self::Built(_) => None,
            Self::Deferred(service) => Some(service),
        }
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

type LoaderFn<Req, Res, S> = dyn Fn(&Req, &Res) -> std::result::Result<S, BoxError> + Send + Sync;

/// Caller-supplied constructor that replaces normal service assembly.
///
/// It receives the request and response exactly as given to the builder and
/// runs synchronously on the caller's thread.
pub struct ServiceLoader<Req, Res, S> {
    inner: Arc<LoaderFn<Req, Res, S>>,
}

impl<Req, Res, S> ServiceLoader<Req, Res, S> {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn(&Req, &Res) -> std::result::Result<S, BoxError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(loader),
        }
    }

    /// Run the loader.
    ///
    /// # Errors
    /// Returns [`Error::Loader`] carrying the loader's own error.
    pub fn load(&self, request: &Req, response: &Res) -> Result<S> {
        (self.inner)(request, response).map_err(Error::Loader)
    }
}

impl<Req, Res, S> Clone for ServiceLoader<Req, Res, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Req, Res, S> fmt::Debug for ServiceLoader<Req, Res, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLoader").finish_non_exhaustive()
    }
}
