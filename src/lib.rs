//! # authwire
//!
//! `authwire` wires authentication, two-factor verification, social login and
//! authorization middleware into one ordered request-processing pipeline, and
//! assembles the authentication and authorization services those stages use.
//!
//! Everything here produces descriptors: credential checking, sessions, user
//! lookup and OAuth flows belong to the host framework, which turns the
//! descriptors into live middleware and services.
//!
//! ## Pipeline
//!
//! Stage order is fixed; the feature flags `Users.Social.login`,
//! `OneTimePasswordAuthenticator.login` and `Auth.Authorization.enable`
//! only decide which stages are present. See [`pipeline`].
//!
//! ## Services
//!
//! `Auth.Authenticators` and `Auth.Identifiers` are declarative tables whose
//! entries are resolved to a kind, merged over that kind's defaults and kept
//! in declaration order. A [`ServiceLoader`] attached to the [`Plugin`]
//! replaces this assembly entirely and its value is returned untouched.
//!
//! ```
//! use authwire::{config::Snapshot, Plugin, StageKind};
//! use serde_json::json;
//!
//! let plugin: Plugin = Plugin::new(
//!     Snapshot::new()
//!         .with("OneTimePasswordAuthenticator.login", json!(true))
//!         .with("Auth.Authenticators", json!(["Authentication.Session"])),
//! );
//!
//! let pipeline = plugin.middleware()?;
//! assert_eq!(pipeline.kinds(), vec![StageKind::Authentication, StageKind::OneTimePassword]);
//!
//! let service = plugin.authentication_service(&(), &())?;
//! assert_eq!(service.built().map(|s| s.authenticators.len()), Some(2));
//! # Ok::<(), authwire::Error>(())
//! ```

pub mod authenticator;
pub mod cli;
pub mod config;
pub mod declaration;
pub mod error;
pub mod identifier;
pub mod kinds;
pub mod options;
pub mod pipeline;
pub mod plugin;
pub mod service;

pub use self::config::{ConfigStore, FeatureFlags, Snapshot};
pub use self::error::{BoxError, Error, Result};
pub use self::pipeline::{assemble, MiddlewareStage, Pipeline, StageKind, StageParams};
pub use self::plugin::Plugin;
pub use self::service::{ServiceDescriptor, ServiceKind, ServiceLoader};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
