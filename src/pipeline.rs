//! Middleware pipeline assembly.
//!
//! The stage order is fixed; feature flags only decide which stages are
//! present:
//!
//! | # | Stage                  | Present when              |
//! |---|------------------------|---------------------------|
//! | 1 | `SocialAuth`           | social login enabled      |
//! | 2 | `SocialEmail`          | social login enabled      |
//! | 3 | `Authentication`       | always                    |
//! | 4 | `OneTimePassword`      | one-time password enabled |
//! | 5 | `Authorization`        | authorization enabled     |
//! | 6 | `RequestAuthorization` | authorization enabled     |

use crate::config::FeatureFlags;
use crate::options::Options;
use crate::service::ServiceKind;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StageKind {
    SocialAuth,
    SocialEmail,
    Authentication,
    OneTimePassword,
    Authorization,
    RequestAuthorization,
}

impl StageKind {
    /// Every stage, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::SocialAuth,
        Self::SocialEmail,
        Self::Authentication,
        Self::OneTimePassword,
        Self::Authorization,
        Self::RequestAuthorization,
    ];

    #[must_use]
    pub const fn is_present(self, flags: &FeatureFlags) -> bool {
        match self {
            Self::SocialAuth | Self::SocialEmail => flags.social_login_enabled,
            Self::Authentication => true,
            Self::OneTimePassword => flags.otp_enabled,
            Self::Authorization | Self::RequestAuthorization => flags.authorization_enabled,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SocialAuth => "SocialAuth",
            Self::SocialEmail => "SocialEmail",
            Self::Authentication => "Authentication",
            Self::OneTimePassword => "OneTimePassword",
            Self::Authorization => "Authorization",
            Self::RequestAuthorization => "RequestAuthorization",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Construction parameters handed to the middleware executor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StageParams {
    None,
    /// The stage asks the plugin for a service on every request.
    ServiceProvider { service: ServiceKind },
    /// Authorization also receives `Auth.AuthorizationMiddleware`.
    Authorization {
        service: ServiceKind,
        options: Options,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MiddlewareStage {
    pub kind: StageKind,
    pub params: StageParams,
}

/// Ordered, present-only list of stages.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Pipeline {
    stages: Vec<MiddlewareStage>,
}

impl Pipeline {
    #[must_use]
    pub fn stages(&self) -> &[MiddlewareStage] {
        &self.stages
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|stage| stage.kind).collect()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MiddlewareStage> {
        self.stages.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn contains(&self, kind: StageKind) -> bool {
        self.stages.iter().any(|stage| stage.kind == kind)
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a MiddlewareStage;
    type IntoIter = std::slice::Iter<'a, MiddlewareStage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

/// Assemble the pipeline for `flags`, with no authorization middleware options.
#[must_use]
pub fn assemble(flags: &FeatureFlags) -> Pipeline {
    assemble_with(flags, &Options::new())
}

/// Assemble the pipeline for `flags`, passing `authorization_options` to the
/// authorization stage.
#[must_use]
pub fn assemble_with(flags: &FeatureFlags, authorization_options: &Options) -> Pipeline {
    let stages = StageKind::ALL
        .into_iter()
        .filter(|kind| kind.is_present(flags))
        .map(|kind| MiddlewareStage {
            kind,
            params: params(kind, authorization_options),
        })
        .collect::<Vec<_>>();

    debug!(
        stages = %stages.iter().map(|s| s.kind.name()).collect::<Vec<_>>().join(","),
        "pipeline assembled"
    );

    Pipeline { stages }
}

fn params(kind: StageKind, authorization_options: &Options) -> StageParams {
    match kind {
        StageKind::Authentication => StageParams::ServiceProvider {
            service: ServiceKind::Authentication,
        },
        StageKind::Authorization => StageParams::Authorization {
            service: ServiceKind::Authorization,
            options: authorization_options.clone(),
        },
        StageKind::SocialAuth
        | StageKind::SocialEmail
        | StageKind::OneTimePassword
        | StageKind::RequestAuthorization => StageParams::None,
    }
}
