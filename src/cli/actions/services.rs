use crate::{
    service::{AuthenticationService, AuthorizationService},
    Plugin, ServiceDescriptor,
};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub authentication: ServiceDescriptor<AuthenticationService, AuthenticationService>,
    pub authorization: ServiceDescriptor<AuthorizationService, AuthorizationService>,
}

/// Build both services the way the pipeline stages would for a request.
/// # Errors
/// Returns an error if the authenticator or identifier tables are invalid.
pub fn handle(plugin: &Plugin) -> Result<Report> {
    let authentication = plugin
        .authentication_service(&(), &())
        .context("Failed to build authentication service")?;
    let authorization = plugin
        .authorization_service(&(), &())
        .context("Failed to build authorization service")?;

    Ok(Report {
        authentication,
        authorization,
    })
}
