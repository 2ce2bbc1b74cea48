//! Configuration keys read by the plugin.

pub const SOCIAL_LOGIN: &str = "Users.Social.login";
pub const OTP_LOGIN: &str = "OneTimePasswordAuthenticator.login";
pub const AUTHORIZATION_ENABLE: &str = "Auth.Authorization.enable";

pub const AUTHENTICATORS: &str = "Auth.Authenticators";
pub const IDENTIFIERS: &str = "Auth.Identifiers";
pub const AUTHORIZATION_MIDDLEWARE: &str = "Auth.AuthorizationMiddleware";

// Loaders are attached to the plugin, not stored as JSON; the keys are kept
// for logging and error messages.
pub const AUTHENTICATION_SERVICE_LOADER: &str = "Auth.Authentication.serviceLoader";
pub const AUTHORIZATION_SERVICE_LOADER: &str = "Auth.Authorization.serviceLoader";
