//! Azure AD device-code sign-in and bearer authorization.

pub mod authorizer;
pub mod device_code;
pub mod device_flow;
pub mod error;
pub mod oauth_config;
pub mod token;

pub use authorizer::{Authorizer, BearerAuthorizer};
pub use device_code::{DeviceCode, DeviceCodePoll};
pub use device_flow::DeviceAuthenticator;
pub use error::AuthError;
pub use oauth_config::OAuthConfig;
pub use token::Token;
