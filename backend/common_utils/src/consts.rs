//! Commonly used constants

/// Error code surfaced when the processor response carries none.
pub const NO_ERROR_CODE: &str = "No error code";
/// Error message surfaced when the processor response carries none.
pub const NO_ERROR_MESSAGE: &str = "No error message";
/// Error message used when a response body could not be parsed into the
/// processor's documented shape.
pub const UNSUPPORTED_ERROR_MESSAGE: &str = "Unsupported response type";

/// Max length for merchant reference ids
pub const MAX_ALLOWED_MERCHANT_REFERENCE_ID_LENGTH: u8 = 64;
/// Minimum required length for merchant reference ids
pub const MIN_REQUIRED_MERCHANT_REFERENCE_ID_LENGTH: u8 = 1;

/// Prefix for environment variable based configuration overrides
pub const ENV_PREFIX: &str = "GATEWAY";

/// Environment the service is running in, selected through the `RUN_ENV`
/// environment variable.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Env {
    /// Local development
    #[default]
    Development,
    /// Processor sandbox testing
    Sandbox,
    /// Live traffic
    Production,
}

impl Env {
    /// Environment the binary was launched in.
    pub fn current_env() -> Self {
        std::env::var("RUN_ENV")
            .ok()
            .and_then(|env| env.parse().ok())
            .unwrap_or_default()
    }

    /// Name of the configuration file for this environment.
    pub fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
