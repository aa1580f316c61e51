pub mod interest_config;
pub mod observability_config;
pub mod recorder_config;

use serde::{Deserialize, Serialize};

use crate::errors::AuditmonResult;

pub use interest_config::InterestConfig;
pub use observability_config::ObservabilityConfig;
pub use recorder_config::RecorderConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuditmonConfig {
    pub recorder: RecorderConfig,
    pub interest: InterestConfig,
    pub observability: ObservabilityConfig,
}

impl AuditmonConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    /// Interest parameters are validated before the config is returned.
    pub fn from_toml(toml_str: &str) -> AuditmonResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.interest.validate()?;
        Ok(config)
    }
}
