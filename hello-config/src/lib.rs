//! # Hello Configuration System
//!
//! Layered configuration for the hello module host.
//!
//! ## Features
//! - **Defaults first**: every field has a default, so an empty environment is valid
//! - **Validation**: telemetry settings are checked after extraction
//! - **Environment overrides**: `HELLO_*` variables, nested with `__`
//!
//! The record count is read as-is. Its range is enforced by the activation
//! manager, not here, so an out-of-range value still reaches `activate` and is
//! refused there.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod module;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use module::ModuleConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Base configuration file, relative to the working directory.
pub const BASE_CONFIG: &str = "config/hello.yaml";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct HelloConfig {
    /// Module parameters.
    #[serde(default)]
    #[validate(nested)]
    pub module: ModuleConfig,

    /// Logging and metrics.
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl HelloConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/hello.yaml`, if present
    /// 3. `config/<HELLO_ENV>.yaml`, if present (`HELLO_ENV` defaults to `production`)
    /// 4. `HELLO_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(HelloConfig::default()));

        if Path::new(BASE_CONFIG).exists() {
            figment = figment.merge(Yaml::file(BASE_CONFIG));
        }

        let env = std::env::var("HELLO_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file, still honouring `HELLO_*` overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment =
            Figment::from(Serialized::defaults(HelloConfig::default())).merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed("HELLO_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn default_config_validates() {
        let config = HelloConfig::default();
        config.validate().expect("Default config should validate");
        assert_eq!(config.module.count, 1);
        assert_eq!(config.module.capacity, None);
    }

    #[test]
    fn defaults_without_any_file() {
        Jail::expect_with(|_jail| {
            let config = HelloConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.module.count, 1);
            assert_eq!(config.telemetry.level, "info");
            assert_eq!(config.telemetry.format, LogFormat::Pretty);
            Ok(())
        });
    }

    #[test]
    fn file_then_environment_override() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/hello.yaml",
                "module:\n  count: 4\ntelemetry:\n  format: json\n",
            )?;
            jail.set_env("HELLO_MODULE__COUNT", "7");

            let config = HelloConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.module.count, 7);
            assert_eq!(config.telemetry.format, LogFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn environment_specific_file() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/hello.yaml", "module:\n  count: 2\n")?;
            jail.create_file("config/staging.yaml", "module:\n  capacity: 3\n")?;
            jail.set_env("HELLO_ENV", "staging");

            let config = HelloConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.module.count, 2);
            assert_eq!(config.module.capacity, Some(3));
            Ok(())
        });
    }

    #[test]
    fn out_of_range_count_is_not_rejected_here() {
        Jail::expect_with(|jail| {
            jail.create_file("hello.yaml", "module:\n  count: 42\n")?;
            let config = HelloConfig::load_from_path("hello.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.module.count, 42);
            Ok(())
        });
    }

    #[test]
    fn invalid_level_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("hello.yaml", "telemetry:\n  level: chatty\n")?;
            let err = HelloConfig::load_from_path("hello.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("level"));
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_reported() {
        let err = HelloConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn defaults_serialize_to_yaml() {
        let yaml = serde_yaml::to_string(&HelloConfig::default()).unwrap();
        assert!(yaml.contains("count: 1"));
        assert!(yaml.contains("format: pretty"));
    }
}
