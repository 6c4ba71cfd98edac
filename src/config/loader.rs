//! Configuration Loader
//!
//! Layered loading of [`EnvironmentConfig`]:
//!
//! 1. the base file (`behave.yaml`, TOML and JSON work too)
//! 2. an optional environment override next to it (`behave.test.yaml`);
//!    a list it sets replaces the base file's list
//! 3. `BEHAVE__PARAMETERS__<NAME>` environment variables overriding single
//!    parameter values (`BEHAVE__PARAMETERS__BASE_URL=http://ci:8080`)
//!
//! Later layers win. Environment values are parsed, so `30` arrives as a
//! number and `true` as a boolean. Parameter names from the environment
//! match configured names case-insensitively. The merged result is validated
//! before it is returned.

use super::EnvironmentConfig;
use crate::error::{EnvironmentError, EnvironmentResult};
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the base configuration file
pub const CONFIG_PATH_VAR: &str = "BEHAVE_CONFIG_PATH";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "BEHAVE";

/// Values settable from `BEHAVE__*` variables
#[derive(Debug, Default, Deserialize)]
struct EnvironmentOverrides {
    #[serde(default)]
    parameters: BTreeMap<String, Value>,
}

/// Stateless loader for [`EnvironmentConfig`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// `BEHAVE_ENV`, then `APP_ENV`, defaulting to `development`
    pub fn detect_environment() -> String {
        crate::logging::get_environment()
    }

    /// Load from the file named by `BEHAVE_CONFIG_PATH`, or from environment
    /// variables alone when it is unset
    pub fn load_from_env() -> EnvironmentResult<EnvironmentConfig> {
        match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load_from_path(path),
            Err(_) => {
                debug!("{CONFIG_PATH_VAR} not set, loading configuration from environment only");
                let mut config = EnvironmentConfig::default();
                Self::apply_environment_overrides(&mut config)?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load with environment auto-detection
    pub fn load_from_path(path: impl AsRef<Path>) -> EnvironmentResult<EnvironmentConfig> {
        let environment = Self::detect_environment();
        Self::load_from_path_with_env(path, &environment)
    }

    /// Load with an explicit environment name instead of `BEHAVE_ENV`
    pub fn load_from_path_with_env(
        path: impl AsRef<Path>,
        environment: &str,
    ) -> EnvironmentResult<EnvironmentConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EnvironmentError::configuration(
                "ConfigLoader",
                format!("configuration file not found: {}", path.display()),
            ));
        }

        let mut builder = Config::builder().add_source(File::from(path.to_path_buf()));

        if let Some(override_path) = Self::environment_override_path(path, environment) {
            if override_path.is_file() {
                debug!(
                    environment,
                    path = %override_path.display(),
                    "Applying environment configuration override"
                );
                builder = builder.add_source(File::from(override_path));
            }
        }

        let mut config = builder.build()?.try_deserialize::<EnvironmentConfig>()?;
        Self::apply_environment_overrides(&mut config)?;
        config.validate()?;

        debug!(
            environment,
            path = %path.display(),
            class_aliases = config.class_aliases.len(),
            class_namespaces = config.class_namespaces.len(),
            parameters = config.parameters.len(),
            context_arguments = config.context_arguments.len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// `dir/behave.yaml` + `test` -> `dir/behave.test.yaml`
    fn environment_override_path(path: &Path, environment: &str) -> Option<PathBuf> {
        let stem = path.file_stem()?.to_str()?;
        let file_name = match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => format!("{stem}.{environment}.{extension}"),
            None => format!("{stem}.{environment}"),
        };
        Some(path.with_file_name(file_name))
    }

    fn apply_environment_overrides(config: &mut EnvironmentConfig) -> EnvironmentResult<()> {
        let overrides = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<EnvironmentOverrides>()?;

        for (name, value) in overrides.parameters {
            debug!(parameter = %name, "Overriding parameter from environment");
            config.override_parameter(&name, value);
        }
        Ok(())
    }
}
