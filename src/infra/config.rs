use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::domain::entities::schema::{default_columns, default_date_formats, ColumnSpec, Schema};
use crate::error::ConfigError;
use crate::platform::desktop::data_dir::project_dirs;

pub const CONFIG_FILE_NAME: &str = "emd.toml";
pub const CONFIG_PATH_ENV: &str = "EMD_CONFIG";
const ENV_PREFIX: &str = "EMD";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub schema: SchemaConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub columns: Vec<ColumnSpec>,
    pub date_formats: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            date_formats: default_date_formats(),
        }
    }
}

impl SchemaConfig {
    pub fn validate(&self) -> Result<Schema, ConfigError> {
        Schema::new(self.columns.clone(), self.date_formats.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub include_extra_columns: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_extra_columns: true,
        }
    }
}

/// Where the config file is looked up. An explicit `EMD_CONFIG` path must
/// exist; the platform default may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub required: bool,
}

pub fn config_location() -> Option<ConfigLocation> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|path| !path.is_empty()) {
        return Some(ConfigLocation {
            path: PathBuf::from(path),
            required: true,
        });
    }
    project_dirs().ok().map(|dirs| ConfigLocation {
        path: dirs.config_dir().join(CONFIG_FILE_NAME),
        required: false,
    })
}

/// Defaults, then the config file, then `EMD_*` variables
/// (`EMD_LOGGING__LEVEL=debug`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let location = config_location();
    let file = location.as_ref().map(|location| (location.path.as_path(), location.required));
    load_config_from(file, None)
}

/// `env` replaces the process environment when given.
pub fn load_config_from(
    file: Option<(&Path, bool)>,
    env: Option<config::Map<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some((path, required)) = file {
        builder = builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(required),
        );
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    let config = builder.build()?.try_deserialize::<AppConfig>()?;
    config.schema.validate()?;
    Ok(config)
}
