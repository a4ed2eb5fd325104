use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileClassifierConfig {
    pub polarity_threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileChargeConfig {
    pub iterations: Option<usize>,
    pub params_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConformerConfig {
    pub seed: Option<u64>,
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDescriptorConfig {
    pub enabled: Option<bool>,
}

/// The optional TOML configuration file; every key may be omitted.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub classifier: Option<FileClassifierConfig>,
    pub charges: Option<FileChargeConfig>,
    pub conformer: Option<FileConformerConfig>,
    pub descriptors: Option<FileDescriptorConfig>,
}

impl FileConfig {
    /// Reads a config file. A relative `charges.params-path` is resolved against the
    /// directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(params_path) = config.charges.as_mut().and_then(|c| c.params_path.as_mut()) {
            if params_path.is_relative() {
                if let Some(dir) = path.parent() {
                    *params_path = dir.join(&*params_path);
                }
            }
        }
        Ok(config)
    }
}
