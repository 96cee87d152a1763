use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML that does not deserialize into [`crate::types::ReleaseConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
