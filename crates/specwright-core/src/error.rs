use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecwrightError {
    #[error("not initialized: no specwright/ directory in {0} (run 'specwright init')")]
    NotInitialized(PathBuf),

    #[error("invalid profile '{0}': expected 'core' or 'custom'")]
    InvalidProfile(String),

    #[error("invalid delivery '{0}': expected 'skills', 'commands' or 'both'")]
    InvalidDelivery(String),

    #[error("unknown workflow: {0}")]
    UnknownWorkflow(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool '{0}' has no artifact directory and cannot receive skills or commands")]
    UnsupportedTool(String),

    #[error("unknown config key '{0}': expected profile, delivery or workflows")]
    UnknownConfigKey(String),

    #[error("{}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        source: Box<SpecwrightError>,
    },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SpecwrightError>;
