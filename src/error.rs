use std::path::PathBuf;
use std::process::ExitCode;

/// Errors that cause cookbot to exit with a specific code.
#[derive(Debug, thiserror::Error)]
pub enum ExitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Other(String),
}

impl ExitError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ExitError::Config(_) => ExitCode::from(2),
            ExitError::Catalog(_) => ExitCode::from(3),
            ExitError::Other(_) => ExitCode::from(1),
        }
    }
}

/// Failures while reading, fetching, or persisting the recipe catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed recipe list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fetching {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}
