use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::CatalogError;
use crate::recipe::parse_recipes;
use crate::store::RecipeStore;

/// Upper bound on a fetched catalog body.
const MAX_CATALOG_BYTES: u64 = 64 * 1024 * 1024;

/// Somewhere a replacement catalog can be fetched from.
pub trait CatalogSource: Send + Sync {
    /// Where the catalog comes from, for logging.
    fn describe(&self) -> &str;

    /// Fetch the raw catalog body.
    fn fetch(&self) -> Result<Vec<u8>, CatalogError>;
}

/// Fetches the catalog with a blocking HTTP GET.
pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    /// The timeout bounds the whole request, body included.
    pub fn new(url: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            url: url.to_string(),
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl CatalogSource for HttpSource {
    fn describe(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => CatalogError::Status {
                url: self.url.clone(),
                status,
            },
            other => CatalogError::Fetch {
                url: self.url.clone(),
                message: other.to_string(),
            },
        })?;
        let mut body = response.into_body();
        body.with_config()
            .limit(MAX_CATALOG_BYTES)
            .read_to_vec()
            .map_err(|e| CatalogError::Fetch {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }
}

/// Populates the store from the local file and refreshes it from a
/// [`CatalogSource`].
pub struct CatalogLoader {
    path: PathBuf,
    source: Box<dyn CatalogSource>,
    store: Arc<RecipeStore>,
}

impl CatalogLoader {
    pub fn new(path: PathBuf, source: Box<dyn CatalogSource>, store: Arc<RecipeStore>) -> Self {
        Self {
            path,
            source,
            store,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &Arc<RecipeStore> {
        &self.store
    }

    /// Read the local catalog into the store. Returns the recipe count.
    pub fn load_initial(&self) -> Result<usize, CatalogError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        let recipes = parse_recipes(&bytes)?;
        let count = recipes.len();
        self.store.load(recipes);
        tracing::info!(path = %self.path.display(), recipes = count, "catalog loaded");
        Ok(count)
    }

    /// Fetch a replacement catalog, persist it, and swap it in.
    ///
    /// The body is parsed before anything is written, so a malformed
    /// response leaves both the file and the store untouched.
    pub fn refresh(&self) -> Result<usize, CatalogError> {
        tracing::info!(source = self.source.describe(), "updating recipes");
        let bytes = self.source.fetch()?;
        let recipes = parse_recipes(&bytes)?;
        std::fs::write(&self.path, &bytes).map_err(|source| CatalogError::Write {
            path: self.path.clone(),
            source,
        })?;
        let count = recipes.len();
        self.store.replace(recipes);
        tracing::info!(recipes = count, "catalog refreshed");
        Ok(count)
    }

    /// [`refresh`](Self::refresh), logging instead of returning the error.
    /// The previous catalog stays in place on failure.
    pub fn refresh_or_keep(&self) -> bool {
        match self.refresh() {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "catalog refresh failed, keeping current catalog");
                false
            }
        }
    }
}
