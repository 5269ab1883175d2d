pub mod init;
pub mod lookup;
pub mod refresh;
pub mod schema;
pub mod serve;
pub mod suggest;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::catalog::{CatalogLoader, HttpSource};
use crate::config::Config;
use crate::error::ExitError;
use crate::message::Reply;
use crate::store::RecipeStore;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default: .cookbot.toml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Recipe file, overriding catalog.path from the config
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let cwd = std::env::current_dir().context("resolving current directory")?;
        let mut config = Config::discover(self.config.as_deref(), &cwd)?;
        if let Some(path) = &self.catalog {
            config.catalog.path.clone_from(path);
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn render(self, reply: &Reply) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(reply.to_plain()),
            OutputFormat::Json => reply.to_json().context("serializing reply"),
        }
    }
}

/// Config plus a loader whose store already holds the local catalog.
pub struct Runtime {
    pub config: Config,
    pub loader: Arc<CatalogLoader>,
}

impl Runtime {
    pub fn start(args: &GlobalArgs) -> anyhow::Result<Self> {
        let config = args.load_config()?;
        let loader = Self::loader(&config);
        loader.load_initial().map_err(ExitError::from)?;
        Ok(Self {
            config,
            loader: Arc::new(loader),
        })
    }

    /// A loader for `config` without reading the local file.
    pub fn loader(config: &Config) -> CatalogLoader {
        let source = HttpSource::new(&config.catalog.remote_url, config.catalog.timeout());
        CatalogLoader::new(
            config.catalog.path.clone(),
            Box::new(source),
            Arc::new(RecipeStore::new()),
        )
    }

    pub fn store(&self) -> Arc<RecipeStore> {
        Arc::clone(self.loader.store())
    }
}
