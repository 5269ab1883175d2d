use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::Runtime;
use crate::config::{CONFIG_TOML, Config, UseProxy};
use crate::error::ExitError;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
    /// Load images directly instead of through the default proxy
    #[arg(long)]
    pub direct: bool,
    /// Also download the recipe catalog
    #[arg(long)]
    pub fetch: bool,
}

impl InitArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("resolving current directory")?,
        };
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        let path = dir.join(CONFIG_TOML);
        if path.exists() && !self.force {
            return Err(ExitError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
            .into());
        }

        let mut config = Config::default();
        if self.direct {
            config.use_proxy = UseProxy::Direct;
        }
        std::fs::write(&path, config.to_toml()?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());

        if self.fetch {
            config.catalog.path = dir.join(&config.catalog.path);
            let count = Runtime::loader(&config).refresh().map_err(ExitError::from)?;
            println!("Fetched {count} recipes into {}", config.catalog.path.display());
        }
        Ok(())
    }
}
