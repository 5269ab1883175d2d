use clap::Args;

use super::{GlobalArgs, Runtime};
use crate::error::ExitError;

#[derive(Debug, Args)]
pub struct RefreshArgs {}

impl RefreshArgs {
    /// Fetch the remote catalog now and overwrite the local file.
    ///
    /// Unlike the scheduled job, a failure here is reported to the caller.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let config = global.load_config()?;
        let loader = Runtime::loader(&config);
        let count = loader.refresh().map_err(ExitError::from)?;
        println!("Refreshed {count} recipes into {}", loader.path().display());
        Ok(())
    }
}
