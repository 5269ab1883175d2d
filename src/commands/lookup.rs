use clap::Args;

use super::{GlobalArgs, OutputFormat, Runtime};
use crate::handlers;

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Exact dish title, e.g. 西红柿炒鸡蛋
    pub dish: String,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl LookupArgs {
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let runtime = Runtime::start(global)?;
        let catalog = runtime.store().snapshot();
        let reply = handlers::lookup(&catalog, &self.dish, &runtime.config.use_proxy);
        println!("{}", self.format.render(&reply)?);
        Ok(())
    }
}
