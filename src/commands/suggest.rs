use clap::Args;

use super::{GlobalArgs, OutputFormat, Runtime};
use crate::handlers;
use crate::schedule::{Clock, SystemClock};

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Chat message to react to, e.g. 中午吃什么
    pub message: String,
    /// Local hour to assume (0-23) instead of the current one
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    pub hour: Option<u32>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl SuggestArgs {
    /// Prints nothing when the message is not a food request.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let runtime = Runtime::start(global)?;
        let catalog = runtime.store().snapshot();
        let hour = self.hour.unwrap_or_else(|| SystemClock.hour());
        match handlers::suggest(&catalog, &self.message, hour, &mut rand::rng()) {
            Some(reply) => println!("{}", self.format.render(&reply)?),
            None => tracing::debug!(message = %self.message, "no suggestion"),
        }
        Ok(())
    }
}
