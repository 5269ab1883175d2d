use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Args;

use super::{GlobalArgs, OutputFormat, Runtime};
use crate::bot::{Bot, FAILURE_REPLY};
use crate::schedule::{Clock, SystemClock, WeeklySchedule, spawn_refresh_job};

/// How often the chat loop and the refresh job check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Output format for replies
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
    /// Do not run the weekly catalog refresh
    #[arg(long)]
    pub no_refresh: bool,
}

impl ServeArgs {
    /// Read chat messages from stdin, one per line, and answer on stdout
    /// until stdin closes or Ctrl-C.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let runtime = Runtime::start(global)?;

        let shutdown = Arc::new(AtomicBool::new(false));
        {
            let shutdown = Arc::clone(&shutdown);
            ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed))
                .context("installing Ctrl-C handler")?;
        }

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let job = if runtime.config.refresh.enabled && !self.no_refresh {
            let schedule = WeeklySchedule::from_config(&runtime.config.refresh)?;
            Some(
                spawn_refresh_job(
                    Arc::clone(&runtime.loader),
                    schedule,
                    Arc::clone(&clock),
                    Arc::clone(&shutdown),
                    POLL_INTERVAL,
                )
                .context("starting refresh job")?,
            )
        } else {
            tracing::info!("catalog refresh disabled");
            None
        };

        let bot = Bot::new(runtime.store(), runtime.config.use_proxy.clone(), clock);
        let lines = spawn_stdin_reader().context("starting stdin reader")?;
        tracing::info!("cookbot ready");

        let result = chat_loop(&bot, &lines, &mut std::io::stdout().lock(), self.format, &shutdown);

        shutdown.store(true, Ordering::Relaxed);
        if let Some(job) = job {
            if job.join().is_err() {
                tracing::error!("refresh job panicked");
            }
        }
        let handled = result?;
        tracing::info!(replies = handled, "cookbot stopped");
        Ok(())
    }
}

/// Forward stdin lines over a channel so the chat loop can watch for
/// shutdown between messages.
fn spawn_stdin_reader() -> std::io::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Answer each incoming message until the channel closes or `shutdown` is
/// set. Returns the number of replies written.
pub fn chat_loop<W: Write>(
    bot: &Bot,
    messages: &Receiver<String>,
    out: &mut W,
    format: OutputFormat,
    shutdown: &AtomicBool,
) -> anyhow::Result<usize> {
    let mut replies = 0;
    while !shutdown.load(Ordering::Relaxed) {
        let message = match messages.recv_timeout(POLL_INTERVAL) {
            Ok(message) => message,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if let Some(text) = respond(bot, &message, format) {
            writeln!(out, "{text}").context("writing reply")?;
            out.flush().context("flushing reply")?;
            replies += 1;
        }
    }
    Ok(replies)
}

/// One message in, at most one rendered reply out. Rendering failures
/// degrade to [`FAILURE_REPLY`].
fn respond(bot: &Bot, message: &str, format: OutputFormat) -> Option<String> {
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    let reply = bot.handle(message)?;
    match format.render(&reply) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!(error = %e, "rendering reply failed");
            Some(FAILURE_REPLY.to_string())
        }
    }
}
