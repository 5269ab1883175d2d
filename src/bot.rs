use std::sync::Arc;

use rand::Rng;

use crate::config::UseProxy;
use crate::handlers::{self, COMMAND};
use crate::message::Reply;
use crate::schedule::Clock;
use crate::store::RecipeStore;

/// Generic reply when handling a message fails unexpectedly.
pub const FAILURE_REPLY: &str = "出错了 >_<";

/// Routes chat messages: the lookup command first, then the suggestion
/// matcher. `None` means the message is not for us.
pub struct Bot {
    store: Arc<RecipeStore>,
    proxy: UseProxy,
    clock: Arc<dyn Clock>,
}

impl Bot {
    pub fn new(store: Arc<RecipeStore>, proxy: UseProxy, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            proxy,
            clock,
        }
    }

    pub fn handle(&self, message: &str) -> Option<Reply> {
        self.handle_at(message, self.clock.hour(), &mut rand::rng())
    }

    /// Like [`handle`](Self::handle) with an explicit hour and RNG.
    pub fn handle_at<R>(&self, message: &str, hour: u32, rng: &mut R) -> Option<Reply>
    where
        R: Rng + ?Sized,
    {
        let catalog = self.store.snapshot();
        if let Some(dish) = command_argument(message) {
            return Some(handlers::lookup(&catalog, dish, &self.proxy));
        }
        let reply = handlers::suggest(&catalog, message, hour, rng);
        if let Some(Reply::Text { content }) = &reply {
            tracing::debug!(hour, %content, "suggestion");
        }
        reply
    }
}

/// If `message` invokes the lookup command, the argument text.
/// The command word must stand alone: `查看菜谱x` is not a command.
fn command_argument(message: &str) -> Option<&str> {
    let rest = message.trim().strip_prefix(COMMAND)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
