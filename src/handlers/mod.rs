mod lookup;
mod suggest;

pub use lookup::{COMMAND, NOT_FOUND, USAGE, lookup, render_recipe};
pub use suggest::{Intent, choose_pool, detect_intent, suggest};
