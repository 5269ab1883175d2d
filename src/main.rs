use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cookbot::commands::init::InitArgs;
use cookbot::commands::lookup::LookupArgs;
use cookbot::commands::refresh::RefreshArgs;
use cookbot::commands::serve::ServeArgs;
use cookbot::commands::suggest::SuggestArgs;
use cookbot::commands::{self, GlobalArgs};
use cookbot::{error, telemetry};

#[derive(Debug, Parser)]
#[command(
    name = "cookbot",
    version,
    about = "Recipe lookup and meal suggestions for chat bots"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Answer chat messages from stdin, refreshing the catalog weekly
    Serve(ServeArgs),
    /// Show one recipe by exact title
    Lookup(LookupArgs),
    /// Suggest a dish for a chat message like 中午吃什么
    Suggest(SuggestArgs),
    /// Download the remote catalog now
    Refresh(RefreshArgs),
    /// Write a default .cookbot.toml
    Init(InitArgs),
    /// Print the JSON Schema for .cookbot.toml
    Schema,
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Serve(_) => "serve",
            Self::Lookup(_) => "lookup",
            Self::Suggest(_) => "suggest",
            Self::Refresh(_) => "refresh",
            Self::Init(_) => "init",
            Self::Schema => "schema",
        }
    }
}

fn main() -> ExitCode {
    telemetry::init();

    let cli = Cli::parse();

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match &cli.command {
        Commands::Serve(args) => args.execute(&cli.global),
        Commands::Lookup(args) => args.execute(&cli.global),
        Commands::Suggest(args) => args.execute(&cli.global),
        Commands::Refresh(args) => args.execute(&cli.global),
        Commands::Init(args) => args.execute(),
        Commands::Schema => commands::schema::run_schema(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(exit_err) = e.downcast_ref::<error::ExitError>() {
                eprintln!("error: {exit_err}");
                exit_err.exit_code()
            } else {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}
