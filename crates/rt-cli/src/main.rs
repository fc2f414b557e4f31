use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rt_cli::commands::{enter, resolve, send, show, submit, util};
use rt_cli::session::connect;
use rt_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Resolve(args)) => {
            let session = connect(&config)?;
            resolve::run(&mut stdout, &session, args.date.unwrap_or_else(util::today))?;
        }
        Some(Commands::Enter(args)) => {
            // Validate entries and dates before resolving anything remotely
            let plan = enter::plan(args, &config, util::today())?;
            let session = connect(&config)?;
            enter::run(&mut stdout, &session, &plan)?;
        }
        Some(Commands::Send(args)) => {
            let session = connect(&config)?;
            send::run(&mut stdout, &session, args)?;
        }
        Some(Commands::Submit(args)) => {
            let session = connect(&config)?;
            submit::run(&mut stdout, &session, args.date.unwrap_or_else(util::today))?;
        }
        Some(Commands::Show(args)) => {
            show::run(&mut stdout, args)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
