use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use quickdue::cli::args::{Cli, Commands};
use quickdue::cli::commands;
use quickdue::config::Config;
use quickdue::core::local_now;
use quickdue::tasks::SqliteTaskStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("QUICKDUE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("quickdue=info"),
        _ => EnvFilter::new("quickdue=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::load()?;
    config.general.color.apply();

    let format = cli.output.unwrap_or(config.general.default_output);
    let now = cli.now.unwrap_or_else(local_now);
    debug!(%now, ?format, "starting");

    let output = match cli.command {
        Commands::Parse { text } => commands::preview(&text, now, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        command => {
            let store = SqliteTaskStore::open()?;
            match command {
                Commands::Add(args) => commands::add(&store, &config.tasks, args, now, format)?,
                Commands::List(args) => commands::list(&store, &args, now, format)?,
                Commands::Today => commands::today(&store, now, format)?,
                Commands::Show { id } => commands::show(&store, id, format)?,
                Commands::Done { id } => commands::done(&store, id, now, format)?,
                Commands::Delete { id } => commands::delete(&store, id, format)?,
                Commands::Edit(args) => commands::edit(&store, &config.tasks, args, format)?,
                Commands::Categories => commands::categories(&store, &config.tasks, format)?,
                Commands::Stats { period } => commands::stats(&store, period, now, format)?,
                Commands::Parse { .. } | Commands::Completions { .. } => String::new(),
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
