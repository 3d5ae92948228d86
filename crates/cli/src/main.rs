use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sale-tracker")]
#[command(about = "Tracks a scraped listing count and publishes trend charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch state, scrape, update, render, publish and refresh the CDN once
    Run(commands::run::RunArgs),
    /// Render the five charts from a local series database
    Render {
        #[arg(long)]
        db: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        /// End of the chart windows (unix seconds); defaults to just after the newest sample
        #[arg(long)]
        now: Option<i64>,
    },
    /// Print the last records of a plaintext log as JSON
    Tail {
        #[arg(long)]
        log: PathBuf,
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let success = commands::run::run(args).await?;
            if !success {
                std::process::exit(1);
            }
        },
        Commands::Render { db, out, now } => commands::local::run_render(db, out, now).await?,
        Commands::Tail { log, limit } => commands::local::run_tail(&log, limit)?,
    }

    Ok(())
}
