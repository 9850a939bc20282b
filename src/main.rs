//! repo-sweep - batch tasks over the stored repo catalog

#![allow(missing_docs)]

use clap::{Args, Parser, Subcommand};
use repo_sweep::config::BatchConfig;
use repo_sweep::storage::{Database, JsonWriter};
use repo_sweep::utils::format_duration;
use repo_sweep::utils::logging::init_logging;
use repo_sweep::{CancelToken, Config, Result, TaskContext, TaskRegistry};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "repo-sweep", version, about)]
struct Cli {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, global = true, env = "SWEEP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a task over the selected repos
    Run(RunArgs),
    /// List the available tasks
    Tasks,
    /// Apply pending database migrations
    Migrate,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Task name, see `repo-sweep tasks`
    task: String,

    /// Maximum number of repos to process (0 = unlimited)
    #[arg(long)]
    limit: Option<u64>,

    /// Number of leading repos to skip
    #[arg(long)]
    skip: Option<u64>,

    /// Only process the repo with this full name
    #[arg(long)]
    name: Option<String>,

    /// Maximum simultaneous units of work
    #[arg(long)]
    concurrency: Option<usize>,

    /// Minimum spacing between two starts, in milliseconds
    #[arg(long)]
    throttle_interval_ms: Option<u64>,

    /// Abort on the first failing repo
    #[arg(long)]
    fail_fast: bool,
}

impl RunArgs {
    /// Command-line flags win over the configured batch section
    fn apply(&self, batch: &mut BatchConfig) {
        if let Some(limit) = self.limit {
            batch.limit = limit;
        }
        if let Some(skip) = self.skip {
            batch.skip = skip;
        }
        if let Some(name) = &self.name {
            batch.name = Some(name.clone());
        }
        if let Some(concurrency) = self.concurrency {
            batch.concurrency = concurrency;
        }
        if let Some(interval) = self.throttle_interval_ms {
            batch.throttle_interval_ms = interval;
        }
        if self.fail_fast {
            batch.fail_fast = true;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, keeps the message readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).await?;
    init_logging(&config.logging);

    match cli.command {
        Command::Tasks => {
            for (name, description) in TaskRegistry::with_builtin_tasks().list() {
                println!("{:<20} {}", name, description);
            }
            Ok(())
        }
        Command::Migrate => {
            let database = Database::new(&config.database).await?;
            database.migrate().await?;
            database.close().await
        }
        Command::Run(args) => run_task(config, args).await,
    }
}

async fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::from_file(path).await?.with_env_overrides()?;
            config.validate()?;
            Ok(config)
        }
        None => Config::from_env(),
    }
}

async fn run_task(mut config: Config, args: RunArgs) -> Result<()> {
    args.apply(&mut config.batch);
    let options = config.batch.to_options()?;
    let registry = TaskRegistry::with_builtin_tasks();
    // Unknown names fail before touching the database
    registry.get(&args.task)?;

    let database = Database::new(&config.database).await?;
    database.migrate().await?;

    let cancel = CancelToken::new();
    let signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight repos");
            signal.cancel();
        }
    });

    let ctx = TaskContext::new(
        Arc::new(database),
        options,
        JsonWriter::new(&config.output.directory),
    )
    .with_cancel(cancel);

    let start = Instant::now();
    let report = registry.run(&args.task, &ctx).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!(
        "Finished {} in {}",
        report.task,
        format_duration(start.elapsed().as_millis() as u64)
    );
    Ok(())
}
