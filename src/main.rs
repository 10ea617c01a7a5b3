use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use route_manual::config::Config;
use route_manual::listing::render_listing;
use route_manual::logging;
use route_manual::scheduler::RenderScheduler;
use route_manual::store::{FileStore, RefreshSignal, StoreWatcher};
use route_manual::{ReorderCommand, RoutePlanner, StepId};

#[derive(Parser)]
#[command(name = "route-manual")]
#[command(about = "Manually ordered pickup/delivery route list")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ordered route steps
    List {
        /// Print steps as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Move a step one place up
    Up {
        /// Step id (e.g. pickup-12)
        id: String,
    },

    /// Move a step one place down
    Down {
        /// Step id (e.g. delivery-12)
        id: String,
    },

    /// Move a step to a position (0-based, counted without the step itself)
    Move { id: String, index: usize },

    /// Replace the order with the given full sequence of step ids
    Commit {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Render the list and re-render whenever the store changes.
    /// Press Enter to force a refresh.
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let is_watch_mode = matches!(cli.command, Commands::Watch);
    let logging_handle = logging::init_logging(&config, is_watch_mode, cli.debug)?;

    match cli.command {
        Commands::List { json } => cmd_list(&config, json)?,
        Commands::Up { id } => cmd_reorder(&config, ReorderCommand::MoveUp { id: id.into() })?,
        Commands::Down { id } => {
            cmd_reorder(&config, ReorderCommand::MoveDown { id: id.into() })?;
        }
        Commands::Move { id, index } => cmd_reorder(
            &config,
            ReorderCommand::MoveTo {
                id: id.into(),
                index,
            },
        )?,
        Commands::Commit { ids } => cmd_commit(&config, ids)?,
        Commands::Watch => cmd_watch(config).await?,
    }

    if let Some(log_path) = logging_handle.log_file_path {
        if log_path.metadata().is_ok_and(|m| m.len() > 0) {
            eprintln!("Session log: {}", log_path.display());
        }
    }

    Ok(())
}

fn cmd_list(config: &Config, json: bool) -> Result<()> {
    let steps = RoutePlanner::open(config).current_steps();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&steps).context("Failed to encode steps")?
        );
    } else {
        println!("{}", render_listing(&steps));
    }

    Ok(())
}

fn cmd_reorder(config: &Config, command: ReorderCommand) -> Result<()> {
    let planner = RoutePlanner::open(config);
    let mut controller = planner.controller();

    if controller.apply(&command).context("Failed to save step order")? {
        println!("{}", render_listing(&planner.current_steps()));
    } else {
        println!("Nothing to move for {}", command.id());
    }

    Ok(())
}

fn cmd_commit(config: &Config, ids: Vec<String>) -> Result<()> {
    let order: Vec<StepId> = ids.into_iter().map(StepId::from).collect();
    let planner = RoutePlanner::open(config);

    planner.commit(order).context("Failed to save step order")?;
    println!("{}", render_listing(&planner.current_steps()));

    Ok(())
}

async fn cmd_watch(config: Config) -> Result<()> {
    let planner = Arc::new(RoutePlanner::open(&config));
    let scheduler = RenderScheduler::new();
    let tick = Duration::from_millis(config.ui.refresh_rate_ms);

    let render_planner = Arc::clone(&planner);
    let render_task = tokio::spawn(scheduler.clone().run(tick, move || {
        let steps = render_planner.current_steps();
        tracing::debug!(steps = steps.len(), "Rendering route list");
        println!("{}\n", render_listing(&steps));
    }));

    let (tx, mut rx) = mpsc::unbounded_channel();

    // Storage changes from this or any other process. Plain threads: both
    // readers block forever and must not hold up runtime shutdown.
    let watcher = StoreWatcher::new(FileStore::new(config.data_path()), config.watched_keys())?;
    let store_tx = tx.clone();
    std::thread::spawn(move || {
        while let Some(signal) = watcher.next() {
            if store_tx.send(signal).is_err() {
                break;
            }
        }
    });

    // Host-side "data changed" notification: a line on stdin
    std::thread::spawn(move || {
        for _ in std::io::stdin().lock().lines() {
            if tx.send(RefreshSignal::DataChanged).is_err() {
                break;
            }
        }
    });

    scheduler.schedule();

    loop {
        tokio::select! {
            signal = rx.recv() => {
                let Some(signal) = signal else { break };
                tracing::info!(signal = ?signal, "Refresh requested");
                scheduler.schedule();
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    render_task.abort();
    Ok(())
}
