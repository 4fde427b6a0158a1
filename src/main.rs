mod cli;

use clap::Parser;
use cli::{Args, is_config_only};
use startgg_sync::config::Config;
use startgg_sync::error::AppError;
use startgg_sync::logging::setup_logging;
use startgg_sync::sync::{SyncedState, Synchronizer};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.event.is_some() && args.tournament.is_none() {
        return Err(AppError::config_error(
            "--event requires --tournament to resolve against",
        ));
    }

    if is_config_only(&args) {
        return handle_config_commands(&args).await;
    }

    // The guard must be kept alive for the duration of the program to ensure
    // logs are flushed properly
    let (log_file_path, _guard) = setup_logging(args.log_file.as_deref(), args.debug).await?;
    info!("Logging to {log_file_path}");

    let config = Config::load().await?;
    let sync = Synchronizer::new(config)?;

    run_sync(&sync, &args).await?;
    print_snapshot(&sync.state());

    if let Some(interval_seconds) = args.watch {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            if let Err(e) = sync.refresh().await {
                eprintln!("refresh failed: {e}");
                continue;
            }
            print_snapshot(&sync.state());
        }
    }

    Ok(())
}

async fn run_sync(sync: &Synchronizer, args: &Args) -> Result<(), AppError> {
    sync.refresh().await?;
    if args.tournament.is_some() {
        sync.select_tournament(args.tournament).await?;
    }
    if args.event.is_some() {
        sync.select_event(args.event).await?;
    }
    Ok(())
}

fn print_snapshot(state: &SyncedState) {
    let selection = state.selection.get();

    println!("Tournaments:");
    for (i, tournament) in state.tournaments.get().iter().enumerate() {
        let marker = if selection.tournament == Some(i) { ">" } else { " " };
        println!("{marker} [{i}] {} ({})", tournament.name, tournament.id);
    }

    let events = state.events.get();
    if !events.is_empty() {
        println!("Events:");
        for (i, event) in events.iter().enumerate() {
            let marker = if selection.event == Some(i) { ">" } else { " " };
            println!("{marker} [{i}] {} ({})", event.name, event.id);
        }
    }

    let sets = state.sets.get();
    if !sets.is_empty() {
        println!("Sets ({}):", sets.len());
        for set in sets.iter() {
            let names: Vec<&str> = set
                .slots
                .iter()
                .map(|slot| slot.entrant_name.as_deref().unwrap_or("(tbd)"))
                .collect();
            println!(
                "  round {:>3}  {} vs {}",
                set.round,
                names[0],
                names[1]
            );
        }
    }
}

async fn handle_config_commands(args: &Args) -> Result<(), AppError> {
    if args.version {
        println!("{} {}", startgg_sync::NAME, startgg_sync::VERSION);
        return Ok(());
    }

    let config_path = Config::get_config_path();
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(token) = &args.new_api_token {
        config.api_token = token.clone();
        config.save().await?;
        println!("API token updated in {config_path}");
    }

    if let Some(path) = &args.new_log_file_path {
        config.log_file_path = Some(path.clone());
        config.save().await?;
        println!("Log file path updated in {config_path}");
    }

    if args.clear_log_file_path {
        config.log_file_path = None;
        config.save().await?;
        println!("Log file path cleared from {config_path}");
    }

    if args.list_config {
        println!("Config file: {config_path}");
        println!("{}", config.display());
    }

    Ok(())
}
