//! CLI entrypoint for videofactory-feed
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use feed_application::{
    ConnectivityProbe, FeedPresenter, ProbeReport, RecordArchive, RunFeedUseCase,
};
use feed_infrastructure::{
    ConfigLoader, FileConfig, HttpConnectivityProbe, JsonlRecordArchive, OrchestratorEndpoints,
    PollingOptions, build_feed_source,
};
use feed_presentation::{Cli, ConsolePresenter, ResultOnlyPresenter};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration file (unless --no-config)
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    apply_cli_overrides(&cli, &mut config);
    config.validate()?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting videofactory-feed");

    // === Dependency Injection ===
    let client = reqwest::Client::new();
    let endpoints = OrchestratorEndpoints::new(config.base_url()?);
    let context = config.deployment_context()?;
    let polling = PollingOptions {
        interval: config.poll_interval(),
        limit: config.polling.limit,
        timeout: config.poll_timeout(),
    };
    let source = build_feed_source(client.clone(), &endpoints, &context, polling);

    if config.probe.enabled {
        let probe = HttpConnectivityProbe::new(client, &endpoints, config.probe_timeout());
        match probe.probe().await {
            ProbeReport::Reachable { status } => {
                info!("Orchestrator reachable at {} ({})", endpoints.base(), status)
            }
            ProbeReport::Unreachable { reason } => {
                warn!("Orchestrator not reachable at {}: {}", endpoints.base(), reason)
            }
        }
    }

    let presenter: Arc<dyn FeedPresenter> = if cli.quiet {
        Arc::new(ResultOnlyPresenter)
    } else {
        Arc::new(ConsolePresenter::new().with_progress(config.output.show_progress))
    };

    let mut use_case = RunFeedUseCase::new(source)
        .with_params(config.feed_params())
        .with_presenter(presenter);

    if let Some(path) = &cli.archive {
        match JsonlRecordArchive::new(path) {
            Some(archive) => {
                info!("Archiving records to {}", archive.path().display());
                use_case = use_case.with_archive(Arc::new(archive) as Arc<dyn RecordArchive>);
            }
            None => warn!("Record archive disabled"),
        }
    }

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|           AI Video Factory - Live Activity Feed            |");
        println!("+============================================================+");
        println!();
        println!("Orchestrator: {}", endpoints.base());
        println!("Transport: {}", context.select_mode());
        println!();
    }

    let mut handle = use_case.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
            signal = handle.next_completion() => match signal {
                Some(signal) => {
                    info!("Result ready: {}", signal.url);
                    if cli.exit_on_result {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    handle.shutdown().await;
    Ok(())
}

/// Command-line flags take precedence over every configuration source.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(url) = &cli.url {
        config.orchestrator.url = url.clone();
    }
    if let Some(transport) = cli.transport {
        config.orchestrator.transport = transport.as_config_str().to_string();
    }
    if cli.production {
        config.orchestrator.production = true;
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.polling.interval_ms = interval;
    }
    if let Some(limit) = cli.limit {
        config.polling.limit = limit;
    }
    if let Some(delay) = cli.reset_delay_ms {
        config.phase.reset_delay_ms = delay;
    }
    if cli.capacity.is_some() {
        config.buffer.capacity = cli.capacity;
    }
    if cli.no_probe {
        config.probe.enabled = false;
    }
}
