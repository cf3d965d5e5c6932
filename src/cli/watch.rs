//! Watch command implementation
//!
//! Hosts a [`HealthMonitor`] in the terminal: every published snapshot is
//! printed, and stdin lines act as the host's refresh and visibility
//! controls.

use crate::cli::output::{format_phase, format_status_line, format_status_table, target_views};
use crate::cli::WatchArgs;
use crate::config::ZenithConfig;
use crate::health::{visibility_channel, HealthMonitor, Visibility, VisibilitySender};
use crate::probe::{HttpProbe, Target};
use anyhow::Context;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Commands accepted on stdin while watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Refresh,
    Hide,
    Show,
    Status,
    Quit,
}

impl FromStr for HostCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "refresh" => Ok(HostCommand::Refresh),
            "hide" | "hidden" => Ok(HostCommand::Hide),
            "show" | "visible" => Ok(HostCommand::Show),
            "s" | "status" => Ok(HostCommand::Status),
            "q" | "quit" | "exit" => Ok(HostCommand::Quit),
            other => Err(format!(
                "Unknown command: {} (try refresh, hide, show, status, quit)",
                other
            )),
        }
    }
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &WatchArgs,
) -> Result<ZenithConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        ZenithConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        ZenithConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(max_attempts) = args.max_attempts {
        config.polling.max_attempts = max_attempts;
    }
    if let Some(base_interval_ms) = args.base_interval_ms {
        config.polling.base_interval_ms = base_interval_ms;
    }
    if args.no_polling {
        config.polling.enabled = false;
    }

    Ok(config)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

/// Apply one host command. Returns `false` when the host should exit.
pub async fn execute_host_command(
    command: HostCommand,
    monitor: &HealthMonitor,
    visibility: &VisibilitySender,
    targets: &[Target],
) -> anyhow::Result<bool> {
    match command {
        HostCommand::Refresh => {
            // The subscriber prints the snapshot
            monitor.refresh().await.context("refresh failed")?;
        }
        HostCommand::Hide => visibility.hide(),
        HostCommand::Show => visibility.show(),
        HostCommand::Status => {
            let snapshot = monitor.snapshot();
            println!("{}", format_status_table(&target_views(targets, &snapshot)));
            println!("Polling: {}", format_phase(&monitor.phase()));
        }
        HostCommand::Quit => return Ok(false),
    }
    Ok(true)
}

async fn run_host_commands(
    monitor: &HealthMonitor,
    visibility: &VisibilitySender,
    targets: &[Target],
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<HostCommand>() {
            Ok(command) => {
                if !execute_host_command(command, monitor, visibility, targets).await? {
                    return Ok(());
                }
            }
            Err(message) => eprintln!("{}", message),
        }
    }

    // stdin closed; keep polling until a signal arrives
    std::future::pending::<()>().await;
    Ok(())
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load, merge and validate configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    crate::logging::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");
    if config.targets.is_empty() {
        tracing::warn!("No targets configured; nothing will be probed");
    }

    // 3. Start the monitor and print every published snapshot
    let initial = if args.hidden {
        Visibility::Hidden
    } else {
        Visibility::Visible
    };
    let (visibility, visibility_rx) = visibility_channel(initial);
    let printed_targets = config.targets.clone();
    let probe = Arc::new(HttpProbe::new(config.polling.probe_timeout()));
    let (monitor, _printer, handle) = HealthMonitor::with_subscriber(
        config.targets.clone(),
        probe,
        config.polling.clone(),
        visibility_rx,
        move |snapshot| {
            println!(
                "{}",
                format_status_line(&target_views(&printed_targets, snapshot), snapshot)
            );
        },
    );

    // 4. Serve host commands until quit or signal
    let result = tokio::select! {
        result = run_host_commands(&monitor, &visibility, &config.targets) => result,
        _ = shutdown_signal() => Ok(()),
    };

    // 5. Cleanup
    monitor.shutdown();
    tracing::info!("Waiting for polling scheduler to stop");
    handle.await?;

    result?;
    tracing::info!("Zenith watch stopped");
    Ok(())
}
