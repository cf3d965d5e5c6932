//! Check command implementation

use crate::cli::output::{format_status_json, format_status_table, target_views};
use crate::cli::CheckArgs;
use crate::config::ZenithConfig;
use crate::health::{visibility_channel, HealthMonitor, Visibility};

/// Load configuration for a one-shot check.
///
/// A missing default config file falls back to defaults; automatic polling
/// is always off since only one manual refresh runs.
pub fn load_check_config(args: &CheckArgs) -> Result<ZenithConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        ZenithConfig::load(Some(&args.config))?
    } else {
        ZenithConfig::default()
    }
    .with_env_overrides();

    if let Some(timeout_ms) = args.timeout_ms {
        config.polling.probe_timeout_ms = timeout_ms;
    }
    config.polling.enabled = false;

    config.validate()?;
    Ok(config)
}

/// Handle `zenith check` command
pub async fn handle_check(args: &CheckArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_check_config(args)?;
    if config.targets.is_empty() {
        return Ok(format!(
            "No targets configured in {}. Run `zenith config init` to create one.",
            args.config.display()
        ));
    }

    let (_visibility, visibility_rx) = visibility_channel(Visibility::Visible);
    let (monitor, handle) =
        HealthMonitor::start(config.targets.clone(), config.polling.clone(), visibility_rx);

    let snapshot = monitor.refresh().await;
    monitor.shutdown();
    handle.await?;
    let snapshot = snapshot?;

    let views = target_views(&config.targets, &snapshot);
    if args.json {
        Ok(format_status_json(&views, &snapshot))
    } else {
        Ok(format_status_table(&views))
    }
}
