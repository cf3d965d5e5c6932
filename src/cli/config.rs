//! Config command handlers

use crate::cli::ConfigInitArgs;
use crate::config::{ConfigError, Target, ZenithConfig};
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../zenith.example.toml");

/// Marks where the sample `[[targets]]` entries begin in the template.
const TARGETS_SECTION: &str = "# Monitored services.";

/// Parse a `KEY=URL` target argument.
fn parse_target(arg: &str) -> Result<Target, String> {
    match arg.split_once('=') {
        Some((key, url)) if !key.trim().is_empty() && !url.trim().is_empty() => {
            Ok(Target::new(key.trim(), url.trim()))
        }
        _ => Err(format!("Invalid target '{}': expected KEY=URL", arg)),
    }
}

/// The example config, with its sample targets swapped for `targets`.
fn render_config(targets: &[Target]) -> String {
    if targets.is_empty() {
        return EXAMPLE_CONFIG.to_string();
    }

    let head = EXAMPLE_CONFIG
        .find(TARGETS_SECTION)
        .map_or(EXAMPLE_CONFIG, |at| &EXAMPLE_CONFIG[..at]);
    let mut rendered = head.to_string();
    rendered.push_str(TARGETS_SECTION);
    rendered.push_str(" Any 2xx response within the timeout counts as online.\n");
    for target in targets {
        rendered.push_str(&format!(
            "\n[[targets]]\nkey = {:?}\nprobe_url = {:?}\n",
            target.key, target.probe_url
        ));
    }
    rendered
}

/// Parse and validate rendered TOML exactly as `watch` and `check` would.
fn validate_rendered(content: &str) -> Result<ZenithConfig, ConfigError> {
    let config: ZenithConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Handle `zenith config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    let targets = args
        .targets
        .iter()
        .map(|arg| parse_target(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let content = render_config(&targets);
    // Nothing is written if the targets would not load
    let config = validate_rendered(&content)?;

    fs::write(&args.output, content)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!(
        "  {} target(s), backoff from {}ms for up to {} failing cycles",
        config.targets.len(),
        config.polling.base_interval_ms,
        config.polling.max_attempts
    );
    if targets.is_empty() {
        println!("  Sample targets point at localhost; pass --target KEY=URL to use your own.");
    }
    println!("  Try it: zenith check -c {}", args.output.display());

    Ok(())
}
