//! `stackcmp config` command - Configuration management
//!
//! Provides commands to view and modify stackcmp configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::core::config::PROJECT_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path(PathArgs),

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,

    /// Show only project-level config
    #[arg(long = "project-only", conflicts_with = "global_only")]
    pub project_only: bool,

    /// Show only global (user) config
    #[arg(long = "global-only")]
    pub global_only: bool,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., theme, roi.users)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Show only project config path
    #[arg(long = "project-only", conflicts_with = "global_only")]
    pub project_only: bool,

    /// Show only global config path
    #[arg(long = "global-only")]
    pub global_only: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("default_format", "Default output format (auto, tsv, csv, json, md)"),
    ("theme", "Color theme (light, dark)"),
    ("color", "Colored output (true, false)"),
    ("show_raw", "Show raw data tables under charts (true, false)"),
    ("roi.users", "ROI calculator default user count (10-1000)"),
    ("roi.months", "ROI calculator default duration in months (6-36)"),
    ("roi.complexity", "ROI calculator default complexity (low, medium, high)"),
    ("roi.roi_percent", "ROI calculator default expected ROI % (0-200)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path(args) => run_path(args),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    // If a specific key is requested, show just that value
    if let Some(key) = &args.key {
        check_key(key)?;
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    if args.project_only {
        show_config_file("Project config:", project_config_path()?)
    } else if args.global_only {
        show_config_file("Global config:", global_config_path()?)
    } else {
        println!("{}", style("Effective Configuration").bold().underlined());
        println!();

        for (key, _) in VALID_KEYS {
            print_config_value(key, get_config_value(&config, key).as_deref());
        }

        println!();
        println!("{}", style("Config Sources (in priority order):").dim());
        println!("  1. Command-line flags");
        println!("  2. Environment variables (STACKCMP_FORMAT, STACKCMP_THEME)");
        println!("  3. Project config ({})", PROJECT_CONFIG_FILE);
        println!("  4. Global config (~/.config/stackcmp/config.yaml)");
        Ok(())
    }
}

fn run_set(args: SetArgs) -> Result<()> {
    check_key(&args.key)?;
    let config_path = if args.global {
        global_config_path()?
    } else {
        project_config_path()?
    };

    let mut config_map = read_mapping(&config_path)?;
    set_nested_value(&mut config_map, &args.key, parse_scalar(&args.value))?;

    // Refuse to write a file that would no longer load
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    Config::from_yaml(&yaml).map_err(|e| {
        miette::miette!(
            help = "run `stackcmp config keys` to see accepted values",
            "Invalid value '{}' for {}: {}",
            args.value,
            args.key,
            e
        )
    })?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&config_path, yaml).into_diagnostic()?;
    tracing::debug!(path = %config_path.display(), key = %args.key, "config updated");

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );

    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    let config_path = if args.global {
        global_config_path()?
    } else {
        project_config_path()?
    };

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    if !unset_nested_value(&mut config_map, &args.key) {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Removed {} from {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        scope
    );

    Ok(())
}

fn run_path(args: PathArgs) -> Result<()> {
    if args.project_only {
        println!("{}", project_config_path()?.display());
    } else if args.global_only {
        println!("{}", global_config_path()?.display());
    } else {
        println!("{}", style("Configuration file paths:").bold());
        println!();
        for (label, path) in [
            ("Global: ", global_config_path()?),
            ("Project:", project_config_path()?),
        ] {
            let state = if path.exists() {
                style("(exists)").green()
            } else {
                style("(not created)").dim()
            };
            println!("  {} {} {}", style(label).cyan(), path.display(), state);
        }
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'stackcmp config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "run `stackcmp config keys` to list them",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn project_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(cwd.join(PROJECT_CONFIG_FILE))
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "default_format" => config.default_format.clone(),
        "theme" => config.theme.map(|t| t.to_string()),
        "color" => config.color.map(|c| c.to_string()),
        "show_raw" => config.show_raw.map(|s| s.to_string()),
        "roi.users" => config.roi.users.map(|v| v.to_string()),
        "roi.months" => config.roi.months.map(|v| v.to_string()),
        "roi.complexity" => config.roi.complexity.map(|c| c.key().to_string()),
        "roi.roi_percent" => config.roi.roi_percent.map(|v| v.to_string()),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn show_config_file(title: &str, path: PathBuf) -> Result<()> {
    println!("{} {}", style(title).bold(), style(path.display()).dim());
    println!();

    if path.exists() {
        let content = fs::read_to_string(&path).into_diagnostic()?;
        print!("{}", content);
    } else {
        println!("{}", style("(not created)").dim());
    }

    Ok(())
}

/// Read a config file as a YAML mapping; missing or empty files are empty
fn read_mapping(path: &std::path::Path) -> Result<serde_yml::Value> {
    if !path.exists() {
        return Ok(serde_yml::Value::Mapping(Default::default()));
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    let parsed: serde_yml::Value = serde_yml::from_str(&content).into_diagnostic()?;
    Ok(match parsed {
        serde_yml::Value::Mapping(_) => parsed,
        _ => serde_yml::Value::Mapping(Default::default()),
    })
}

/// Interpret a command-line value as a YAML scalar (`true`, `200`, `dark`)
fn parse_scalar(value: &str) -> serde_yml::Value {
    match serde_yml::from_str::<serde_yml::Value>(value) {
        Ok(v @ (serde_yml::Value::Bool(_) | serde_yml::Value::Number(_))) => v,
        _ => serde_yml::Value::String(value.to_string()),
    }
}

fn set_nested_value(root: &mut serde_yml::Value, key: &str, value: serde_yml::Value) -> Result<()> {
    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (parents.split('.').collect::<Vec<_>>(), last),
        None => (Vec::new(), key),
    };

    let mut current = root;
    for part in parents {
        let serde_yml::Value::Mapping(map) = current else {
            return Err(miette::miette!("Cannot set '{}': '{}' is not a mapping", key, part));
        };
        current = map
            .entry(serde_yml::Value::String(part.to_string()))
            .or_insert_with(|| serde_yml::Value::Mapping(Default::default()));
    }

    match current {
        serde_yml::Value::Mapping(map) => {
            map.insert(serde_yml::Value::String(last.to_string()), value);
            Ok(())
        }
        _ => Err(miette::miette!("Cannot set '{}': parent is not a mapping", key)),
    }
}

fn unset_nested_value(root: &mut serde_yml::Value, key: &str) -> bool {
    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (parents.split('.').collect::<Vec<_>>(), last),
        None => (Vec::new(), key),
    };

    let mut current = root;
    for part in parents {
        match current {
            serde_yml::Value::Mapping(map) => {
                match map.get_mut(serde_yml::Value::String(part.to_string())) {
                    Some(next) => current = next,
                    None => return false,
                }
            }
            _ => return false,
        }
    }

    match current {
        serde_yml::Value::Mapping(map) => map
            .remove(serde_yml::Value::String(last.to_string()))
            .is_some(),
        _ => false,
    }
}
