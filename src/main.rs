//! grantscope CLI
//!
//! Explains the effective feature privileges of a configured role.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use grantscope::{
    config::{AppConfig, LogFormat, load_config},
    privilege::{AssignmentSpec, GLOBAL_SPACE, PrivilegeCalculator, PrivilegeDefinition},
    report::{AllowedEntry, AllowedReport, EffectiveEntry, EffectiveReport},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// grantscope - Resolve and explain effective feature privileges
#[derive(Parser, Debug)]
#[command(name = "grantscope")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "GRANTSCOPE_CONFIG", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GRANTSCOPE_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show effective privileges and where they come from
    Explain {
        /// Space to explain (`*` for global); all assignments when omitted
        #[arg(short, long)]
        space: Option<String>,

        /// Leave out direct assignments to show only inherited privileges
        #[arg(long)]
        ignore_assigned: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show privileges that can still be assigned on top of inherited ones
    Allowed {
        /// Space to inspect (`*` for global); all assignments when omitted
        #[arg(short, long)]
        space: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load and validate the configuration
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Toml,
}

fn init_logging(config: &AppConfig, cli_level: Option<&str>) {
    let level = cli_level.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so reports on stdout stay machine readable
    match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}

/// Assignments selected by `--space`, or every assignment of the role
fn selected_assignments(calculator: &PrivilegeCalculator<'_>, space: Option<&str>) -> Vec<AssignmentSpec> {
    match space {
        Some(GLOBAL_SPACE) => vec![calculator.global_assignment().clone()],
        Some(space) => vec![calculator.assignment_for_space(space)],
        None => calculator.assignments().to_vec(),
    }
}

fn render<T>(
    format: OutputFormat,
    report: &T,
    text: impl Fn(&T) -> String,
    json: impl Fn(&T) -> serde_json::Result<String>,
    toml: impl Fn(&T) -> Result<String, toml::ser::Error>,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => text(report),
        OutputFormat::Json => json(report).context("Failed to render JSON report")?,
        OutputFormat::Toml => toml(report).context("Failed to render TOML report")?,
    })
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = load_config(args.config.as_deref())?;

    // Initialize logging
    init_logging(&config, args.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        role = %config.role.name,
        "Starting grantscope"
    );

    // Build the privilege catalog
    let catalog = PrivilegeDefinition::new(&config.definitions)
        .inspect_err(|e| error!(error = %e, "Failed to build privilege catalog"))?;

    let calculator = PrivilegeCalculator::new(&catalog, &config.role.assignments)
        .inspect_err(|e| error!(error = %e, "Failed to create privilege calculator"))?;

    match args.command {
        Command::Explain {
            space,
            ignore_assigned,
            format,
        } => {
            let assignments = selected_assignments(&calculator, space.as_deref());
            let mut entries = Vec::with_capacity(assignments.len());
            for spec in &assignments {
                entries.push(EffectiveEntry {
                    spaces: &spec.spaces,
                    privileges: calculator.effective_privileges(spec, ignore_assigned)?,
                });
            }

            let report = EffectiveReport {
                role: &config.role.name,
                ignore_assigned,
                assignments: entries,
            };
            print!(
                "{}",
                render(
                    format,
                    &report,
                    EffectiveReport::to_text,
                    EffectiveReport::to_json,
                    EffectiveReport::to_toml
                )?
            );
        }
        Command::Allowed { space, format } => {
            let assignments = selected_assignments(&calculator, space.as_deref());
            let mut entries = Vec::with_capacity(assignments.len());
            for spec in &assignments {
                entries.push(AllowedEntry {
                    spaces: &spec.spaces,
                    allowed: calculator.allowed_privileges(spec)?,
                });
            }

            let report = AllowedReport {
                role: &config.role.name,
                assignments: entries,
            };
            print!(
                "{}",
                render(
                    format,
                    &report,
                    AllowedReport::to_text,
                    AllowedReport::to_json,
                    AllowedReport::to_toml
                )?
            );
        }
        Command::Check => {
            // Resolving everything surfaces assignments the catalog does not know
            calculator.calculate_all(false)?;
            println!(
                "Configuration OK: {} base privileges, {} features, {} assignments",
                config.definitions.base.len(),
                catalog.feature_count(),
                config.role.assignments.len()
            );
        }
    }

    Ok(())
}
