mod config;
mod render;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use marx_eval::{EngineConfig, Layer, Request};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Marketing recommendation rule engine.
#[derive(Parser)]
#[command(name = "marx", version, about = "Marketing recommendation rule engine")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log rule firing and aggregation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a request and print the recommendation
    Eval {
        /// Path to the request JSON file
        request: PathBuf,
        /// Number of strategies to recommend (3-5), overrides the config file
        #[arg(long)]
        strategy_limit: Option<usize>,
    },

    /// Run the engine only and print the final fact store
    Facts {
        /// Path to the request JSON file
        request: PathBuf,
        /// Pass cap for the fixpoint loop, overrides the config file
        #[arg(long)]
        max_passes: Option<usize>,
    },

    /// Describe the rule table
    Rules {
        /// Only show rules of this layer (0-10)
        #[arg(long)]
        layer: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Eval {
            request,
            strategy_limit,
        } => {
            let config = load_config(
                cli.config.as_deref(),
                strategy_limit,
                None,
                cli.output,
                cli.quiet,
            );
            cmd_eval(&request, &config, cli.output, cli.quiet);
        }
        Commands::Facts {
            request,
            max_passes,
        } => {
            let config = load_config(
                cli.config.as_deref(),
                None,
                max_passes,
                cli.output,
                cli.quiet,
            );
            cmd_facts(&request, &config, cli.output, cli.quiet);
        }
        Commands::Rules { layer } => {
            cmd_rules(layer, cli.output, cli.quiet);
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins unless `--verbose` or `--quiet` is set.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(
    path: Option<&Path>,
    strategy_limit: Option<usize>,
    max_passes: Option<usize>,
    output: OutputFormat,
    quiet: bool,
) -> EngineConfig {
    match config::resolve(path, strategy_limit, max_passes) {
        Ok(c) => {
            tracing::debug!(config = ?c, "engine configuration");
            c
        }
        Err(e) => {
            report_error(&format!("error: invalid config: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

fn load_request(path: &Path, output: OutputFormat, quiet: bool) -> Request {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: request file not found: {}", path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let request: Request = match serde_json::from_str(&text) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("error: invalid request in {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if let Err(e) = request.validate() {
        report_error(&format!("error: {}", e), output, quiet);
        process::exit(1);
    }
    request
}

fn cmd_eval(request_path: &Path, config: &EngineConfig, output: OutputFormat, quiet: bool) {
    let request = load_request(request_path, output, quiet);

    match marx_eval::evaluate_with(&request, config) {
        Ok(rec) => {
            if !quiet {
                match output {
                    OutputFormat::Json => println!("{}", render::to_json(&rec)),
                    OutputFormat::Text => print!("{}", render::recommendation_text(&rec)),
                }
            }
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

fn cmd_facts(request_path: &Path, config: &EngineConfig, output: OutputFormat, quiet: bool) {
    let request = load_request(request_path, output, quiet);

    match marx_eval::run_engine(&request, config) {
        Ok(outcome) => {
            if !quiet {
                match output {
                    OutputFormat::Json => println!("{}", render::outcome_json(&outcome)),
                    OutputFormat::Text => print!("{}", render::outcome_text(&outcome)),
                }
            }
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

fn cmd_rules(layer: Option<usize>, output: OutputFormat, quiet: bool) {
    let mut rules = marx_eval::describe_rule_table();

    if let Some(n) = layer {
        if Layer::from_index(n).is_none() {
            let msg = format!(
                "error: layer must be between 0 and {}, got {}",
                Layer::COUNT - 1,
                n
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        rules.retain(|r| r.layer == n);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => println!("{}", render::to_json(&rules)),
        OutputFormat::Text => print!("{}", render::rules_text(&rules)),
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
