use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use config_facts_lib::{AggregateOptions, ConfigFacts, FALLBACK_JSON, collect_facts};
use thiserror::Error;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Extract deployment facts from a multi-document YAML configuration file.
///
/// Prints one JSON object with `namespace`, `principal`, and `hosts`. The
/// command always succeeds: on any error the default record is printed and
/// the reason is logged to stderr. Help and version text also go to stderr
/// so stdout only ever carries the record.
///
/// Examples:
///   config-facts deploy-config.yaml
///   config-facts --debug deploy-config.yaml
#[derive(Debug, Parser)]
#[command(name = "config-facts")]
#[command(version)]
#[command(about = "Extract deployment facts from a multi-document YAML configuration file")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Print help to stderr.
    #[arg(short, long)]
    help: bool,

    /// Print version to stderr.
    #[arg(short = 'V', long)]
    version: bool,

    /// Log every document decision to stderr.
    #[arg(long)]
    debug: bool,

    /// The deployment configuration file to read.
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Arguments after PATH are ignored.
    #[arg(hide = true, num_args = 0.., trailing_var_arg = true)]
    ignored: Vec<String>,
}

impl Cli {
    fn empty() -> Self {
        Self {
            help: false,
            version: false,
            debug: false,
            path: None,
            ignored: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
enum FactsCliError {
    #[error("failed to write facts to stdout: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    // Bad arguments are treated like a missing path so a record is still
    // printed.
    let (cli, parse_error) = match Cli::try_parse() {
        Ok(cli) => (cli, None),
        Err(e) => (Cli::empty(), Some(e)),
    };

    init_logging(cli.debug);
    if let Some(e) = parse_error {
        warn!("Ignoring invalid arguments: {}", e.render());
    }
    if !cli.ignored.is_empty() {
        warn!("Ignoring extra arguments: {:?}", cli.ignored);
    }

    if cli.help {
        eprintln!("{}", Cli::command().render_long_help());
    }
    if cli.version {
        eprint!("{}", Cli::command().render_version());
    }

    let facts = collect_facts(cli.path.as_deref(), &AggregateOptions::default());

    if let Err(e) = emit(&facts) {
        warn!("{}", e);
    }
}

/// Initializes stderr logging.
///
/// `RUST_LOG` is honored unless `--debug` forces the `debug` level; the
/// default level is `warn`. Stdout is reserved for the fact record.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Writes the fact record as a single JSON line on stdout.
fn emit(facts: &ConfigFacts) -> Result<(), FactsCliError> {
    let line = facts.to_json().unwrap_or_else(|e| {
        warn!("{}", e);
        FALLBACK_JSON.to_string()
    });

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}
