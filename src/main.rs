//! thriftdoc: resolve `:thrift:` cross-references in IDL documentation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use thriftdoc::cmd::{self, OutputFormat};
use thriftdoc::{Config, Diagnostic, DiagnosticLevel, LinkFormat, ui};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `thriftdoc=trace`
const LOG_ENV: &str = "THRIFTDOC_LOG";

#[derive(Parser)]
#[command(name = "thriftdoc")]
#[command(about = "Cross-reference resolver for Thrift IDL documentation")]
#[command(version)]
struct Cli {
    /// Path to thriftdoc config (TOML)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default thriftdoc.toml in the current directory
    Init {
        /// Overwrite existing config
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Resolve every reference in the docs directory
    #[command(visible_alias = "lint")]
    Check {
        /// Treat warnings as errors
        #[arg(short = 'W', long)]
        deny_warnings: bool,
    },

    /// Resolve a single role token, e.g. ":thrift:struct:`Work`"
    Resolve {
        token: String,
        /// Default module for unqualified targets
        #[arg(short, long)]
        module: Option<String>,
        /// Link format (defaults to render.format, else markdown)
        #[arg(long, value_enum)]
        format: Option<LinkFormat>,
    },

    /// Write docs to the output directory with references replaced by links
    #[command(visible_alias = "gen")]
    Render {
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
        /// Link format (defaults to render.format, else each document's own syntax)
        #[arg(long, value_enum)]
        format: Option<LinkFormat>,
    },

    /// Write one reference page per IDL module into the output directory
    Pages {
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the alphabetical symbol index
    Index {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "thriftdoc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_ansi(supports_color::on(supports_color::Stream::Stderr).is_some())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let result = run(&cli);

    match result {
        Ok(diags) => {
            let has_errors = diags.iter().any(|d| d.level == DiagnosticLevel::Error);
            let has_warnings = diags.iter().any(|d| d.level == DiagnosticLevel::Warning);

            for diag in &diags {
                ui::diagnostic(diag);
            }

            if has_errors {
                ExitCode::FAILURE
            } else if has_warnings
                && matches!(
                    cli.command,
                    Commands::Check {
                        deny_warnings: true
                    }
                )
            {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Vec<Diagnostic>> {
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Init { force } => cmd::init::init_project(&config, *force),
        Commands::Check { deny_warnings: _ } => cmd::check::check_all(&config),
        Commands::Resolve {
            token,
            module,
            format,
        } => cmd::resolve::resolve_one(&config, token, module.as_deref(), *format),
        Commands::Render { dry_run, format } => cmd::render::render(&config, *dry_run, *format),
        Commands::Pages { dry_run } => cmd::pages::write_pages(&config, *dry_run),
        Commands::Index { output } => cmd::index::index(&config, *output),
    }
}
