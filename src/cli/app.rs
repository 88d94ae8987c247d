//! CLI definitions and entry point

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{self, Context};
use packwright::output::OutputMode;

/// packwright - Distribution ownership, packaging and lint orchestration
#[derive(Parser, Debug)]
#[command(
    name = "packwright",
    version,
    about = "Distribution ownership, packaging and lint orchestration",
    long_about = "Work with a monorepo described by per-directory BUILD.toml files.\n\n\
                  Each source target is owned by the closest ancestor distribution that\n\
                  depends on it. Distributions can be planned and laid out on disk, and\n\
                  configured linters and formatters run over targets in stable batches."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Build root (default: nearest ancestor with packwright.toml)
    #[arg(long, global = true, value_name = "DIR")]
    pub build_root: Option<PathBuf>,

    /// Extra options file, merged over packwright.toml (repeatable)
    #[arg(long = "config-file", global = true, value_name = "FILE")]
    pub config_files: Vec<PathBuf>,

    /// Set an option: `scope.name=value`, or `name=value` for global options (repeatable)
    #[arg(long = "option", global = true, value_name = "SCOPE.NAME=VALUE")]
    pub options: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the distribution owning each target or file
    Owners {
        /// Targets, directories (`dir:`, `dir::`) or files
        specs: Vec<String>,
    },

    /// Lay out distributions under the dist dir
    Package {
        /// Distribution addresses (default: every distribution)
        distributions: Vec<String>,
    },

    /// Show what a distribution would contain without writing anything
    Plan {
        /// Distribution addresses (default: every distribution)
        distributions: Vec<String>,
    },

    /// Run linters and formatters in check mode
    Lint {
        /// Only run these tools (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Do not run formatters
        #[arg(long)]
        skip_formatters: bool,

        /// Target number of files per tool invocation
        #[arg(long)]
        batch_size: Option<NonZeroUsize>,

        /// Targets, directories (`dir:`, `dir::`) or files
        specs: Vec<String>,
    },

    /// Run formatters, rewriting files
    Fmt {
        /// Only run these formatters (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Target number of files per tool invocation
        #[arg(long)]
        batch_size: Option<NonZeroUsize>,

        /// Targets, directories (`dir:`, `dir::`) or files
        specs: Vec<String>,
    },

    /// List targets
    List {
        /// Targets, directories (`dir:`, `dir::`) or files
        specs: Vec<String>,
    },

    /// Show version
    Version,
}

fn init_logging(verbose: bool) -> bool {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    builder.format_timestamp(None).format_target(false);
    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        builder.init();
        return false;
    }
    // Filter through the global max level so `[GLOBAL] level` can raise it later
    builder.filter_level(log::LevelFilter::Trace).init();
    log::set_max_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info });
    !verbose
}

/// Run the CLI, returning the process exit code
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let command = match cli.command {
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": packwright::VERSION
                    })
                );
            } else {
                println!("packwright v{}", packwright::VERSION);
            }
            return Ok(0);
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": packwright::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("packwright v{}", packwright::VERSION);
                println!("\nRun 'packwright --help' for usage");
            }
            return Ok(0);
        },
        Some(command) => command,
    };

    let configurable_level = init_logging(cli.verbose);
    let ctx = Context::load(cli.build_root, &cli.config_files, &cli.options)?;
    if let Some(level) = ctx.options.global.level.as_deref().filter(|_| configurable_level) {
        let filter: log::LevelFilter = level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid [GLOBAL] level `{level}`: expected one of off, error, warn, info, debug, trace"))?;
        log::set_max_level(filter);
    }
    log::debug!("Build root: {}", ctx.root.display());

    match command {
        Command::Owners { specs } => commands::owners(&ctx, &specs, output_mode),
        Command::Package { distributions } => commands::package(&ctx, &distributions, output_mode),
        Command::Plan { distributions } => commands::plan(&ctx, &distributions, output_mode),
        Command::Lint {
            only,
            skip_formatters,
            batch_size,
            specs,
        } => commands::lint(
            &ctx,
            &commands::GoalArgs {
                only,
                skip_formatters,
                batch_size,
            },
            &specs,
            output_mode,
        ),
        Command::Fmt {
            only,
            batch_size,
            specs,
        } => commands::fmt(
            &ctx,
            &commands::GoalArgs {
                only,
                skip_formatters: false,
                batch_size,
            },
            &specs,
            output_mode,
        ),
        Command::List { specs } => commands::list(&ctx, &specs, output_mode),
        Command::Version => Ok(0),
    }
}
