mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use specwright_core::config::FileConfigStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "specwright",
    about = "Scaffold and refresh AI assistant skills and slash commands for spec-driven changes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the global config.yaml (default: $XDG_CONFIG_HOME/specwright)
    #[arg(long, global = true, env = "SPECWRIGHT_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize specwright in a project and generate assistant artifacts
    Init {
        /// Project directory (default: current directory)
        path: Option<PathBuf>,

        /// Tools to configure: all, none, or a comma-separated list of ids
        #[arg(long)]
        tools: Option<String>,

        /// Regenerate everything and clean up legacy files without asking
        #[arg(long)]
        force: bool,

        /// Profile for this run only: core or custom
        #[arg(long)]
        profile: Option<String>,
    },

    /// Bring configured tools in line with the current profile and version
    Update {
        /// Project directory (default: auto-detect from specwright/ or .git/)
        path: Option<PathBuf>,

        /// Regenerate every artifact even when nothing has drifted
        #[arg(long)]
        force: bool,
    },

    /// Show which tools are configured and whether they are current
    Status {
        /// Project directory (default: auto-detect from specwright/ or .git/)
        path: Option<PathBuf>,
    },

    /// Inspect and modify the global config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// `RUST_LOG` when set and valid, otherwise warnings only.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let store = FileConfigStore::locate(cli.config_dir.as_deref())?;
    let prompter = prompt::TerminalPrompter;

    match cli.command {
        Commands::Init {
            path,
            tools,
            force,
            profile,
        } => {
            let opts = cmd::init::InitOptions {
                tools: tools.as_deref(),
                force,
                profile: profile.as_deref(),
                json: cli.json,
            };
            cmd::init::run(&root::init_root(path.as_deref()), &opts, &store, &prompter)
        }
        Commands::Update { path, force } => cmd::update::run(
            &root::resolve_root(path.as_deref()),
            force,
            cli.json,
            &store,
            &prompter,
        ),
        Commands::Status { path } => {
            cmd::status::run(&root::resolve_root(path.as_deref()), cli.json, &store)
        }
        Commands::Config { subcommand } => cmd::config::run(&store, subcommand, cli.json),
    }
}
