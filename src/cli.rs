// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   import-mapper repo <OWNER/NAME | URL> [--branch B]... [--token T] [--json]
//   import-mapper local <DIR> [--json]
//
// Global: -v/-vv/-vvv raises log verbosity (logs go to stderr).
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use import_mapper::config::{LoaderConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_ATTEMPTS};
use import_mapper::graph::GroupingMode;

#[derive(Parser, Debug)]
#[command(
    name = "import-mapper",
    version,
    about = "Map the file-level import graph of a GitHub repository or a local folder",
    long_about = "import-mapper downloads a repository (or reads a folder), finds every \
                  `import ... from \"...\"` line, resolves it to a file of the same tree and \
                  prints the resulting graph with a color per directory and a grid layout."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map a GitHub repository
    ///
    /// Example: import-mapper repo githubtraining/hellogitworld
    Repo {
        /// Repository as owner/name or https://github.com/owner/name
        repo: String,

        /// Candidate branch, tried in the order given (default: main, then master)
        #[arg(long = "branch", value_name = "BRANCH")]
        branches: Vec<String>,

        /// GitHub token sent as a bearer credential
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Attempts per request before giving up
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: u32,

        /// Maximum concurrent file downloads
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Milliseconds to wait between failed attempts
        #[arg(long, default_value_t = 0)]
        retry_delay_ms: u64,

        /// GitHub API root (for GitHub Enterprise)
        #[arg(long)]
        api_base: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Map a folder on disk
    ///
    /// Example: import-mapper local ./my-app --group-by file
    Local {
        /// Folder to read
        dir: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output the graph as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// How files are grouped for coloring
    #[arg(long, value_enum, default_value_t = GroupBy::Directory)]
    pub group_by: GroupBy,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One color per directory
    Directory,
    /// One color per file
    File,
}

impl From<GroupBy> for GroupingMode {
    fn from(value: GroupBy) -> Self {
        match value {
            GroupBy::Directory => GroupingMode::Directory,
            GroupBy::File => GroupingMode::File,
        }
    }
}

// Builds the loader configuration from the `repo` flags
pub fn loader_config(
    branches: Vec<String>,
    token: Option<String>,
    max_attempts: u32,
    concurrency: usize,
    retry_delay_ms: u64,
    api_base: Option<String>,
) -> LoaderConfig {
    let defaults = LoaderConfig::default();
    LoaderConfig {
        api_base: api_base.unwrap_or(defaults.api_base.clone()),
        max_attempts,
        concurrency,
        retry_delay: Duration::from_millis(retry_delay_ms),
        ..defaults
    }
    .with_branches(branches)
    .with_token(token)
}
