// src/main.rs
// =============================================================================
// Entry point of the import-mapper CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, filtered by -v or RUST_LOG)
// 3. Load the files (GitHub repository or local folder)
// 4. Build the import graph and print it
// 5. Exit with proper code (0 = graph printed, 1 = nothing to show, 2 = error)
//
// Progress messages go to stderr so `--json` output on stdout stays parseable.
// =============================================================================

mod cli;
mod report;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputArgs};
use import_mapper::config::LoaderConfig;
use import_mapper::github::{parse_repo_identifier, HttpTransport, LoadError, RepositoryLoader};
use import_mapper::graph::{self, FileRecord};
use import_mapper::local::load_local;
use report::{print_report, Report};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Repo {
            repo,
            branches,
            token,
            max_attempts,
            concurrency,
            retry_delay_ms,
            api_base,
            output,
        } => {
            let config = cli::loader_config(
                branches,
                token,
                max_attempts,
                concurrency,
                retry_delay_ms,
                api_base,
            );
            handle_repo_scan(&repo, config, output).await
        }
        Commands::Local { dir, output } => handle_local_scan(&dir, output).await,
    }
}

// -v count -> default filter; RUST_LOG wins when set
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Handles the 'repo' subcommand
async fn handle_repo_scan(
    input: &str,
    config: LoaderConfig,
    output: OutputArgs,
) -> Result<i32> {
    let repo = parse_repo_identifier(input)?;
    eprintln!("🔍 Loading GitHub repository: {}", repo);

    let transport = HttpTransport::new(config.token.clone(), config.timeout)
        .context("failed to create HTTP client")?;
    let loader = RepositoryLoader::new(transport, &config);

    let loaded = match loader.load(&repo.to_string()).await {
        Ok(loaded) => loaded,
        Err(error) => {
            print_empty_state(&error);
            return Ok(1);
        }
    };

    if loaded.truncated {
        eprintln!("⚠️  GitHub truncated the file listing; the graph may be incomplete");
    }

    let source = format!("{}@{}", loaded.repo, loaded.branch);
    render(&source, &loaded.files, output)
}

// Handles the 'local' subcommand
async fn handle_local_scan(dir: &Path, output: OutputArgs) -> Result<i32> {
    eprintln!("🔍 Reading folder: {}", dir.display());

    let files = load_local(dir)
        .await
        .with_context(|| format!("could not load {}", dir.display()))?;

    render(&dir.display().to_string(), &files, output)
}

// Builds the graph for a loaded file set and prints it
fn render(source: &str, files: &[FileRecord], output: OutputArgs) -> Result<i32> {
    if files.is_empty() {
        eprintln!("⚠️  No files found in {}", source);
        return Ok(1);
    }

    eprintln!("📄 Found {} file(s)", files.len());

    let graph = graph::build(files, output.group_by.into());
    let report = Report::new(source, &graph);
    print_report(&report, output.json)?;

    Ok(0)
}

// A failed load is shown as an empty state, not as a crash
fn print_empty_state(error: &LoadError) {
    match error {
        LoadError::NoBranchFound {
            branches,
            last_error,
            ..
        } => {
            eprintln!(
                "❌ No files to show: none of the branches [{}] has a file tree",
                branches.join(", ")
            );
            if let Some(error) = last_error {
                eprintln!("   last error: {}", error);
            }
        }
        LoadError::PartialLoad { failures, total, .. } => {
            eprintln!(
                "❌ No graph: {} of {} file(s) could not be downloaded",
                failures.len(),
                total
            );
            for failure in failures {
                eprintln!("   {}", failure);
            }
        }
        other => eprintln!("❌ No files to show: {}", other),
    }
}
