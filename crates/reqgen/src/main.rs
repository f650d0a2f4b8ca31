//! CLI for `reqgen`.
//!
//! # Subcommands
//!
//! ```text
//! # Render TypeScript request functions
//! reqgen generate --input openapi.yaml --output src/api/requests.ts
//!
//! # With a project config and a flag override
//! reqgen generate -i openapi.json -c reqgen.yaml --error-type ApiError
//!
//! # Dump the resolved operations and named shapes as JSON
//! reqgen inspect --input openapi.yaml
//! ```

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use reqgen::ProjectConfig;
use tracing_subscriber::EnvFilter;

/// TypeScript request-action generator for OpenAPI documents.
#[derive(Parser)]
#[command(name = "reqgen", version, about)]
enum Cli {
    /// Render request functions and shared types as TypeScript.
    Generate(GenerateArgs),

    /// Print the resolved operations and definitions as pretty JSON.
    ///
    /// Useful for checking how parameters were grouped and which names the
    /// registry handed out before rendering anything.
    Inspect(InspectArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Path to the API description (JSON or YAML).
    #[arg(short, long)]
    input: PathBuf,

    /// Write the TypeScript here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a project config file (YAML, JSON or TOML).
    ///
    /// CLI flags override values from the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Factory wrapping GET operations.
    /// Overrides `hook_factory` from the config file.
    #[arg(long)]
    hook_factory: Option<String>,

    /// Request function for every other method.
    /// Overrides `client_request` from the config file.
    #[arg(long)]
    client_request: Option<String>,

    /// Error type parameter of the hook factory.
    /// Overrides `error_type` from the config file.
    #[arg(long)]
    error_type: Option<String>,
}

#[derive(Parser)]
struct InspectArgs {
    /// Path to the API description (JSON or YAML).
    #[arg(short, long)]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli {
        Cli::Generate(args) => run_generate(&args),
        Cli::Inspect(args) => run_inspect(&args),
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            eprintln!("Loading config: {}", path.display());
            ProjectConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => ProjectConfig::default(),
    };

    // CLI overrides
    if let Some(factory) = &args.hook_factory {
        config.hook_factory.clone_from(factory);
    }
    if let Some(request) = &args.client_request {
        config.client_request.clone_from(request);
    }
    if let Some(error_type) = &args.error_type {
        config.error_type.clone_from(error_type);
    }

    let text = read_input(&args.input)?;
    eprintln!("Generating requests from {}...", args.input.display());
    let source = reqgen::generate(&text, &config)
        .with_context(|| format!("Failed to generate from {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            fs::write(path, source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{source}"),
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let document = reqgen::load_document(&text)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    let resolution = reqgen_core::resolve_document(&document)
        .with_context(|| format!("Failed to resolve {}", args.input.display()))?;

    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
