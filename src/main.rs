//! nuget-bom: software bills of materials from NuGet lock manifests

use anyhow::{bail, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use nuget_bom::config::{generate_example_config, CliOverrides};
use nuget_bom::{AppConfig, BomGenerator, OutputFormat, SourceType};
use std::io::{self, Write as _};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nuget-bom")]
#[command(version)]
#[command(about = "Generate a CycloneDX SBOM from a NuGet project.assets.json", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Inventory of a restored project
    nuget-bom generate --in obj/project.assets.json --out target/

    # Resolve with 8 workers against a mirror configured in .nuget-bom.yaml
    nuget-bom generate --in obj/project.assets.json --out target/ --jobs 8")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Config file (default: discovered .nuget-bom.yaml)
    #[arg(short, long, global = true, env = "NUGET_BOM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every package in a lock manifest and write the SBOM
    Generate(GenerateArgs),

    /// Print an example configuration file
    ExampleConfig,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Lock manifest to read
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Existing directory the document is written into
    #[arg(long = "out", value_name = "DIR")]
    output: PathBuf,

    /// Kind of lock manifest
    #[arg(long, value_enum, default_value_t = SourceType::V3AssetsJson)]
    source_type: SourceType,

    /// Number of parallel resolution workers
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Flat-container base URL
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Document encoding
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file name inside the output directory
    #[arg(long, value_name = "NAME")]
    file_name: Option<String>,

    /// Write without indentation
    #[arg(long)]
    compact: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.registry.clone(),
            timeout_secs: self.timeout,
            jobs: self.jobs,
            format: self.format,
            file_name: self.file_name.clone(),
            pretty: self.compact.then_some(false),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Generate(args) => run_generate(cli.config, &args),

        Commands::ExampleConfig => {
            io::stdout()
                .write_all(generate_example_config().as_bytes())
                .context("failed to write example config")?;
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "nuget-bom", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_generate(config_path: Option<PathBuf>, args: &GenerateArgs) -> Result<()> {
    if let Some(path) = &config_path {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
    }

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(config_path.as_deref(), &args.overrides());
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    BomGenerator::new(&args.input, &args.output)
        .with_source_type(args.source_type)
        .with_config(config)
        .run()
        .with_context(|| format!("failed to generate SBOM for {}", args.input.display()))?;
    Ok(())
}
