use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use swagflow::config::{Config, Overrides};
use swagflow::Generation;

#[derive(Parser)]
#[command(name = "swagflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate Flow type declarations from OpenAPI and Swagger documents", long_about = None)]
struct Cli {
    /// Document path or http(s) URL (JSON or YAML)
    input: String,

    /// Output file path
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Render object types as exact (`{| |}`)
    #[arg(short, long)]
    exact: bool,

    /// Append to every type name
    #[arg(long)]
    suffix: Option<String>,

    /// Prepend to every type name
    #[arg(long)]
    prefix: Option<String>,

    /// Convert property names to lowerCamelCase
    #[arg(short, long)]
    lower_camel_case: bool,

    /// Mark properties missing from `required` as optional
    #[arg(short, long)]
    check_required: bool,

    /// Also generate types for titled response bodies
    #[arg(short, long)]
    responses: bool,

    /// Do not render `nullable` properties as maybe types
    #[arg(long)]
    ignore_nullable: bool,

    /// Config file (TOML), defaults to `.swagflow.toml` when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip prettier and write the output as generated
    #[arg(long)]
    no_format: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug) // Show target module in debug mode
        .init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::discover(cli.config.as_deref(), &std::env::current_dir()?)?;
    let prettier = config
        .prettier
        .clone()
        .unwrap_or_else(|| PathBuf::from("prettier"));

    let (options, destination) = config.merge(Overrides {
        destination: cli.destination,
        exact: cli.exact,
        suffix: cli.suffix,
        prefix: cli.prefix,
        lower_camel_case: cli.lower_camel_case,
        check_required: cli.check_required,
        responses: cli.responses,
        ignore_nullable: cli.ignore_nullable,
    });

    let mut generation = Generation::new(cli.input, options);
    generation.destination = destination;
    generation.prettier = (!cli.no_format).then_some(prettier);

    generation.run().await?;
    Ok(())
}
