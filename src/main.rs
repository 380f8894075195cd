//! dischord — render MML notation to a WAV file or raw PCM.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dischord::{audio, tokenize, RenderConfig};

#[derive(Parser)]
#[command(name = "dischord")]
#[command(author, version, about = "Render MML notation to audio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render MML to a WAV file (or raw 16-bit PCM with --raw)
    Render(RenderArgs),

    /// Print the token stream the interpreter will see
    Tokens(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// MML source text; omit or pass `-` to read stdin
    source: Option<String>,

    /// Read MML source from a file
    #[arg(short, long, conflicts_with = "source")]
    file: Option<PathBuf>,
}

impl SourceArgs {
    fn read(&self) -> Result<String> {
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        match self.source.as_deref() {
            Some("-") | None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                Ok(buf)
            }
            Some(src) => Ok(src.to_string()),
        }
    }
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    input: SourceArgs,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Sample rate in Hz (overrides config)
    #[arg(long)]
    rate: Option<u32>,

    /// White-noise seed for repeatable renders (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Write headerless little-endian PCM instead of WAV
    #[arg(long)]
    raw: bool,

    /// Config file (default: ~/.dischord/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(RenderConfig::load().unwrap_or_default()),
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(rate) = args.rate {
        config.sample_rate = rate;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let source = args.input.read()?;
    config.check_source(&source)?;

    let composer = config.composer();
    let pcm = composer.compose(&source);
    if config.max_samples().is_some_and(|max| pcm.len() >= max) {
        warn!(
            max_secs = ?config.max_duration_secs,
            "render reached the duration limit and was truncated"
        );
    }

    if args.raw {
        std::fs::write(&args.output, audio::to_le_bytes(&pcm))
            .with_context(|| format!("failed to write {}", args.output.display()))?;
    } else {
        audio::write_wav(&args.output, &pcm, composer.sample_rate())
            .with_context(|| format!("failed to write {}", args.output.display()))?;
    }

    info!(
        samples = pcm.len(),
        seconds = pcm.len() as f64 / composer.sample_rate().max(1) as f64,
        sample_rate = composer.sample_rate(),
        output = %args.output.display(),
        "rendered"
    );
    Ok(())
}

fn print_tokens(args: SourceArgs) -> Result<()> {
    let source = args.read()?;
    for token in tokenize(&source) {
        println!("{:>6}  {:<14} {:?}", token.offset, token.kind.label(), token.kind);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Tokens(args) => print_tokens(args),
    }
}
