//! XGraph CLI: encode, decode and inspect XGraph goal-tree blobs.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xgraph_codec::{CodecOptions, Endian};

use config::XGraphConfig;

#[derive(Parser)]
#[command(name = "xgraph", version, about = "XGraph goal-tree codec")]
struct Cli {
    /// Byte order (little, big); overrides xgraph.toml
    #[arg(long, global = true, value_parser = parse_endian)]
    endian: Option<Endian>,
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON tree description into a blob
    Encode {
        /// JSON file describing the tree
        input: PathBuf,
        /// Output blob path (default: xgraph.toml output.path, else data.bin)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a blob and print its tree
    Decode {
        /// Blob to decode
        input: PathBuf,
        /// Print the tree as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
    /// Show the header and checksum of a blob
    Inspect {
        /// Blob to inspect
        input: PathBuf,
    },
    /// Check a blob's checksum trailer
    Verify {
        /// Blob to verify
        input: PathBuf,
    },
    /// Write the built-in sample tree
    Sample {
        /// Output blob path (default: xgraph.toml output.path, else data.bin)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_endian(s: &str) -> Result<Endian, String> {
    match s {
        "little" | "le" => Ok(Endian::Little),
        "big" | "be" => Ok(Endian::Big),
        other => Err(format!("unknown byte order '{other}' (expected little or big)")),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, config_dir) = load_config_optional(&cwd)?;
    let options = CodecOptions::new(cli.endian.unwrap_or(config.codec.endian));

    match cli.command {
        Commands::Encode { input, output } => {
            let output = config.output_path(output.as_deref(), config_dir.as_deref(), &cwd);
            commands::encode::run(&input, &output, options)
        }
        Commands::Decode { input, json } => commands::decode::run(&input, json, options),
        Commands::Inspect { input } => commands::inspect::run(&input, options),
        Commands::Verify { input } => commands::verify::run(&input),
        Commands::Sample { output } => {
            let output = config.output_path(output.as_deref(), config_dir.as_deref(), &cwd);
            commands::sample::run(&output, options)
        }
    }
}

fn load_config_optional(cwd: &Path) -> anyhow::Result<(XGraphConfig, Option<PathBuf>)> {
    match XGraphConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((config, Some(dir))),
        None => Ok((XGraphConfig::default(), None)),
    }
}
