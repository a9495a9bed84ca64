mod commands;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::catalog::CatalogArgs;
use commands::decode::DecodeArgs;
use commands::samples::SamplesArgs;
use opts::GlobalOpts;

#[derive(Parser, Debug)]
#[command(name = "kip", version, about = "Kernel interaction protocol tools")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered discriminators
    Catalog(CatalogArgs),

    /// Decode line-delimited envelopes from a file or stdin
    Decode(DecodeArgs),

    /// Print the encoded sample corpus
    Samples(SamplesArgs),
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let opts = &cli.opts;

    match cli.command {
        Command::Catalog(args) => commands::catalog::cmd_catalog(opts, &args),
        Command::Decode(args) => commands::decode::cmd_decode(opts, &args),
        Command::Samples(args) => commands::samples::cmd_samples(opts, &args),
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env("KIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
