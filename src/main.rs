//! CLI entry point for the slicing-tree collage builder

use clap::Parser;
use tracing_subscriber::EnvFilter;
use treecollage::io::cli::{Cli, CollageProcessor};

fn main() -> treecollage::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = CollageProcessor::new(cli);
    processor.process().map(|_| ())
}
