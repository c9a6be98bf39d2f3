//! CLI entry point for the greedy rectangle decomposition tool

use clap::Parser;
use greedyrect::io::cli::{Cli, FileProcessor};

fn main() -> greedyrect::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
