use std::path::PathBuf;

use clap::Parser;

/// Terminal relationship matrix for a novel manuscript: toggle which plot
/// lines, characters, locations, and items appear in each section.
#[derive(Parser)]
#[command(name = "plotgrid", version, about)]
struct Cli {
    /// Path to the manuscript document (JSON)
    document: PathBuf,

    /// Open the matrix without editing: toggle gestures are ignored
    #[arg(long)]
    read_only: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = plotgrid::tui::run(&cli.document, cli.read_only) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
