use std::io::{self, IsTerminal, Read};

use anyhow::Result;
use clap::Parser;
use signage_rust::{Orientation, PageSize};

#[derive(Parser, Debug)]
#[command(
    name = "signage-rust",
    version,
    about = "Render print-ready event signage sheets to PDF"
)]
struct Cli {
    /// Job file (JSON, or TOML by extension). Reads JSON from stdin when omitted.
    #[arg(short = 'j', long = "job")]
    job: Option<String>,

    /// Page size (A4 or A3); overrides the job file
    #[arg(short = 's', long = "size")]
    size: Option<PageSize>,

    /// Page orientation (portrait or landscape); overrides the job file
    #[arg(short = 'o', long = "orientation")]
    orientation: Option<Orientation>,

    /// Directory the PDF is written to (default: current directory)
    #[arg(short = 'd', long = "out-dir")]
    out_dir: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Also write a PNG preview of every page next to the PDF
    #[arg(long = "preview")]
    preview: bool,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    signage_rust::logging::init(cli.verbose)?;

    let input = if cli.job.is_none() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Some(buffer)
    } else {
        None
    };

    let output = signage_rust::run(
        signage_rust::Config {
            job_path: cli.job,
            size: cli.size,
            orientation: cli.orientation,
            out_dir: cli.out_dir,
            settings_path: cli.read_settings,
            preview: cli.preview,
        },
        input,
    )?;

    println!("{}", output.pdf_path.display());
    for preview in &output.previews {
        println!("{}", preview.display());
    }
    Ok(())
}
