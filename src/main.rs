use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use swood_export::cli;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swood-export")]
#[command(about = "Export the material catalog workbook to Optiplanning and SWOOD import files")]
#[command(long_about = "swood-export - material catalog to Optiplanning / SWOOD

EXPORT TYPES:
  txt         - Optiplanning material list (tab-delimited)
  nesting     - SWOOD Nesting board list (XML)
  materials   - SWOOD materials and edgebands catalog (XML)
  edgebands   - SWOOD edgebands catalog (XML)

The output file is written next to the workbook unless --output-dir is given,
named with the export prefix and a YYYYMMDD_HHMMSS timestamp.

EXAMPLES:
  swood-export Outil_Material_Import.xlsm                 # Optiplanning TXT
  swood-export Outil_Material_Import.xlsm materials
  swood-export catalog.xlsm nesting -o ./exports --json")]
#[command(version)]
struct Cli {
    /// Catalog workbook (.xlsx / .xlsm)
    workbook: PathBuf,

    /// Export type: txt, nesting, materials, edgebands
    #[arg(default_value = "txt")]
    export_type: String,

    /// Directory for the output file (default: the workbook's folder)
    #[arg(short, long, env = "SWOOD_EXPORT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Log debug details (block changes per column, unresolved references)
    #[arg(short, long)]
    verbose: bool,

    /// Print the export report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "swood_export=debug"
    } else {
        "swood_export=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::export(
        &cli.workbook,
        &cli.export_type,
        cli.output_dir.as_deref(),
        cli.json,
    ) {
        Ok(Some(_)) => ExitCode::SUCCESS,
        Ok(None) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
