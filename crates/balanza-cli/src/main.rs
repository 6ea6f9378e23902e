mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "balanza",
    version,
    about = "Extract balance-sheet line items from bank PDFs into date-indexed CSV series"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and reconcile a single balance sheet
    Extract {
        /// Path to the balance-sheet PDF
        pdf_file: PathBuf,

        /// Custom JSON layout file (default: built-in "continental")
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Read the PDF as-is, without the orientation check
        #[arg(long)]
        no_rotate: bool,

        /// Where a rotated copy is written (default: next to the PDF)
        #[arg(long, value_name = "DIR")]
        target_dir: Option<PathBuf>,
    },
    /// Process every PDF in a directory and write the four CSV datasets
    Batch {
        /// Directory holding YYYY_MM.pdf files
        input_dir: PathBuf,

        /// Directory the CSV datasets are written to
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Run configuration with the denylist (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Custom JSON layout file; overrides the run configuration
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Write the per-document report as JSON
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Output format for the report: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Write a landscape copy of a portrait PDF and print its path
    Orient {
        /// Path to the PDF
        pdf_file: PathBuf,

        /// Where the rotated copy is written (default: next to the PDF)
        #[arg(long, value_name = "DIR")]
        target_dir: Option<PathBuf>,
    },
    /// Inspect and validate sheet layouts
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print a built-in layout as JSON
    Show {
        /// Preset name
        #[arg(short, long, default_value = "continental")]
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            pdf_file,
            layout,
            output,
            no_rotate,
            target_dir,
        } => commands::extract::run(pdf_file, layout, &output, no_rotate, target_dir),
        Commands::Batch {
            input_dir,
            out_dir,
            config,
            layout,
            report,
            output,
        } => match commands::batch::run(input_dir, out_dir, config, layout, report, &output) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(2),
            Err(e) => Err(e),
        },
        Commands::Orient {
            pdf_file,
            target_dir,
        } => commands::orient::run(pdf_file, target_dir),
        Commands::Layout { action } => match action {
            LayoutAction::Show { preset } => commands::layout::show(&preset),
            LayoutAction::Validate { file } => commands::layout::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
