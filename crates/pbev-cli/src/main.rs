mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use pbev_core::config::DEFAULT_INPUT;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pbev",
    version,
    about = "Extract the PBEV vehicle efficiency tables from the published PDF into xlsx and CSV",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    extract: ExtractArgs,
}

#[derive(Args)]
struct ExtractArgs {
    /// Path to the PBEV PDF
    #[arg(default_value = DEFAULT_INPUT)]
    input_file: PathBuf,

    /// Directory for the xlsx and CSV files (created if missing)
    #[arg(short, long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON column schema replacing the built-in one
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and classify table rows only, printing the kept raw rows as JSON
    Rows {
        /// Path to the PBEV PDF
        input_file: PathBuf,

        /// Write the rows to a JSON file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Debug logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the built-in column schema, or validate a schema file
    Schema {
        /// Path to JSON schema file
        #[arg(long, value_name = "FILE")]
        validate: Option<PathBuf>,
    },
    /// Print the code legend
    Legend,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
        builder.parse_env("RUST_LOG");
    }
    // Only fails if a logger is already installed.
    builder.try_init().ok();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Rows {
            input_file,
            out,
            config,
            verbose,
        }) => {
            init_logging(verbose);
            commands::rows::run(input_file, out, config)
        }
        Some(Commands::Schema { validate }) => {
            init_logging(false);
            match validate {
                Some(file) => commands::schema::validate(&file),
                None => commands::schema::print(),
            }
        }
        Some(Commands::Legend) => commands::legend::print(),
        None => {
            let args = cli.extract;
            init_logging(args.verbose);
            commands::extract::run(args.input_file, args.output_dir, args.config, args.schema)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
