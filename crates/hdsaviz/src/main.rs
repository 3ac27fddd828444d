use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hdsaviz::commands::{OrderArg, run_inspect, run_summary, run_unused};
use hdsaviz::{App, AppState, Dataset, LogTarget, ViewerConfig, init_logging};
use hdsaviz_core::TableSource;

#[derive(Parser, Debug)]
#[command(name = "hdsaviz")]
#[command(about = "Browse Sobol sensitivity-analysis results in the terminal")]
struct Args {
    /// Viewer config file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the viewer log file (default: ~/.hdsaviz/)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive viewer (default)
    View {
        /// Dataset directory
        dir: Option<PathBuf>,
    },
    /// Print ranked first / total-order indices per output
    Summary {
        /// Dataset directory
        dir: Option<PathBuf>,
    },
    /// Print parameters whose index is zero for every output
    Unused {
        /// Dataset directory
        dir: Option<PathBuf>,

        /// Which index to check
        #[arg(long, value_enum, default_value_t = OrderArg::Total)]
        order: OrderArg,
    },
    /// Read a delimited file and print its shape and columns
    Inspect {
        file: PathBuf,

        /// Read at most this many data rows
        #[arg(long)]
        rows: Option<usize>,

        /// Columns to remove
        #[arg(long, num_args = 1..)]
        drop: Option<Vec<String>>,

        /// Field separator
        #[arg(long, default_value = ",")]
        sep: String,
    },
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hdsaviz")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::View { dir: None });

    // The viewer owns the terminal, so its logs go to a file
    let target = match command {
        Command::View { .. } => LogTarget::File(args.log_dir.unwrap_or_else(default_log_dir)),
        _ => LogTarget::Stderr,
    };
    init_logging(&target, &args.log_level)?;

    let config = ViewerConfig::load(args.config.as_deref())?;
    let mut stdout = std::io::stdout();

    match command {
        Command::View { dir } => {
            let dataset = Dataset::load(&config.resolve_data_dir(dir), &config)?;
            let mut app = App::new(AppState::new(dataset.results, &config));

            ratatui::run(|terminal| app.run(terminal))?;

            tracing::info!("Viewer shutting down");

            if let Err(err) = ratatui::try_restore() {
                tracing::error!("Failed to restore terminal: {err}");
            }
        }
        Command::Summary { dir } => {
            let dataset = Dataset::load(&config.resolve_data_dir(dir), &config)?;
            run_summary(&dataset, &config.bars, &mut stdout)?;
        }
        Command::Unused { dir, order } => {
            let dataset = Dataset::load(&config.resolve_data_dir(dir), &config)?;
            run_unused(&dataset.results, order.into(), &mut stdout)?;
        }
        Command::Inspect {
            file,
            rows,
            drop,
            sep,
        } => {
            let source = TableSource {
                path: file,
                separator: sep,
                row_limit: rows,
                drop,
            };
            run_inspect(&source, &mut stdout)?;
        }
    }

    Ok(())
}
