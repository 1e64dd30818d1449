use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use log::{error, info};

use latency_hist::{
    app::{self, Chart},
    constants::{ATOMIC_DEFAULT_FILE, SEM_DEFAULT_FILE},
    error::PlotResult,
    record::{self, AtomicRecord, SemRecord},
    ui,
};

/// Latency histograms for synchronization benchmark logs.
#[derive(Parser)]
#[command(name = "latency_hist", version, about)]
struct Cli {
    #[command(subcommand)]
    log: LogKind,

    /// Print a text summary instead of opening the terminal display.
    #[arg(long, short = 's', global = true)]
    summary: bool,

    /// Enable debug logging.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum LogKind {
    /// `<series> <value>` lock log, one overlaid chart.
    Atomic {
        /// Log file to read.
        #[arg(long, short = 'i', default_value = ATOMIC_DEFAULT_FILE)]
        input: PathBuf,
    },
    /// `<kernel> <uncontended> <wait_timeout> <trywait>` semaphore log, one chart per metric.
    Sem {
        /// Log file to read.
        #[arg(long, short = 'i', default_value = SEM_DEFAULT_FILE)]
        input: PathBuf,
    },
}

fn build_charts(log: &LogKind) -> PlotResult<Vec<Chart>> {
    match log {
        LogKind::Atomic { input } => {
            let store = record::load::<AtomicRecord>(input)?;
            app::atomic_charts(&store)
        }
        LogKind::Sem { input } => {
            let store = record::load::<SemRecord>(input)?;
            app::sem_charts(&store)
        }
    }
}

fn run(cli: &Cli) -> PlotResult<()> {
    let charts = build_charts(&cli.log)?;
    info!("planned {} chart(s)", charts.len());

    if cli.summary {
        print!("{}", ui::summary(&charts));
        Ok(())
    } else {
        ui::run(&charts)?;
        info!("display closed");
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
