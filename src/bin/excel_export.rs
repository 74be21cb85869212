use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spinehead::export::{self, DEFAULT_PREFIX, ExportConfig};

/// Copy every table of each `{prefix}_{N}days.db` into `{prefix}_{N}days.xlsx`.
#[derive(Parser)]
#[command(name = "excel-export", version, about, long_about = None)]
struct Args {
    /// Directory holding the databases; workbooks are written next to them
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// File name prefix shared by databases and workbooks
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Day intervals to export, e.g. `--days 7 14 30`
    #[arg(
        long,
        env = "SPINEHEAD_DAYS",
        num_args = 1..,
        value_delimiter = ',',
        required = true
    )]
    days: Vec<u32>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = ExportConfig {
        directory: args.dir,
        prefix: args.prefix,
        intervals: args.days,
    };

    match export::run(&config) {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "{} ({} sheets)",
                    report.workbook.display(),
                    report.sheets.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
