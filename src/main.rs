use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use situations::Frontend;
use situations::core::config::{self, CliOverrides};
use situations::core::loader::load_dataset;
use situations::core::state::App;
use situations::{console, tui};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "situations",
    about = "Study USA Swimming stroke & turn situations and resolutions"
)]
struct Args {
    /// Spreadsheet (.xlsx, .xls, .ods) or CSV file with the situations
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Column that groups situations (default: Section, then Stroke)
    #[arg(long)]
    category_column: Option<String>,

    /// Worksheet to read (default: the first)
    #[arg(long)]
    sheet: Option<String>,

    /// Front end to run
    #[arg(long, default_value_t, value_enum)]
    ui: Frontend,

    /// Hide each resolution until it is revealed
    #[arg(long)]
    hide_resolution: bool,

    /// Seed for the random picker (repeatable shuffles)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let cli = CliOverrides {
        dataset_path: args.dataset,
        category_column: args.category_column,
        sheet: args.sheet,
        hide_resolution: args.hide_resolution,
        seed: args.seed,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to situations.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("situations.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("Warning: ignoring config file ({e}); using defaults");
    }

    log::info!(
        "Situations starting up with {:?} front end, dataset {}",
        args.ui,
        resolved.dataset_path.display()
    );

    let dataset = match load_dataset(&resolved.dataset_path, &resolved.load_options()) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to load dataset: {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = App::from_config(Arc::new(dataset), &resolved);
    let result = match args.ui {
        Frontend::Tui => tui::run(app),
        Frontend::Console => console::run(app, &resolved),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal I/O failed: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
