//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (command-line shell over the listing engine).
// CONTEXT: AppState owns the view composer and the settings; the commands
// module is the presentation boundary every front end goes through.

use engine::ViewComposer;
use std::sync::Mutex;

pub mod api_types;
pub mod cli;
pub mod commands;
pub mod data_source;
pub mod listing;
pub mod logging;
pub mod settings;

pub use api_types::{CategoryOption, ColumnHeader, ExportResult, LoadStatus, OrderRow, ViewData};
pub use data_source::{
    ConfiguredSource, DataSourceError, FileRecordSource, HttpRecordSource, RecordSource,
};
pub use logging::{init_log_file, next_seq, write_log};
pub use settings::Settings;

use clap::Parser;
use cli::{Cli, Command, ConfigArgs, ExportArgs, ListArgs, ViewArgs};

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    /// Record store, filters, sort and the derived view
    pub composer: Mutex<ViewComposer>,
    pub settings: Mutex<Settings>,
}

pub fn create_app_state() -> AppState {
    create_app_state_with(Settings::default())
}

pub fn create_app_state_with(settings: Settings) -> AppState {
    log_info!("SYS", "Creating AppState");
    AppState {
        composer: Mutex::new(ViewComposer::new()),
        settings: Mutex::new(settings),
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Parse the command line, run the command and return the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();

    let settings = effective_settings(&cli);
    init_logging(&settings, cli.verbose);
    log_info!("SYS", "shopdesk {} starting", env!("CARGO_PKG_VERSION"));

    // Printing the settings does not need the catalog
    let result = if let Command::Config(args) = &cli.command {
        run_config(&settings, args)
    } else {
        let state = create_app_state_with(settings);
        load(&state).and_then(|()| dispatch(&state, &cli.command))
    };

    match result {
        Ok(()) => 0,
        Err(error) => {
            log_error!("SYS", "{}", error);
            eprintln!("error: {error}");
            1
        }
    }
}

/// Settings file (or defaults) with the command-line overrides applied.
fn effective_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.config {
        Some(path) => settings::load_settings_from(path),
        None => settings::load_settings(),
    };
    if let Some(path) = &cli.source {
        settings.data_source.file = Some(path.clone());
    }
    if let Some(url) = &cli.url {
        settings.data_source.url = url.clone();
        settings.data_source.file = None;
    }
    if let Some(path) = &cli.log_file {
        settings.logging.log_file = Some(path.clone());
    }
    settings
}

fn init_logging(settings: &Settings, verbose: u8) {
    logging::set_console_echo(verbose > 0);
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    logging::install_log_bridge(level);

    match init_log_file(&settings.logging.log_path()) {
        Ok(path) => log_info!("SYS", "log={}", path.display()),
        Err(e) => eprintln!("[LOG_INIT] FAILED: {}, continuing without a log file", e),
    }
}

/// Fetch the catalog once. A failed fetch leaves the store in its error state.
fn load(state: &AppState) -> Result<(), String> {
    let source_settings = {
        let settings = state.settings.lock().map_err(|e| e.to_string())?;
        settings.data_source.clone()
    };
    let source = ConfiguredSource::from_settings(&source_settings).map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;

    let view = runtime.block_on(commands::load_records(state, &source))?;
    match view.load {
        LoadStatus::Error { message } => Err(format!("No data available: {}", message)),
        _ => Ok(()),
    }
}

fn dispatch(state: &AppState, command: &Command) -> Result<(), String> {
    match command {
        Command::List(args) => run_list(state, args),
        Command::Categories => run_categories(state),
        Command::Export(args) => run_export(state, args),
        Command::Config(args) => {
            let settings = state.settings.lock().map_err(|e| e.to_string())?.clone();
            run_config(&settings, args)
        }
    }
}

/// Apply the command-line filters, then the header clicks in order.
pub fn apply_view_args(state: &AppState, args: &ViewArgs) -> Result<ViewData, String> {
    let mut view = commands::set_criteria(state, args.criteria())?;
    for key in &args.sort {
        view = commands::set_sort(state, key.name())?;
    }
    Ok(view)
}

fn run_list(state: &AppState, args: &ListArgs) -> Result<(), String> {
    let view = apply_view_args(state, &args.view)?;
    if args.json {
        let json = serde_json::to_string_pretty(&view).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        listing::print_listing(&view);
    }
    Ok(())
}

fn run_categories(state: &AppState) -> Result<(), String> {
    let options = commands::get_categories(state)?;
    println!("{}", listing::categories_table(&options));
    Ok(())
}

fn run_export(state: &AppState, args: &ExportArgs) -> Result<(), String> {
    let view = apply_view_args(state, &args.view)?;
    println!("{}", view.summary_line());

    let dir = args.output_dir.as_deref();
    if args.format.spreadsheet() {
        let result = commands::export_spreadsheet(state, dir)?;
        println!("Spreadsheet: {} ({} rows)", result.path, result.rows);
    }
    if args.format.report() {
        let result = commands::export_report(state, dir)?;
        println!("Report: {} ({} rows)", result.path, result.rows);
    }
    Ok(())
}

fn run_config(settings: &Settings, args: &ConfigArgs) -> Result<(), String> {
    let content = toml::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    print!("{}", content);

    if args.save {
        let path = settings::save_settings(settings)?;
        println!("Saved settings to {}", path.display());
    }
    Ok(())
}
