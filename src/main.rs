//! Student Roster - desktop student roster manager.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;
use student_roster as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::storage::{FileStorage, MemoryStorage, Storage};
use app::ui::App;

/// Desktop student roster manager with search, sort, and bulk actions.
#[derive(Parser)]
#[command(name = "student-roster")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the data directory holding the persisted roster
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Student Roster starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded from {:?}", config_path);
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("No config file, using defaults");
            AppConfig::default()
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            AppConfig::default()
        }
    };

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());
    tracing::info!("Data directory: {:?}", data_dir);

    // Storage is best-effort: when the backend cannot be created the session
    // runs in memory only and nothing persists.
    let storage: Arc<dyn Storage> = match FileStorage::new(data_dir) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::error!("Storage unavailable, continuing in memory: {}", e);
            Arc::new(MemoryStorage::new())
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Roster")
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Roster",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(cc, config, storage, rt)))
        }),
    )
}
