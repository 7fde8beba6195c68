#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AnalysisError, AppError, UploadError};
pub use models::scan_types::{AnalysisState, Category, ResultRecord, SelectedFile, SessionSnapshot};
pub use services::analysis::Analyzer;
pub use services::classifier::simulated::SimulatedClassifier;
pub use services::classifier::Classifier;
pub use services::session::{Session, GENERIC_FAILURE_MESSAGE};
pub use services::session_manager::SessionManager;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use log::{info, warn};
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir()?;
            if !app_data_dir.exists() {
                std::fs::create_dir_all(&app_data_dir)?;
            }

            let config = AppConfig::load(&app_data_dir.join(config::SETTINGS_FILE))
                .unwrap_or_else(|e| {
                    warn!("{}, falling back to defaults", e);
                    AppConfig::default()
                });
            info!(
                "Starting with {} preselected, simulated latency {:?}",
                config.default_category,
                config.analysis_latency()
            );

            app.manage(SessionManager::new(config.default_category));
            app.manage(Analyzer::simulated(config.analysis_latency()));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::scan::get_session,
            commands::scan::list_categories,
            commands::scan::select_category,
            commands::scan::submit_file,
            commands::scan::open_scan,
            commands::scan::analyze_scan,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
