//! Application entry point: English Tool.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the [`tokio`] runtime (one worker; requests run one at a time).
//! 4. Build the [`Session`] around a [`GeminiClient`].
//! 5. Create channels and spawn the [`TaskRunner`].
//! 6. Run [`eframe::run_native`], which blocks until the window is closed.

use std::sync::Arc;

use eframe::egui;
use english_tool::{
    app::{install_thai_font, EnglishToolApp},
    config::AppConfig,
    llm::{GeminiClient, ModelClient},
    pipeline::{TaskCommand, TaskEvent, TaskRunner},
    task::Session,
};
use tokio::sync::mpsc;

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("English Tool")
        .with_inner_size([width, height])
        .with_min_inner_size([480.0, 360.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("English Tool starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Session
    let model: Arc<dyn ModelClient> = Arc::new(GeminiClient::from_config(&config.llm));
    log::info!("model: {} via {}", config.llm.model, config.llm.base_url);
    let session = Session::new(model);

    // 5. Channels + runner
    let (command_tx, command_rx) = mpsc::unbounded_channel::<TaskCommand>();
    let (event_tx, event_rx) = mpsc::channel::<TaskEvent>(16);
    rt.spawn(TaskRunner::new(session).run(command_rx, event_tx));

    // 6. UI (blocks until the window is closed)
    let app = EnglishToolApp::new(command_tx, event_rx, &config);
    let font_path = config.ui.font_path.clone();

    eframe::run_native(
        "English Tool",
        native_options(&config),
        Box::new(move |cc| {
            install_thai_font(&cc.egui_ctx, font_path.as_deref());
            Ok(Box::new(app))
        }),
    )
}
