//! English Tool window: egui/eframe application.
//!
//! # Architecture
//!
//! [`EnglishToolApp`] is the top-level [`eframe::App`].  It owns the UI state
//! (credential field, two tab panels) and two channel endpoints:
//!
//! * `command_tx`: sends [`TaskCommand`]s to the [`TaskRunner`](crate::pipeline::TaskRunner).
//! * `event_rx`: receives [`TaskEvent`]s back from it.
//!
//! # Layout
//!
//! | Area | Content |
//! |------|---------|
//! | Left side panel | "Configuration": masked Gemini API key, model, export folder |
//! | Tab "Translate to Thai" | input, Submit, translation + CSV download |
//! | Tab "Grammar Checker" | input, Check Grammar, error table + CSV download |

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::pipeline::{Panel, PanelState, TaskCommand, TaskEvent};
use crate::view::{Notice, Presentation, Tone};

/// Fonts probed for Thai glyphs when `ui.font_path` is unset.
const THAI_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/truetype/tlwg/Garuda.ttf",
    "/usr/share/fonts/truetype/tlwg/Loma.ttf",
    "/System/Library/Fonts/Supplemental/Tahoma.ttf",
    "/Library/Fonts/Tahoma.ttf",
    "C:\\Windows\\Fonts\\LeelawUI.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
];

// ---------------------------------------------------------------------------
// PanelView: one tab's UI state
// ---------------------------------------------------------------------------

struct PanelView {
    panel: Panel,
    input: String,
    state: PanelState,
    /// Outcome of the last "Download" click.
    export_notice: Option<Notice>,
}

impl PanelView {
    fn new(panel: Panel, input: &str) -> Self {
        Self {
            panel,
            input: input.to_string(),
            state: PanelState::Idle,
            export_notice: None,
        }
    }

    /// Hand the current input to the runner and enter `Busy`.
    fn submit(&mut self, command_tx: &mpsc::UnboundedSender<TaskCommand>) {
        let cmd = match self.panel {
            Panel::Translate => TaskCommand::Translate(self.input.clone()),
            Panel::Grammar => TaskCommand::CheckGrammar(self.input.clone()),
        };
        self.export_notice = None;
        self.state = match command_tx.send(cmd) {
            Ok(()) => PanelState::Busy,
            Err(_) => {
                log::error!("ui: task runner is gone");
                PanelState::Done(Presentation {
                    notices: vec![Notice::error("Error: background worker stopped")],
                    ..Presentation::default()
                })
            }
        };
    }
}

/// Send the current key to the runner.  Returns `false` if the runner is gone.
fn forward_credential(command_tx: &mpsc::UnboundedSender<TaskCommand>, key: &str) -> bool {
    match command_tx.send(TaskCommand::SetCredential(key.to_string())) {
        Ok(()) => true,
        Err(_) => {
            log::error!("ui: task runner is gone, credential not applied");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// EnglishToolApp
// ---------------------------------------------------------------------------

/// eframe application: the English Tool window.
pub struct EnglishToolApp {
    /// Contents of the masked credential field.
    api_key: String,
    active: Panel,
    translate: PanelView,
    grammar: PanelView,

    model_name: String,
    export_dir: PathBuf,

    command_tx: mpsc::UnboundedSender<TaskCommand>,
    event_rx: mpsc::Receiver<TaskEvent>,
}

impl EnglishToolApp {
    /// Create the app.  A credential found in the environment or config is
    /// forwarded to the runner immediately.
    pub fn new(
        command_tx: mpsc::UnboundedSender<TaskCommand>,
        event_rx: mpsc::Receiver<TaskEvent>,
        config: &AppConfig,
    ) -> Self {
        let api_key = config.initial_api_key().unwrap_or_default();
        if !api_key.is_empty() {
            forward_credential(&command_tx, &api_key);
        }

        Self {
            api_key,
            active: Panel::Translate,
            translate: PanelView::new(Panel::Translate, &config.ui.default_input),
            grammar: PanelView::new(Panel::Grammar, &config.ui.default_input),
            model_name: config.llm.model.clone(),
            export_dir: config.export.resolve_dir(),
            command_tx,
            event_rx,
        }
    }

    /// Drain all finished requests (non-blocking).
    fn poll_events(&mut self) {
        while let Ok(TaskEvent::Finished {
            panel,
            presentation,
        }) = self.event_rx.try_recv()
        {
            log::debug!("ui: {} finished", panel.title());
            let view = match panel {
                Panel::Translate => &mut self.translate,
                Panel::Grammar => &mut self.grammar,
            };
            view.state = PanelState::Done(presentation);
        }
    }

    fn is_busy(&self) -> bool {
        self.translate.state.is_busy() || self.grammar.state.is_busy()
    }

    fn draw_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Configuration");
        ui.add_space(8.0);

        ui.label("Gemini API Key");
        let response = ui
            .add(
                egui::TextEdit::singleline(&mut self.api_key)
                    .password(true)
                    .hint_text("Enter your Google Gemini API key"),
            );
        if response.changed() {
            forward_credential(&self.command_tx, &self.api_key);
        }

        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(format!("Model: {}", self.model_name))
                .color(egui::Color32::from_rgb(140, 140, 140))
                .size(11.0),
        );
        ui.label(
            egui::RichText::new(format!("CSV folder: {}", self.export_dir.display()))
                .color(egui::Color32::from_rgb(140, 140, 140))
                .size(11.0),
        );
    }
}

// ---------------------------------------------------------------------------
// Panel rendering
// ---------------------------------------------------------------------------

fn draw_panel(
    view: &mut PanelView,
    ui: &mut egui::Ui,
    command_tx: &mpsc::UnboundedSender<TaskCommand>,
    export_dir: &Path,
) {
    let panel = view.panel;

    ui.label(panel.input_label());
    ui.add(
        egui::TextEdit::multiline(&mut view.input)
            .desired_rows(8)
            .desired_width(f32::INFINITY),
    );

    ui.add_space(4.0);
    if ui
        .add_enabled(!view.state.is_busy(), egui::Button::new(panel.submit_label()))
        .clicked()
    {
        view.submit(command_tx);
    }
    ui.add_space(8.0);

    match &view.state {
        PanelState::Idle => {}
        PanelState::Busy => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(panel.busy_label());
            });
        }
        PanelState::Done(presentation) => {
            if let Some(title) = &presentation.title {
                ui.heading(title.as_str());
            }
            if let Some(heading) = &presentation.heading {
                ui.label(egui::RichText::new(heading.as_str()).strong().size(16.0));
            }
            for notice in &presentation.notices {
                draw_notice(ui, notice);
            }
            if let Some(table) = &presentation.table {
                ui.add_space(4.0);
                egui::ScrollArea::horizontal()
                    .id_salt("error_table")
                    .show(ui, |ui| {
                        egui::Grid::new("error_grid")
                            .striped(true)
                            .num_columns(table.headers.len())
                            .show(ui, |ui| {
                                for header in &table.headers {
                                    ui.strong(header);
                                }
                                ui.end_row();
                                for row in &table.rows {
                                    for cell in row {
                                        ui.label(cell);
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            }
            if let Some(download) = &presentation.download {
                ui.add_space(8.0);
                if ui.button(download.label.as_str()).clicked() {
                    view.export_notice = Some(match download.save_in(export_dir) {
                        Ok(path) => Notice::info(format!("Saved {}", path.display())),
                        Err(e) => {
                            log::warn!("export failed: {e:#}");
                            Notice::error(format!("Error: {e:#}"))
                        }
                    });
                }
            }
        }
    }

    if let Some(notice) = &view.export_notice {
        ui.add_space(4.0);
        draw_notice(ui, notice);
    }
}

fn draw_notice(ui: &mut egui::Ui, notice: &Notice) {
    let (fill, text) = match notice.tone {
        Tone::Success => (
            egui::Color32::from_rgb(28, 60, 40),
            egui::Color32::from_rgb(80, 200, 120),
        ),
        Tone::Info => (
            egui::Color32::from_rgb(28, 44, 72),
            egui::Color32::from_rgb(110, 170, 255),
        ),
        Tone::Error => (
            egui::Color32::from_rgb(72, 34, 28),
            egui::Color32::from_rgb(255, 136, 68),
        ),
    };

    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(notice.text.as_str()).color(text));
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// Add a Thai-capable font as a fallback for both font families.
///
/// Uses `configured` when set, otherwise the first existing
/// [`THAI_FONT_CANDIDATES`] entry.  Missing fonts only log a warning; Thai
/// text then renders as boxes.
pub fn install_thai_font(ctx: &egui::Context, configured: Option<&Path>) {
    let path = match configured {
        Some(p) => Some(p.to_path_buf()),
        None => first_existing(THAI_FONT_CANDIDATES),
    };
    let Some(path) = path else {
        log::warn!("no Thai font found; set ui.font_path in settings.toml");
        return;
    };

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("cannot read font {}: {e}", path.display());
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("thai".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("thai".to_owned());
    }
    ctx.set_fonts(fonts);
    log::info!("Thai font loaded: {}", path.display());
}

fn first_existing(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for EnglishToolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        // Keep polling the runner while a request is in flight.
        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("configuration")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| self.draw_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for panel in [Panel::Translate, Panel::Grammar] {
                    ui.selectable_value(&mut self.active, panel, panel.title());
                }
            });
            ui.separator();

            let view = match self.active {
                Panel::Translate => &mut self.translate,
                Panel::Grammar => &mut self.grammar,
            };
            egui::ScrollArea::vertical().show(ui, |ui| {
                draw_panel(view, ui, &self.command_tx, &self.export_dir);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("English Tool closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
