use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, TryRecvError},
};

use egui::{menu::menu_button, Key, KeyboardShortcut, Modifiers};

use crate::{
    errors::ParseError,
    event::deliver,
    parser::{parse_file_async, ParseResult},
    table::RecordTable,
    window_state::ViewerConfig,
};

const OPEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const QUIT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);
const INSPECTOR_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::I);

const MAX_ERRORS: usize = 10;

type LoadOutcome = Result<ParseResult, ParseError>;

// at most one parse runs at a time
struct PendingLoad {
    path: PathBuf,
    outcome: Receiver<LoadOutcome>,
}

#[derive(Default)]
pub struct App {
    pub(crate) table: RecordTable,
    pub(crate) errors: Vec<String>,
    config: ViewerConfig,
    pending: Option<PendingLoad>,
    show_inspector: bool,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();
        self.handle_shortcuts(ctx);
        ctx.input(|i| self.config.window.track(i.viewport()));

        egui::panel::TopBottomPanel::top("Menu").show(ctx, |ui| self.menu(ui));
        egui::panel::TopBottomPanel::bottom("Error Log")
            .exact_height(100.0)
            .show(ctx, |ui| {
                // only retain the last 10 errors
                if self.errors.len() > MAX_ERRORS {
                    let n = self.errors.len().saturating_sub(MAX_ERRORS);
                    self.errors.drain(..n);
                };
                ui.label("Error log:");
                ui.label(self.errors.join("\n"));
            });
        egui::panel::TopBottomPanel::bottom("Status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.pending.is_some() {
                    ui.spinner();
                }
                ui.label(self.status_text());
            });
        });
        egui::panel::CentralPanel::default().show(ctx, |ui| self.table.ui(ui));

        if self.show_inspector {
            egui::Window::new("Inspector")
                .open(&mut self.show_inspector)
                .vscroll(true)
                .show(ctx, |ui| ctx.inspection_ui(ui));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        match self.config.save(None) {
            Ok(()) => log::debug!("saved window state {:?}", self.config.window),
            Err(msg) => log::error!("{msg}"),
        }
    }
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        App {
            config,
            ..Default::default()
        }
    }

    pub fn start_loading(&mut self, path: PathBuf, ctx: &egui::Context) {
        if let Some(pending) = &self.pending {
            self.errors.push(format!(
                "WARNING: still loading {:?}, ignoring {:?}",
                pending.path, path
            ));
            return;
        }
        log::info!("loading {path:?}");
        self.config.last_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);

        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        parse_file_async(path.clone(), move |outcome| {
            if tx.send(outcome).is_err() {
                log::warn!("viewer went away before the parse finished");
            }
            ctx.request_repaint();
        });
        self.pending = Some(PendingLoad { path, outcome: rx });
    }

    fn poll_pending(&mut self) {
        let outcome = match self.pending.as_ref().map(|p| p.outcome.try_recv()) {
            None | Some(Err(TryRecvError::Empty)) => return,
            Some(Ok(outcome)) => Some(outcome),
            Some(Err(TryRecvError::Disconnected)) => None,
        };
        let Some(pending) = self.pending.take() else {
            return;
        };
        match outcome {
            Some(outcome) => deliver(self, pending.path, outcome),
            None => self.errors.push(format!(
                "ERROR: loading {:?} ended without a result",
                pending.path
            )),
        }
    }

    fn open_dialog(&mut self, ctx: &egui::Context) {
        let mut dialog = rfd::FileDialog::new().add_filter("comma separated values", &["csv"]);
        if let Some(dir) = &self.config.last_dir {
            dialog = dialog.set_directory(dir);
        }
        match dialog.pick_file() {
            Some(path) => self.start_loading(path, ctx),
            None => log::info!("open dialog closed without a file"),
        }
    }

    fn reload(&mut self, ctx: &egui::Context) {
        if let Some(path) = self.table.source().cloned() {
            self.start_loading(path, ctx);
        }
    }

    fn quit(&self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN_SHORTCUT)) {
            self.open_dialog(ctx);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT_SHORTCUT)) {
            self.quit(ctx);
        }
        if cfg!(debug_assertions) && ctx.input_mut(|i| i.consume_shortcut(&INSPECTOR_SHORTCUT)) {
            self.show_inspector = !self.show_inspector;
        }
    }

    fn status_text(&self) -> String {
        match &self.pending {
            Some(pending) => format!("Loading {}…", pending.path.display()),
            None => self
                .table
                .summary()
                .unwrap_or_else(|| "No file loaded".to_string()),
        }
    }

    fn menu(&mut self, ui: &mut egui::Ui) -> egui::InnerResponse<()> {
        let ctx = ui.ctx().clone();
        egui::menu::bar(ui, |ui| {
            menu_button(ui, "File", |ui| {
                let open = egui::Button::new("Open…")
                    .shortcut_text(ctx.format_shortcut(&OPEN_SHORTCUT));
                if ui.add_enabled(self.pending.is_none(), open).clicked() {
                    ui.close_menu();
                    self.open_dialog(&ctx);
                }
                let quit = egui::Button::new("Quit")
                    .shortcut_text(ctx.format_shortcut(&QUIT_SHORTCUT));
                if ui.add(quit).clicked() {
                    ui.close_menu();
                    self.quit(&ctx);
                }
            });
            if cfg!(debug_assertions) {
                menu_button(ui, "Developer Tools", |ui| {
                    let can_reload = self.pending.is_none() && self.table.source().is_some();
                    if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                        ui.close_menu();
                        self.reload(&ctx);
                    }
                    let inspector = egui::Button::new("Toggle Inspector")
                        .shortcut_text(ctx.format_shortcut(&INSPECTOR_SHORTCUT));
                    if ui.add(inspector).clicked() {
                        ui.close_menu();
                        self.show_inspector = !self.show_inspector;
                    }
                });
            }
        })
    }
}
