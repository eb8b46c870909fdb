#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;
mod errors;
mod event;
mod parser;
mod table;
mod window_state;

use std::path::PathBuf;

use app::App;
use window_state::ViewerConfig;

const WINDOW_NAME: &str = "Main Sequence Viewer";

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load_or_default();
    // a CSV path given on the command line is opened right away
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: config
            .window
            .apply(egui::ViewportBuilder::default().with_title(WINDOW_NAME)),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(config);
            if let Some(path) = initial_file {
                app.start_loading(path, &cc.egui_ctx);
            }
            Ok(Box::new(app))
        }),
    )
}
