//! FocusCat - a writing companion with a focus timer and a cat
//!
//! Finished sentences light up in their own colors, a countdown keeps the
//! session honest, and the cat meows when clicked.

mod app;
mod assets;
mod audio;
mod background;
mod cat;
mod counter;
mod highlight;
mod palette;
mod quotes;
mod sentence;
mod session;
mod settings;
mod timer;

use app::FocusCatApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting FocusCat {}", env!("CARGO_PKG_VERSION"));

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 640.0])
            .with_min_inner_size([560.0, 360.0])
            .with_title("FocusCat 🐱"),
        ..Default::default()
    };

    eframe::run_native(
        "FocusCat",
        options,
        Box::new(|cc| Box::new(FocusCatApp::new(cc))),
    )
}
