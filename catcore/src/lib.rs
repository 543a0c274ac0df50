//! catcore: shared theme, widgets and storage for FocusCat

pub mod repaint;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::{CatTheme, ThemeKind};
