//! FocusCat themes: dark, light and eye-care yellow.
//!
//! Each theme is three colors (window background, text, bars). Inputs keep a
//! transparent base so a background picture can show through the editor.

use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

/// Places where a CJK-capable system font usually lives. The first readable
/// one is registered as a fallback so Chinese quotes and text render.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    EyeCare,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 3] = [ThemeKind::Dark, ThemeKind::Light, ThemeKind::EyeCare];

    pub fn label(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::EyeCare => "eye-care yellow",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            ThemeKind::Dark => ThemeColors {
                bg: Color32::from_rgb(0x18, 0x18, 0x18),
                fg: Color32::from_rgb(0xff, 0xff, 0xff),
                bar: Color32::from_rgb(0x20, 0x20, 0x20),
            },
            ThemeKind::Light => ThemeColors {
                bg: Color32::from_rgb(0xfa, 0xfa, 0xfa),
                fg: Color32::from_rgb(0x11, 0x11, 0x11),
                bar: Color32::from_rgb(0xef, 0xef, 0xef),
            },
            ThemeKind::EyeCare => ThemeColors {
                bg: Color32::from_rgb(0xff, 0xf3, 0xb0),
                fg: Color32::from_rgb(0x2b, 0x2b, 0x2b),
                bar: Color32::from_rgb(0xff, 0xe8, 0x9a),
            },
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeKind::Dark)
    }
}

/// The three colors a theme is made of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub bg: Color32,
    pub fg: Color32,
    pub bar: Color32,
}

impl ThemeColors {
    /// Text color for disabled widgets.
    pub fn dimmed_fg(&self) -> Color32 {
        let [r, g, b, _] = self.fg.to_array();
        Color32::from_rgba_unmultiplied(r, g, b, 160)
    }
}

/// Theme configuration for FocusCat windows
pub struct CatTheme {
    pub kind: ThemeKind,
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub font_size_editor: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for CatTheme {
    fn default() -> Self {
        Self {
            kind: ThemeKind::Dark,
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            font_size_editor: 16.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl CatTheme {
    pub fn new(kind: ThemeKind) -> Self {
        Self { kind, ..Self::default() }
    }

    /// Register fonts once at startup. egui's bundled fonts have no CJK
    /// glyphs, so a system font is appended as fallback when one is found.
    pub fn install_fonts(ctx: &egui::Context) {
        let mut fonts = FontDefinitions::default();
        let found = CJK_FONT_CANDIDATES
            .iter()
            .find_map(|path| std::fs::read(path).ok().map(|bytes| (*path, bytes)));

        match found {
            Some((path, bytes)) => {
                log::debug!("using CJK fallback font {}", path);
                fonts.font_data.insert("cjk".to_owned(), FontData::from_owned(bytes));
                for family in [FontFamily::Proportional, FontFamily::Monospace] {
                    fonts.families.entry(family).or_default().push("cjk".to_owned());
                }
            }
            None => log::info!("no CJK font found, Chinese text may not render"),
        }
        ctx.set_fonts(fonts);
    }

    /// Apply the theme to an egui context. Safe to call on every theme switch.
    pub fn apply(&self, ctx: &egui::Context) {
        let colors = self.kind.colors();
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_editor, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = if self.kind.is_dark() { Visuals::dark() } else { Visuals::light() };

        visuals.override_text_color = Some(colors.fg);
        visuals.window_fill = colors.bar;
        visuals.panel_fill = colors.bg;
        visuals.faint_bg_color = colors.bar;
        // TextEdit background: transparent so the picture behind stays visible
        visuals.extreme_bg_color = Color32::TRANSPARENT;

        visuals.window_rounding = Rounding::same(4.0);
        visuals.menu_rounding = Rounding::same(4.0);
        visuals.window_stroke = Stroke::new(1.0, colors.dimmed_fg());

        let tint = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.fg_stroke = Stroke::new(1.0, colors.fg);
            ws.rounding = Rounding::same(3.0);
        };
        let hover = colors.fg.gamma_multiply(0.15);
        tint(&mut visuals.widgets.noninteractive, colors.bar);
        tint(&mut visuals.widgets.inactive, colors.bar);
        tint(&mut visuals.widgets.hovered, hover);
        tint(&mut visuals.widgets.active, hover);
        tint(&mut visuals.widgets.open, colors.bar);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.dimmed_fg());

        visuals.selection.bg_fill = colors.fg.gamma_multiply(0.35);
        visuals.selection.stroke = Stroke::new(1.0, colors.bg);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Frame for the top bar holding the timer, quote and cat.
    pub fn top_bar_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.kind.colors().bar)
            .rounding(Rounding::same(4.0))
            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
    }
}

/// Menu bar styling helper
pub fn menu_bar(ui: &mut egui::Ui, colors: ThemeColors, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(colors.bar)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            egui::menu::bar(ui, add_contents);
        });
}

/// Drop Cmd/Ctrl +/- so egui does not rescale the whole window while the
/// user is typing. Call at the start of `update()`.
pub fn consume_zoom_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|e| match e {
            egui::Event::Key { key, modifiers, .. }
                if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) => false,
            _ => true,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_colors_match_palette() {
        let dark = ThemeKind::Dark.colors();
        assert_eq!(dark.bg, Color32::from_rgb(0x18, 0x18, 0x18));
        assert_eq!(dark.fg, Color32::WHITE);
        let eye = ThemeKind::EyeCare.colors();
        assert_eq!(eye.bar, Color32::from_rgb(0xff, 0xe8, 0x9a));
    }

    #[test]
    fn test_apply_every_theme() {
        let ctx = egui::Context::default();
        for kind in ThemeKind::ALL {
            CatTheme::new(kind).apply(&ctx);
            let fg = ctx.style().visuals.override_text_color;
            assert_eq!(fg, Some(kind.colors().fg));
        }
    }

    #[test]
    fn test_theme_serde_names() {
        let json = serde_json::to_string(&ThemeKind::EyeCare).unwrap();
        assert_eq!(json, "\"eyecare\"");
        let back: ThemeKind = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(back, ThemeKind::Light);
    }
}
