//! Small widgets shared by FocusCat windows

use egui::{Response, Ui, Widget};

/// Thin vertical separator for the top bar
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        let color = ui.visuals().widgets.noninteractive.fg_stroke.color;
        ui.painter().vline(rect.center().x, rect.y_range(), egui::Stroke::new(1.0, color));
    }
}

/// Status bar: one line of text on the bar color
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(text);
                ui.allocate_space(egui::vec2(ui.available_width(), 0.0));
            });
        });
}

/// A labelled 0..=max slider row, used in the settings menu.
pub fn labelled_slider(ui: &mut Ui, label: &str, value: &mut u32, max: u32, suffix: &str) -> Response {
    ui.vertical(|ui| {
        ui.label(format!("{}: {}{}", label, value, suffix));
        ui.add(egui::Slider::new(value, 0..=max).show_value(false))
    })
    .inner
}

/// File list item for open/save/picture dialogs.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let visuals = ui.visuals();
            let painter = ui.painter();

            if self.selected {
                painter.rect_filled(rect, 2.0, visuals.selection.bg_fill);
            } else if response.hovered() {
                painter.rect_filled(rect, 2.0, visuals.widgets.hovered.bg_fill);
            }
            let text_color = visuals.widgets.inactive.fg_stroke.color;

            let icon = if self.is_directory { "📁" } else { "📄" };
            painter.text(
                egui::pos2(rect.min.x + 12.0, rect.center().y),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
