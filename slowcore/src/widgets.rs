//! Custom widgets: outlined buttons, status bar and list rows

use egui::{Response, Ui, Widget};
use crate::dither;

fn fg_color(ui: &Ui) -> egui::Color32 {
    ui.visuals().widgets.noninteractive.fg_stroke.color
}

/// A button: panel bg, 1px outline. dithered when pressed/selected.
pub struct SlowButton<'a> {
    text: &'a str,
    selected: bool,
    width: Option<f32>,
}

impl<'a> SlowButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, selected: false, width: None }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

impl<'a> Widget for SlowButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired_size = ui.spacing().interact_size;
        let width = self.width.unwrap_or_else(|| ui.available_width().min(200.0));
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(width, desired_size.y),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fg = fg_color(ui);
            let bg = ui.visuals().panel_fill;

            painter.rect_filled(rect, 0.0, bg);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, fg));

            let text_color = if response.is_pointer_button_down_on() || self.selected {
                dither::draw_dither_selection(painter, rect, fg);
                bg
            } else {
                if response.hovered() {
                    dither::draw_dither_hover(painter, rect, fg);
                }
                fg
            };

            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.text,
                egui::FontId::proportional(13.0),
                text_color,
            );
        }

        response
    }
}

/// Toolbar separator (vertical 1px line)
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            egui::Stroke::new(1.0, fg_color(ui)),
        );
    }
}

/// Status bar: 1px top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(ui.visuals().panel_fill)
        .stroke(egui::Stroke::new(1.0, fg_color(ui)))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// File list item for the open dialog.
/// Selected items get a dithered overlay instead of a solid fill.
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
            let painter = ui.painter();
            let fg = fg_color(ui);
            let bg = ui.visuals().panel_fill;

            painter.rect_filled(rect, 0.0, bg);

            let text_color = if self.selected {
                dither::draw_dither_selection(painter, rect, fg);
                bg
            } else {
                if response.hovered() {
                    dither::draw_dither_hover(painter, rect, fg);
                }
                fg
            };

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
