//! Slow Computer theme
//!
//! Two modes: light (black on white) and dark (white on near-black).
//! 1px outlines, no rounding, no smooth shadows.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

/// Light or dark. Everything else is derived from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

/// Anything that can report and switch the active theme.
pub trait ThemeProvider {
    fn theme(&self) -> ThemeMode;
    fn set_theme(&mut self, mode: ThemeMode);

    fn toggle_theme(&mut self) {
        let next = self.theme().toggled();
        self.set_theme(next);
    }
}

/// The colors in use for a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color32,
    pub bg: Color32,
    /// Slightly offset background for panels and cards
    pub panel: Color32,
}

pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const NIGHT: Color32 = Color32::from_rgb(31, 31, 31);
    pub const NIGHT_PANEL: Color32 = Color32::from_rgb(42, 42, 42);
    pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 235, 59);

    pub fn palette(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => Palette { fg: Self::BLACK, bg: Self::WHITE, panel: Self::WHITE },
            ThemeMode::Dark => Palette { fg: Self::WHITE, bg: Self::NIGHT, panel: Self::NIGHT_PANEL },
        }
    }
}

/// Theme configuration for slow computer apps
pub struct SlowTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for SlowTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 22.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl SlowTheme {
    /// Apply the slow computer theme to an egui context
    pub fn apply(&self, ctx: &egui::Context, mode: ThemeMode) {
        let palette = SlowColors::palette(mode);
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = match mode {
            ThemeMode::Light => Visuals::light(),
            ThemeMode::Dark => Visuals::dark(),
        };

        visuals.window_fill = palette.bg;
        visuals.panel_fill = palette.bg;
        visuals.faint_bg_color = palette.panel;
        visuals.extreme_bg_color = palette.bg;
        visuals.override_text_color = Some(palette.fg);

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, palette.fg);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        let outline = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = palette.bg;
            ws.weak_bg_fill = palette.bg;
            ws.bg_stroke = Stroke::new(1.0, palette.fg);
            ws.fg_stroke = Stroke::new(1.0, palette.fg);
            ws.rounding = Rounding::ZERO;
        };
        outline(&mut visuals.widgets.noninteractive);
        outline(&mut visuals.widgets.inactive);
        outline(&mut visuals.widgets.hovered);
        outline(&mut visuals.widgets.active);
        outline(&mut visuals.widgets.open);

        visuals.selection.bg_fill = match mode {
            ThemeMode::Light => Color32::from_rgba_premultiplied(0, 0, 0, 60),
            ThemeMode::Dark => Color32::from_rgba_premultiplied(90, 90, 90, 90),
        };
        visuals.selection.stroke = Stroke::new(1.0, palette.fg);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Title bar: panel fill, 1px outline
    pub fn title_bar_frame(mode: ThemeMode) -> egui::Frame {
        let palette = SlowColors::palette(mode);
        egui::Frame::none()
            .fill(palette.bg)
            .stroke(Stroke::new(1.0, palette.fg))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// Session theme state. Re-applies the egui style only when the mode changes.
#[derive(Debug)]
pub struct ThemeState {
    mode: ThemeMode,
    applied: Option<ThemeMode>,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode, applied: None }
    }

    /// Push the current mode into the context if it is stale.
    pub fn sync(&mut self, ctx: &egui::Context) {
        if self.applied != Some(self.mode) {
            SlowTheme::default().apply(ctx, self.mode);
            self.applied = Some(self.mode);
        }
    }

    pub fn palette(&self) -> Palette {
        SlowColors::palette(self.mode)
    }
}

impl ThemeProvider for ThemeState {
    fn theme(&self) -> ThemeMode {
        self.mode
    }

    fn set_theme(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }
}

/// Menu bar styling helper
pub fn menu_bar(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let fg = ui.visuals().widgets.noninteractive.fg_stroke.color;
    egui::Frame::none()
        .fill(ui.visuals().panel_fill)
        .stroke(Stroke::new(1.0, fg))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}

/// Consume problematic key events to prevent unwanted egui behaviors.
/// Call this at the start of your app's update() function.
/// - Tab: prevents menu focus navigation
/// - Cmd+/Cmd-: prevents zoom scaling
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|e| match e {
            egui::Event::Key { key: egui::Key::Tab, .. } => false,
            egui::Event::Text(text) if text.contains('\t') => false,
            egui::Event::Key { key, modifiers, .. }
                if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) => false,
            _ => true,
        });
    });
}
