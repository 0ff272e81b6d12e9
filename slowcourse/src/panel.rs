//! Right-hand panel: one feature at a time behind a tab rail
//!
//! The host owns whether the panel is open, which feature it shows and its
//! width (through the resize controller). The notepad needs more room than
//! the other features, so switching features moves the width floor.

use egui::{Align, Layout, RichText, Ui};
use slowcore::drag::StyleHandle;
use slowcore::repaint::RepaintController;
use slowcore::storage::LocalStore;
use slowcore::theme::Palette;
use slowcore::widgets::SlowButton;

use crate::chat::{ChatTranscript, Sender};
use crate::content;
use crate::notepad::view::NotepadView;
use crate::notepad::NotepadEngine;
use crate::resize::{ResizeController, MIN_PANEL_WIDTH};

/// Width the notepad asks for when opened from the rail
const NOTEPAD_PREFERRED_WIDTH: f32 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feature {
    #[default]
    Chat,
    Notepad,
    Resources,
    AiTools,
}

impl Feature {
    pub const ALL: [Feature; 4] = [Feature::Chat, Feature::Notepad, Feature::Resources, Feature::AiTools];

    pub fn label(self) -> &'static str {
        match self {
            Feature::Chat => "AI Assistant",
            Feature::Notepad => "Notepad",
            Feature::Resources => "Resources",
            Feature::AiTools => "AI Tools",
        }
    }

    /// Short label for the collapsed rail.
    pub fn rail_label(self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Notepad => "notes",
            Feature::Resources => "files",
            Feature::AiTools => "tools",
        }
    }

    pub fn min_width(self) -> f32 {
        match self {
            Feature::Notepad => 600.0,
            _ => MIN_PANEL_WIDTH,
        }
    }

    fn preferred_width(self) -> Option<f32> {
        match self {
            Feature::Notepad => Some(NOTEPAD_PREFERRED_WIDTH),
            _ => None,
        }
    }
}

pub struct PanelHost {
    open: bool,
    feature: Feature,
    resize: ResizeController,
    notepad: NotepadEngine,
    notepad_view: NotepadView,
    chat: ChatTranscript,
    chat_input: String,
}

impl PanelHost {
    pub fn new(style: StyleHandle, store: LocalStore, track_id: &str, width: f32, open: bool) -> Self {
        let mut resize = ResizeController::with_width(style, width);
        resize.set_min_width(Feature::default().min_width());
        Self {
            open,
            feature: Feature::default(),
            resize,
            notepad: NotepadEngine::load_for_track(store, track_id),
            notepad_view: NotepadView::new(),
            chat: ChatTranscript::with_sample(),
            chat_input: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn width(&self) -> f32 {
        self.resize.width()
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    pub fn resize_mut(&mut self) -> &mut ResizeController {
        &mut self.resize
    }

    pub fn notepad(&self) -> &NotepadEngine {
        &self.notepad
    }

    pub fn notepad_mut(&mut self) -> &mut NotepadEngine {
        &mut self.notepad
    }

    pub fn chat(&self) -> &ChatTranscript {
        &self.chat
    }

    /// Show `feature`, opening the panel if it was closed.
    pub fn open_feature(&mut self, feature: Feature) {
        self.feature = feature;
        self.open = true;
        self.resize.set_min_width(feature.min_width());
        if let Some(width) = feature.preferred_width() {
            self.resize.set_width(width);
        }
    }

    pub fn close(&mut self) {
        self.resize.end_drag();
        self.open = false;
    }

    /// Render the active feature.
    pub fn show(&mut self, ui: &mut Ui, palette: Palette, repaint: &mut RepaintController) {
        let mut close = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new(self.feature.label()).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.add(SlowButton::new("x").width(24.0)).on_hover_text("close panel").clicked() {
                    close = true;
                }
            });
        });
        ui.separator();

        match self.feature {
            Feature::Chat => self.show_chat(ui, palette),
            Feature::Notepad => {
                NotepadView::accept_dropped(ui.ctx(), &mut self.notepad);
                self.notepad_view.show(ui, &mut self.notepad, palette, repaint);
            }
            Feature::Resources => show_resources(ui),
            Feature::AiTools => show_ai_tools(ui),
        }

        if close {
            self.close();
        }
    }

    fn show_chat(&mut self, ui: &mut Ui, palette: Palette) {
        let mut send = false;
        egui::TopBottomPanel::bottom("chat_composer")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(4.0, 6.0)))
            .show_inside(ui, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.chat_input)
                            .hint_text("Ask anything...")
                            .desired_width(ui.available_width() - 56.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send = true;
                        response.request_focus();
                    }
                    if ui.add(SlowButton::new("send").width(48.0)).clicked() {
                        send = true;
                    }
                });
                ui.label(RichText::new("AI can make mistakes.").small().weak());
            });

        if send && self.chat.send(&self.chat_input).is_some() {
            self.chat_input.clear();
        }

        egui::ScrollArea::vertical()
            .id_source("chat_scroll")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in self.chat.messages() {
                    let mine = message.sender == Sender::User;
                    let layout = if mine {
                        Layout::right_to_left(Align::TOP)
                    } else {
                        Layout::left_to_right(Align::TOP)
                    };
                    ui.with_layout(layout, |ui| {
                        let (fill, text) = if mine {
                            (palette.fg, palette.bg)
                        } else {
                            (palette.panel, palette.fg)
                        };
                        egui::Frame::none()
                            .fill(fill)
                            .stroke(egui::Stroke::new(1.0, palette.fg))
                            .inner_margin(egui::Margin::symmetric(10.0, 8.0))
                            .show(ui, |ui| {
                                ui.set_max_width(ui.available_width() * 0.75);
                                if !mine {
                                    ui.label(RichText::new("AI").strong().color(text));
                                }
                                ui.label(RichText::new(&message.text).color(text));
                                ui.label(RichText::new(&message.timestamp).small().color(text));
                            });
                    });
                    ui.add_space(8.0);
                }
            });
    }
}

fn show_resources(ui: &mut Ui) {
    egui::ScrollArea::vertical()
        .id_source("resources_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(RichText::new("Course Resources").strong());
            ui.add_space(6.0);
            for download in &content::DOWNLOADS {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(download.name).strong());
                            ui.label(RichText::new(format!("{} - {}", download.kind, download.size)).small());
                        });
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            let _ = ui.add(SlowButton::new("download").width(72.0));
                        });
                    });
                });
                ui.add_space(4.0);
            }
            ui.add_space(12.0);
            ui.label(RichText::new("External Resources").strong());
            for link in content::EXTERNAL_LINKS {
                let _ = ui.link(link);
            }
        });
}

fn show_ai_tools(ui: &mut Ui) {
    egui::ScrollArea::vertical()
        .id_source("ai_tools_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(RichText::new("AI-Powered Tools").strong());
            ui.add_space(6.0);
            for tool in &content::AI_TOOLS {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(tool.name).strong());
                    ui.label(RichText::new(tool.description).small());
                });
                ui.add_space(4.0);
            }
        });
}
