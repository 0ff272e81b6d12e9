//! egui front-end for the notepad
//!
//! A hand-rolled editor: characters are laid out one by one (see `layout`),
//! painted with the painter, and the drawing layer is uploaded as a texture
//! and painted over them. Input is translated into `NotepadEngine` calls.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use egui::text::LayoutJob;
use egui::{
    pos2, vec2, Align2, Color32, ColorImage, Context, CursorIcon, FontId, Key, Painter, Pos2,
    Rect, Sense, Shape, Stroke, TextFormat, TextureHandle, TextureOptions, Ui, Vec2,
};
use slowcore::dither;
use slowcore::repaint::RepaintController;
use slowcore::storage::{pictures_dir, FileBrowser};
use slowcore::theme::{Palette, SlowColors};
use slowcore::widgets::{status_bar, toolbar_separator, FileListItem, SlowButton};

use super::document::{CharStyle, Mark, DEFAULT_FONT_SIZE, FONT_SIZES, OBJECT_MARKER};
use super::drawing::{Tool, MIN_CANVAS_HEIGHT, PEN_COLORS};
use super::images::{ImageSource, IMAGE_EXTENSIONS};
use super::layout::Layout;
use super::{NotepadEngine, Status};

/// How often the canvas size is re-checked when nothing else changed.
pub const CANVAS_CHECK_INTERVAL: Duration = Duration::from_secs(2);

const CARET_BLINK: Duration = Duration::from_millis(500);

/// Decides when the drawing surface should be re-fitted to the page:
/// on the first frame, whenever the viewport changes size, and every
/// [`CANVAS_CHECK_INTERVAL`] otherwise.
#[derive(Debug, Default)]
pub struct CanvasSizer {
    last_viewport: Option<Vec2>,
    last_check: Option<Instant>,
}

impl CanvasSizer {
    pub fn due(&mut self, viewport: Vec2, now: Instant) -> bool {
        let resized = self.last_viewport != Some(viewport);
        let stale = self
            .last_check
            .map_or(true, |t| now.duration_since(t) >= CANVAS_CHECK_INTERVAL);
        if resized || stale {
            self.last_viewport = Some(viewport);
            self.last_check = Some(now);
            true
        } else {
            false
        }
    }
}

fn font_for(style: &CharStyle) -> FontId {
    FontId::proportional(style.font_size)
}

fn rgba(c: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

#[derive(Default)]
pub struct NotepadView {
    image_textures: HashMap<u64, TextureHandle>,
    drawing_texture: Option<((usize, u64), TextureHandle)>,
    sizer: CanvasSizer,
    /// Keyboard goes to the editor while this is set
    editing: bool,
    browser: Option<FileBrowser>,
    save_error: Option<String>,
}

impl NotepadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue dropped image files for insertion.
    pub fn accept_dropped(ctx: &Context, engine: &mut NotepadEngine) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                engine.request_image(ImageSource::File(path));
            }
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        engine: &mut NotepadEngine,
        palette: Palette,
        repaint: &mut RepaintController,
    ) {
        if engine.pump_decodes() > 0 {
            repaint.mark_needs_repaint();
        }
        if engine.has_pending_images() {
            repaint.mark_needs_repaint();
        }

        let area = ui.max_rect();
        let pressed_outside = ui.input(|i| {
            i.pointer.primary_pressed()
                && i.pointer.interact_pos().map_or(false, |p| !area.contains(p))
        });
        if pressed_outside {
            self.editing = false;
        }

        egui::TopBottomPanel::top("notepad_toolbar")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(6.0, 4.0)))
            .show_inside(ui, |ui| self.render_toolbar(ui, engine, palette));

        egui::TopBottomPanel::bottom("notepad_status")
            .frame(egui::Frame::none())
            .show_inside(ui, |ui| {
                let words = engine.content().word_count();
                let status = match engine.status() {
                    Some(Status::Saved(at)) => {
                        format!("saved {}", at.with_timezone(&chrono::Local).format("%H:%M"))
                    }
                    Some(Status::Error(msg)) => msg.clone(),
                    None => match engine.saved_at() {
                        Some(at) => format!(
                            "last saved {}",
                            at.with_timezone(&chrono::Local).format("%b %d %H:%M")
                        ),
                        None => "not saved yet".to_string(),
                    },
                };
                status_bar(ui, &format!("{words} words  |  {status}"));
            });

        self.handle_shortcuts(ui.ctx(), engine);

        egui::ScrollArea::vertical()
            .id_source("notepad_scroll")
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .show(ui, |ui| self.render_page(ui, engine, palette, repaint));

        self.render_dialogs(ui.ctx(), engine);
    }

    // ---------------------------------------------------------------
    // Toolbar
    // ---------------------------------------------------------------

    fn render_toolbar(&mut self, ui: &mut Ui, engine: &mut NotepadEngine, palette: Palette) {
        ui.horizontal_wrapped(|ui| {
            for tool in Tool::ALL {
                if ui
                    .add(SlowButton::new(tool.label()).selected(engine.tool() == tool).width(64.0))
                    .clicked()
                {
                    engine.set_tool(tool);
                    if tool.is_drawing() {
                        self.editing = false;
                    }
                }
            }
            if engine.tool() == Tool::Pen {
                toolbar_separator(ui);
                for (name, color) in PEN_COLORS {
                    let (rect, response) = ui.allocate_exact_size(vec2(18.0, 18.0), Sense::click());
                    let painter = ui.painter();
                    painter.rect_filled(rect.shrink(3.0), 0.0, Color32::from_rgb(color[0], color[1], color[2]));
                    if engine.pen_color() == color {
                        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, palette.fg));
                    }
                    if response.on_hover_text(name).clicked() {
                        engine.set_pen_color(color);
                    }
                }
            }

            toolbar_separator(ui);
            let marks = [
                ("B", Mark::Bold),
                ("I", Mark::Italic),
                ("U", Mark::Underline),
                ("H", Mark::Highlight),
            ];
            for (label, mark) in marks {
                if ui
                    .add(SlowButton::new(label).selected(engine.mark_active(mark)).width(26.0))
                    .clicked()
                {
                    engine.apply_mark(mark);
                }
            }
            let current = engine.typing_style().font_size;
            egui::ComboBox::from_id_source("notepad_font_size")
                .selected_text(format!("{}pt", current as u32))
                .width(56.0)
                .show_ui(ui, |ui| {
                    for size in FONT_SIZES {
                        if ui
                            .selectable_label(current == size, format!("{}pt", size as u32))
                            .clicked()
                        {
                            engine.set_font_size(size);
                        }
                    }
                });

            toolbar_separator(ui);
            if ui.add(SlowButton::new("image...").width(64.0)).clicked() {
                self.browser = Some(
                    FileBrowser::new(pictures_dir())
                        .with_filter(IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()),
                );
            }
            if ui.add(SlowButton::new("paste image").width(84.0)).clicked() {
                paste_clipboard_image(engine);
            }

            toolbar_separator(ui);
            if ui.add(SlowButton::new("undo").width(48.0)).clicked() {
                engine.undo();
            }
            if ui.add(SlowButton::new("redo").width(48.0)).clicked() {
                engine.redo();
            }

            toolbar_separator(ui);
            if ui.add(SlowButton::new("clear drawing").width(96.0)).clicked() {
                engine.clear_drawing();
            }
            if ui.add(SlowButton::new("clear all").width(72.0)).clicked() {
                engine.request_clear();
            }
            if ui.add(SlowButton::new("save").width(56.0)).clicked() {
                self.save(engine);
            }
        });
    }

    fn save(&mut self, engine: &mut NotepadEngine) {
        if let Err(e) = engine.save() {
            self.save_error = Some(e.to_string());
        }
    }

    // ---------------------------------------------------------------
    // Keyboard
    // ---------------------------------------------------------------

    fn handle_shortcuts(&mut self, ctx: &Context, engine: &mut NotepadEngine) {
        if !self.editing && !engine.tool().is_drawing() {
            return;
        }
        let mut actions: Vec<Box<dyn FnOnce(&mut Self, &mut NotepadEngine)>> = Vec::new();
        ctx.input(|i| {
            let cmd = i.modifiers.command;
            if cmd && i.key_pressed(Key::Z) {
                if i.modifiers.shift {
                    actions.push(Box::new(|_, e| {
                        e.redo();
                    }));
                } else {
                    actions.push(Box::new(|_, e| {
                        e.undo();
                    }));
                }
            }
            if cmd && i.key_pressed(Key::Y) {
                actions.push(Box::new(|_, e| {
                    e.redo();
                }));
            }
            if cmd && i.key_pressed(Key::S) {
                actions.push(Box::new(|v, e| v.save(e)));
            }
        });
        for action in actions {
            action(self, engine);
        }
    }

    /// Editing keys. Needs the layout for line-wise movement.
    fn handle_editing_keys(&mut self, ctx: &Context, engine: &mut NotepadEngine, layout: &Layout) {
        let mut actions: Vec<Box<dyn FnOnce(&mut NotepadEngine)>> = Vec::new();
        let mut copied: Option<String> = None;

        ctx.input(|i| {
            let cmd = i.modifiers.command;
            let shift = i.modifiers.shift;

            if cmd && i.key_pressed(Key::B) {
                actions.push(Box::new(|e| e.apply_mark(Mark::Bold)));
            }
            if cmd && i.key_pressed(Key::I) {
                actions.push(Box::new(|e| e.apply_mark(Mark::Italic)));
            }
            if cmd && i.key_pressed(Key::U) {
                actions.push(Box::new(|e| e.apply_mark(Mark::Underline)));
            }
            if cmd && i.key_pressed(Key::A) {
                actions.push(Box::new(|e| e.select_all()));
            }
            if i.key_pressed(Key::Backspace) {
                actions.push(Box::new(|e| e.delete_backward()));
            }
            if i.key_pressed(Key::Delete) {
                actions.push(Box::new(|e| e.delete_forward()));
            }
            if i.key_pressed(Key::Enter) {
                actions.push(Box::new(|e| e.insert_text("\n")));
            }
            if i.key_pressed(Key::ArrowLeft) {
                actions.push(Box::new(move |e| {
                    match e.selection() {
                        Some(range) if !shift => e.set_cursor(range.start, false),
                        _ => e.set_cursor(e.cursor().saturating_sub(1), shift),
                    }
                }));
            }
            if i.key_pressed(Key::ArrowRight) {
                actions.push(Box::new(move |e| {
                    match e.selection() {
                        Some(range) if !shift => e.set_cursor(range.end, false),
                        _ => e.set_cursor(e.cursor() + 1, shift),
                    }
                }));
            }
            for (key, dir) in [(Key::ArrowUp, -1), (Key::ArrowDown, 1)] {
                if i.key_pressed(key) {
                    let target = layout.vertical(engine.cursor(), dir);
                    actions.push(Box::new(move |e| e.set_cursor(target, shift)));
                }
            }
            if i.key_pressed(Key::Home) {
                let (start, _) = layout.line_bounds(engine.cursor());
                actions.push(Box::new(move |e| e.set_cursor(start, shift)));
            }
            if i.key_pressed(Key::End) {
                let (_, end) = layout.line_bounds(engine.cursor());
                actions.push(Box::new(move |e| e.set_cursor(end, shift)));
            }

            for event in &i.events {
                match event {
                    egui::Event::Text(text) if !cmd => {
                        let text = text.clone();
                        actions.push(Box::new(move |e| e.insert_text(&text)));
                    }
                    egui::Event::Paste(text) => {
                        let text = text.clone();
                        actions.push(Box::new(move |e| e.insert_text(&text)));
                    }
                    egui::Event::Copy => copied = engine.selected_text(),
                    egui::Event::Cut => {
                        copied = engine.selected_text();
                        actions.push(Box::new(|e| {
                            e.delete_selection();
                        }));
                    }
                    _ => {}
                }
            }
        });

        if let Some(text) = copied.filter(|t| !t.is_empty()) {
            ctx.output_mut(|o| o.copied_text = text);
        }
        for action in actions {
            action(engine);
        }
    }

    // ---------------------------------------------------------------
    // Page
    // ---------------------------------------------------------------

    fn layout(ui: &Ui, engine: &NotepadEngine, width: f32) -> Layout {
        let default_row = ui.fonts(|f| f.row_height(&FontId::proportional(DEFAULT_FONT_SIZE)));
        ui.fonts(|f| {
            Layout::compute(engine.content(), width, default_row, |c, style| {
                let font = font_for(style);
                (f.glyph_width(&font, c), f.row_height(&font))
            })
        })
    }

    fn render_page(
        &mut self,
        ui: &mut Ui,
        engine: &mut NotepadEngine,
        palette: Palette,
        repaint: &mut RepaintController,
    ) {
        let width = ui.available_width();
        let viewport = ui.clip_rect().size();
        let mut layout = Self::layout(ui, engine, width);

        if self.sizer.due(viewport, Instant::now()) {
            let text_height = layout.height().max(viewport.y);
            engine.ensure_canvas(width.ceil() as u32, text_height.ceil() as u32);
        }
        repaint.wake_within(CANVAS_CHECK_INTERVAL);

        let canvas_height = engine
            .document()
            .drawing
            .size()
            .map_or(MIN_CANVAS_HEIGHT as f32, |(_, h)| h as f32);
        let page_height = layout.height().max(canvas_height).max(viewport.y);
        let (rect, response) = ui.allocate_exact_size(vec2(width, page_height), Sense::click_and_drag());
        let origin = rect.min;

        // pointer
        let (pointer, pressed, down, shift) = ui.input(|i| {
            (
                i.pointer.interact_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.modifiers.shift,
            )
        });
        let inside = pointer.map_or(false, |p| rect.contains(p) && ui.clip_rect().contains(p));
        if engine.tool().is_drawing() {
            if response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }
            if let Some(p) = pointer {
                let at = [p.x - origin.x, p.y - origin.y];
                if pressed && inside {
                    engine.begin_stroke(at);
                } else if down {
                    engine.extend_stroke(at);
                }
            }
            if !down && engine.stroke_in_progress().is_some() {
                engine.end_stroke();
            }
        } else {
            if response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Text);
            }
            if let Some(p) = pointer {
                let hit = layout.hit(p - origin.to_vec2());
                if pressed && inside {
                    self.editing = true;
                    engine.set_cursor(hit, shift);
                } else if down && response.dragged() {
                    engine.set_cursor(hit, true);
                }
            }
        }

        if self.editing && !engine.tool().is_drawing() {
            self.handle_editing_keys(ui.ctx(), engine, &layout);
            layout = Self::layout(ui, engine, width);
        }

        // paint
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, palette.bg);
        self.paint_text(&painter, ui.ctx(), engine, &layout, origin, palette);
        self.paint_drawing(&painter, ui.ctx(), engine, origin);

        if let Some(points) = engine.stroke_in_progress() {
            if let Some(brush) = engine.tool().brush(engine.pen_color()) {
                let color = if brush.erase { palette.bg } else { rgba(brush.color) };
                let screen: Vec<Pos2> = points.iter().map(|p| pos2(origin.x + p[0], origin.y + p[1])).collect();
                if screen.len() == 1 {
                    painter.circle_filled(screen[0], brush.width / 2.0, color);
                } else {
                    painter.add(Shape::line(screen, Stroke::new(brush.width, color)));
                }
            }
            repaint.mark_needs_repaint();
        }

        if self.editing && !engine.tool().is_drawing() {
            let blink_on = (ui.input(|i| i.time) / CARET_BLINK.as_secs_f64()) as u64 % 2 == 0;
            if blink_on {
                let caret = layout.caret(engine.cursor()).translate(origin.to_vec2());
                painter.vline(caret.left(), caret.y_range(), Stroke::new(1.0, palette.fg));
            }
            repaint.wake_within(CARET_BLINK);
        }

        if engine.content().is_empty() && !self.editing {
            painter.text(
                origin + vec2(super::layout::PAD_X, super::layout::PAD_Y),
                Align2::LEFT_TOP,
                "take notes, draw, or paste images here...",
                FontId::proportional(DEFAULT_FONT_SIZE),
                Color32::from_gray(150),
            );
        }
    }

    fn paint_text(
        &mut self,
        painter: &Painter,
        ctx: &Context,
        engine: &NotepadEngine,
        layout: &Layout,
        origin: Pos2,
        palette: Palette,
    ) {
        let doc = engine.content();
        let selection = engine.selection();
        let offset = origin.to_vec2();
        let default_style = CharStyle::default();

        // drop textures for images that are gone
        let live: Vec<u64> = doc.images().iter().map(|img| img.id()).collect();
        self.image_textures.retain(|id, _| live.contains(id));

        let mut image_index = 0;
        for (i, c) in doc.text().chars().enumerate() {
            let Some(b) = layout.boxes.get(i) else { break };
            let rect = b.rect.translate(offset);
            let style = doc.style_at(i).unwrap_or(&default_style);
            let selected = selection.as_ref().map_or(false, |r| r.contains(&i));

            if c == OBJECT_MARKER {
                if let Some(img) = doc.images().get(image_index) {
                    let texture = self.image_textures.entry(img.id()).or_insert_with(|| {
                        let [w, h] = img.natural_size();
                        let color = ColorImage::from_rgba_unmultiplied(
                            [w as usize, h as usize],
                            img.pixels.as_raw(),
                        );
                        ctx.load_texture(format!("note-image-{}", img.id()), color, TextureOptions::LINEAR)
                    });
                    let size = vec2(img.display_size[0], img.display_size[1]);
                    let image_rect = Rect::from_min_size(rect.min, size);
                    painter.image(
                        texture.id(),
                        image_rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                    if selected {
                        dither::draw_dither_selection(painter, image_rect, palette.fg);
                    }
                }
                image_index += 1;
                continue;
            }
            if c == '\n' {
                continue;
            }

            let mut color = palette.fg;
            if style.highlight {
                painter.rect_filled(rect, 0.0, SlowColors::HIGHLIGHT);
                color = SlowColors::BLACK;
            }
            if selected {
                dither::draw_dither_selection(painter, rect, palette.fg);
                color = if style.highlight { SlowColors::BLACK } else { palette.fg };
            }
            paint_char(painter, rect, c, style, color);
        }
    }

    fn paint_drawing(&mut self, painter: &Painter, ctx: &Context, engine: &NotepadEngine, origin: Pos2) {
        let drawing = &engine.document().drawing;
        let Some(fingerprint) = drawing.fingerprint() else {
            self.drawing_texture = None;
            return;
        };
        let Some((w, h, bytes)) = drawing.premultiplied_rgba() else {
            return;
        };
        let stale = self.drawing_texture.as_ref().map_or(true, |(fp, _)| *fp != fingerprint);
        if stale {
            let image = ColorImage::from_rgba_premultiplied([w, h], bytes);
            match self.drawing_texture.as_mut() {
                Some((fp, texture)) => {
                    texture.set(image, TextureOptions::LINEAR);
                    *fp = fingerprint;
                }
                None => {
                    let texture = ctx.load_texture("notepad-drawing", image, TextureOptions::LINEAR);
                    self.drawing_texture = Some((fingerprint, texture));
                }
            }
        }
        if let Some((_, texture)) = &self.drawing_texture {
            painter.image(
                texture.id(),
                Rect::from_min_size(origin, vec2(w as f32, h as f32)),
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    // ---------------------------------------------------------------
    // Dialogs
    // ---------------------------------------------------------------

    fn render_dialogs(&mut self, ctx: &Context, engine: &mut NotepadEngine) {
        if engine.clear_pending() {
            let mut answer = None;
            egui::Window::new("clear notes")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("clear all text and drawings?");
                    ui.label("you can undo this.");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("cancel").clicked() {
                            answer = Some(false);
                        }
                        if ui.button("clear").clicked() {
                            answer = Some(true);
                        }
                    });
                });
            if let Some(confirmed) = answer {
                engine.confirm_clear(confirmed);
            }
        }

        if let Some(message) = self.save_error.clone() {
            egui::Window::new("notes not saved")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("your notes could not be saved:");
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("ok").clicked() {
                        self.save_error = None;
                    }
                });
        }

        let mut picked = None;
        let mut close = false;
        if let Some(browser) = self.browser.as_mut() {
            egui::Window::new("insert image")
                .collapsible(false)
                .resizable(false)
                .default_width(380.0)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("location:");
                        ui.label(browser.current_dir.to_string_lossy().to_string());
                    });
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                        let entries = browser.entries.clone();
                        for (idx, entry) in entries.iter().enumerate() {
                            let selected = browser.selected_index == Some(idx);
                            let response = ui.add(
                                FileListItem::new(&entry.name, entry.is_directory).selected(selected),
                            );
                            if response.clicked() {
                                browser.selected_index = Some(idx);
                            }
                            if response.double_clicked() {
                                if entry.is_directory {
                                    browser.navigate_to(entry.path.clone());
                                } else {
                                    picked = Some(entry.path.clone());
                                }
                            }
                        }
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("cancel").clicked() {
                            close = true;
                        }
                        if ui.button("insert").clicked() {
                            if let Some(entry) = browser.selected_entry() {
                                if !entry.is_directory {
                                    picked = Some(entry.path.clone());
                                }
                            }
                        }
                    });
                });
        }
        if let Some(path) = picked {
            engine.request_image(ImageSource::File(path));
            close = true;
        }
        if close {
            self.browser = None;
        }
    }
}

/// One glyph with its decorations. Bold is faked with a second pass
/// shifted by a fraction of a pixel.
fn paint_char(painter: &Painter, rect: Rect, c: char, style: &CharStyle, color: Color32) {
    let font = font_for(style);
    if style.italic {
        let mut job = LayoutJob::default();
        job.append(
            &c.to_string(),
            0.0,
            TextFormat {
                font_id: font,
                color,
                italics: true,
                ..Default::default()
            },
        );
        let galley = painter.layout_job(job);
        if style.bold {
            painter.galley(rect.min + vec2(0.6, 0.0), galley.clone(), color);
        }
        painter.galley(rect.min, galley, color);
    } else {
        if style.bold {
            painter.text(rect.min + vec2(0.6, 0.0), Align2::LEFT_TOP, c, font.clone(), color);
        }
        painter.text(rect.min, Align2::LEFT_TOP, c, font, color);
    }
    if style.underline {
        let y = rect.bottom() - 2.0;
        painter.hline(rect.x_range(), y, Stroke::new(1.0, color));
    }
}

/// Read an image from the system clipboard and queue it.
fn paste_clipboard_image(engine: &mut NotepadEngine) {
    let image = arboard::Clipboard::new().and_then(|mut c| c.get_image());
    match image {
        Ok(data) => engine.request_image(ImageSource::Pixels {
            width: data.width as u32,
            height: data.height as u32,
            rgba: data.bytes.into_owned(),
        }),
        Err(e) => {
            tracing::info!(error = %e, "no image on the clipboard");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizer_first_frame_is_due() {
        let mut sizer = CanvasSizer::default();
        assert!(sizer.due(vec2(600.0, 800.0), Instant::now()));
    }

    #[test]
    fn test_sizer_on_resize_and_interval() {
        let mut sizer = CanvasSizer::default();
        let start = Instant::now();
        let viewport = vec2(600.0, 800.0);
        assert!(sizer.due(viewport, start));
        assert!(!sizer.due(viewport, start + Duration::from_millis(500)));
        assert!(sizer.due(vec2(700.0, 800.0), start + Duration::from_millis(600)));
        let last = start + Duration::from_millis(600);
        assert!(!sizer.due(vec2(700.0, 800.0), last + Duration::from_millis(1999)));
        assert!(sizer.due(vec2(700.0, 800.0), last + CANVAS_CHECK_INTERVAL));
    }

    #[test]
    fn test_rgba_conversion() {
        assert_eq!(rgba([255, 0, 0, 255]), Color32::from_rgb(255, 0, 0));
    }
}
