//! slowCourse application: page shell, read mode and the right panel

use eframe::App;
use egui::{
    pos2, vec2, Align, Align2, Context, CursorIcon, Id, Key, Layout, Rect, RichText,
    Sense, Stroke, Ui, ViewportCommand,
};
use slowcore::dither;
use slowcore::drag::StyleHandle;
use slowcore::repaint::RepaintController;
use slowcore::safety::catch_or;
use slowcore::theme::{consume_special_keys, menu_bar, Palette, SlowTheme, ThemeProvider, ThemeState};
use slowcore::widgets::{status_bar, SlowButton};

use crate::config::CourseConfig;
use crate::content::{self, Block, COURSE, LESSON};
use crate::panel::{Feature, PanelHost};
use crate::platform::{self, ViewportFullscreen};
use crate::readmode::{FullscreenWatcher, FullscreenZoomController, TouchTracker};
use crate::resize::DEFAULT_PANEL_WIDTH;
use crate::shell::{HeaderState, Sidebar, SidebarSection};

const SIDEBAR_OPEN_WIDTH: f32 = 220.0;
const SIDEBAR_CLOSED_WIDTH: f32 = 64.0;
const RAIL_WIDTH: f32 = 64.0;
const HANDLE_WIDTH: f32 = 6.0;

pub struct SlowCourseApp {
    config: CourseConfig,
    theme: ThemeState,
    repaint: RepaintController,
    style: StyleHandle,

    sidebar: Sidebar,
    header: HeaderState,
    panel: PanelHost,

    read_mode: FullscreenZoomController,
    fullscreen_watcher: FullscreenWatcher,
    touches: TouchTracker,

    show_about: bool,
}

impl SlowCourseApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CourseConfig) -> Self {
        let style = StyleHandle::new();
        let panel = PanelHost::new(
            style.clone(),
            config.store(),
            &config.track_id,
            DEFAULT_PANEL_WIDTH,
            config.right_panel_open,
        );
        tracing::info!(track = %config.track_id, "opening course");
        Self {
            theme: ThemeState::new(config.theme),
            repaint: RepaintController::new(),
            style,
            sidebar: Sidebar::default(),
            header: HeaderState::default(),
            panel,
            read_mode: FullscreenZoomController::new(),
            fullscreen_watcher: FullscreenWatcher::default(),
            touches: TouchTracker::default(),
            show_about: false,
            config,
        }
    }

    fn persist_config(&mut self) {
        self.config.theme = self.theme.theme();
        self.config.right_panel_open = self.panel.is_open();
        self.config.save();
    }

    fn toggle_theme(&mut self) {
        self.theme.toggle_theme();
        self.persist_config();
    }

    // ---------------------------------------------------------------
    // Input routing
    // ---------------------------------------------------------------

    fn handle_read_mode_input(&mut self, ctx: &Context) {
        if let Some(fullscreen) = platform::is_fullscreen(ctx) {
            if let Some(changed) = self.fullscreen_watcher.observe(fullscreen) {
                self.read_mode.on_fullscreen_change(changed);
            }
        }
        if !self.read_mode.is_fullscreen() {
            return;
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.read_mode.exit(&mut ViewportFullscreen::new(ctx));
            return;
        }
        for delta_y in platform::zoom_wheel(ctx) {
            self.read_mode.on_wheel(delta_y, true);
        }
        for gesture in platform::touch_gestures(ctx, &mut self.touches) {
            self.read_mode.on_gesture(&gesture);
        }
        if self.read_mode.has_pending() {
            self.repaint.mark_needs_repaint();
        }
        self.read_mode.on_frame();
    }

    fn handle_resize_input(&mut self, ctx: &Context) {
        if self.panel.resize().is_dragging() {
            let viewport_width = ctx.screen_rect().width();
            for event in platform::drag_pointer_events(ctx) {
                self.panel.resize_mut().on_pointer(event, viewport_width);
            }
            if self.panel.resize_mut().on_frame() {
                self.repaint.mark_needs_repaint();
            }
        }
        platform::apply_document_style(ctx, self.style.current());
    }

    // ---------------------------------------------------------------
    // Read mode
    // ---------------------------------------------------------------

    fn render_read_mode(&mut self, ctx: &Context, palette: Palette) {
        let zoom = self.read_mode.zoom();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.bg))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("read_mode_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let width = (ui.available_width() - 128.0).clamp(320.0, 1100.0 * zoom);
                        ui.add_space(72.0);
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(width);
                            ui.with_layout(Layout::top_down(Align::LEFT), |ui| {
                                show_lesson(ui, palette, zoom, None);
                            });
                        });
                    });
            });

        if !self.read_mode.chrome_visible() {
            return;
        }
        let mut exit = false;
        let mut toggle_theme = false;
        egui::Area::new(Id::new("read_mode_toolbar"))
            .anchor(Align2::CENTER_TOP, [0.0, 16.0])
            .show(ctx, |ui| {
                menu_bar(ui, |ui| {
                    ui.label(format!("{:.0}%", zoom * 100.0));
                    ui.separator();
                    let theme_label = self.theme.theme().toggled().name();
                    if ui.add(SlowButton::new(theme_label).width(56.0)).clicked() {
                        toggle_theme = true;
                    }
                    if ui
                        .add(SlowButton::new("exit").width(56.0))
                        .on_hover_text("exit fullscreen (esc)")
                        .clicked()
                    {
                        exit = true;
                    }
                });
            });
        if toggle_theme {
            self.toggle_theme();
        }
        if exit {
            self.read_mode.exit(&mut ViewportFullscreen::new(ctx));
        }
    }

    // ---------------------------------------------------------------
    // Normal layout
    // ---------------------------------------------------------------

    fn render_header(&mut self, ctx: &Context, palette: Palette) -> bool {
        let mut enter_read_mode = false;
        egui::TopBottomPanel::top("course_header")
            .exact_height(self.header.height())
            .frame(SlowTheme::title_bar_frame(self.theme.theme()))
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let size = if self.header.is_collapsed() { 16.0 } else { 20.0 };
                    ui.label(RichText::new(COURSE.title).size(size).strong());
                    ui.label(RichText::new(COURSE.status).small().color(palette.fg));
                    if !self.header.is_collapsed() {
                        ui.separator();
                        ui.label(format!("{} Lessons", COURSE.lessons));
                        ui.label(COURSE.duration);
                        ui.label(format!("{:.1} ({})", COURSE.rating, COURSE.reviews));
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .add(SlowButton::new("fullscreen").width(84.0))
                            .on_hover_text("read mode")
                            .clicked()
                        {
                            enter_read_mode = true;
                        }
                    });
                });
            });
        enter_read_mode
    }

    fn render_sidebar(&mut self, ctx: &Context) {
        let open = self.sidebar.is_open();
        let mut toggle_theme = false;
        egui::SidePanel::left("course_sidebar")
            .exact_width(if open { SIDEBAR_OPEN_WIDTH } else { SIDEBAR_CLOSED_WIDTH })
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                if open {
                    ui.label(RichText::new(content::APP_NAME).strong().size(18.0));
                    ui.label(RichText::new(content::APP_TAGLINE).small());
                } else {
                    ui.label(RichText::new("LH").strong());
                }
                ui.separator();

                for section in SidebarSection::ALL {
                    let label = if open { section.label() } else { &section.label()[..1] };
                    let selected = self.sidebar.visible_section() == Some(section);
                    if ui
                        .add(SlowButton::new(label).selected(selected).width(ui.available_width()))
                        .clicked()
                    {
                        self.sidebar.toggle_section(section);
                    }
                }

                match self.sidebar.visible_section() {
                    Some(SidebarSection::Modules) => {
                        ui.add_space(6.0);
                        ui.label(RichText::new("MODULES").small());
                        for module in content::MODULES {
                            let _ = ui.selectable_label(false, module);
                        }
                    }
                    Some(SidebarSection::Resources) => {
                        ui.add_space(6.0);
                        ui.label(RichText::new("RESOURCES").small());
                        for item in content::SIDEBAR_RESOURCES {
                            let _ = ui.selectable_label(false, item);
                        }
                    }
                    None => {}
                }

                ui.with_layout(Layout::bottom_up(Align::LEFT), |ui| {
                    ui.add_space(8.0);
                    let full = ui.available_width();
                    if ui.add(SlowButton::new(if open { "exit" } else { "x" }).width(full)).clicked() {
                        ui.ctx().send_viewport_cmd(ViewportCommand::Close);
                    }
                    if ui.add(SlowButton::new(if open { "settings" } else { "s" }).width(full)).clicked() {
                        self.show_about = true;
                    }
                    let theme_label = self.theme.theme().toggled().name();
                    if ui.add(SlowButton::new(theme_label).width(full)).clicked() {
                        toggle_theme = true;
                    }
                    ui.separator();
                });
            });
        if toggle_theme {
            self.toggle_theme();
        }
    }

    fn render_right_panel(&mut self, ctx: &Context, palette: Palette) {
        if !self.panel.is_open() {
            let mut chosen = None;
            egui::SidePanel::right("feature_rail")
                .exact_width(RAIL_WIDTH)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.add_space(12.0);
                    for feature in Feature::ALL {
                        if ui
                            .add(SlowButton::new(feature.rail_label()).width(ui.available_width()))
                            .on_hover_text(feature.label())
                            .clicked()
                        {
                            chosen = Some(feature);
                        }
                        ui.add_space(4.0);
                    }
                });
            if let Some(feature) = chosen {
                self.panel.open_feature(feature);
                self.persist_config();
            }
            return;
        }

        let width = self.panel.width();
        let repaint = &mut self.repaint;
        let panel = &mut self.panel;
        egui::SidePanel::right("right_panel")
            .exact_width(width + HANDLE_WIDTH)
            .resizable(false)
            .frame(egui::Frame::none().fill(palette.panel))
            .show(ctx, |ui| {
                let full = ui.max_rect();
                let handle_rect = Rect::from_min_max(full.left_top(), pos2(full.left() + HANDLE_WIDTH, full.bottom()));
                let handle = ui.interact(handle_rect, Id::new("panel_resize_handle"), Sense::drag());
                if handle.hovered() || panel.resize().is_dragging() {
                    ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
                    dither::draw_dither_hover(ui.painter(), handle_rect, palette.fg);
                }
                ui.painter().vline(
                    handle_rect.right(),
                    handle_rect.y_range(),
                    Stroke::new(1.0, palette.fg),
                );
                if handle.drag_started() {
                    if let Some(pos) = handle.interact_pointer_pos() {
                        panel.resize_mut().begin_drag(pos);
                    }
                }

                let content_rect = full.with_min_x(handle_rect.right() + 4.0).shrink2(vec2(0.0, 4.0));
                ui.allocate_ui_at_rect(content_rect, |ui| {
                    catch_or((), || panel.show(ui, palette, repaint));
                });
            });
        if !self.panel.is_open() {
            self.persist_config();
        }
    }

    fn render_lesson(&mut self, ctx: &Context, palette: Palette) -> bool {
        let mut enter_read_mode = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.bg).inner_margin(egui::Margin::same(16.0)))
            .show(ctx, |ui| {
                let output = egui::ScrollArea::vertical()
                    .id_source("lesson_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.set_max_width(ui.available_width().min(960.0));
                        show_lesson(ui, palette, 1.0, Some(&mut enter_read_mode));
                    });
                self.header.on_scroll(output.state.offset.y);
            });
        enter_read_mode
    }

    fn render_about(&mut self, ctx: &Context) {
        let mut open = self.show_about;
        egui::Window::new("about slowCourse")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("track: {}", self.panel.notepad().track_id()));
                ui.label(format!("config: {}", CourseConfig::default_path().display()));
                ui.label(format!("theme: {}", self.theme.theme().name()));
                ui.add_space(6.0);
                ui.label("notes are saved per track when you press save.");
            });
        self.show_about = open;
    }
}

impl App for SlowCourseApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);
        self.theme.sync(ctx);
        consume_special_keys(ctx);
        let palette = self.theme.palette();

        self.handle_read_mode_input(ctx);

        if self.read_mode.is_fullscreen() {
            self.render_read_mode(ctx, palette);
            self.repaint.end_frame(ctx);
            return;
        }

        self.handle_resize_input(ctx);

        let mut enter_read_mode = self.render_header(ctx, palette);
        egui::TopBottomPanel::bottom("course_status").show(ctx, |ui| {
            let saved = match self.panel.notepad().saved_at() {
                Some(at) => format!("notes saved {}", at.with_timezone(&chrono::Local).format("%H:%M")),
                None => "notes not saved".to_string(),
            };
            status_bar(ui, &format!("lesson {}  |  {}", LESSON.number, saved));
        });
        self.render_sidebar(ctx);
        self.render_right_panel(ctx, palette);
        enter_read_mode |= self.render_lesson(ctx, palette);

        if self.show_about {
            self.render_about(ctx);
        }

        if enter_read_mode {
            self.panel.resize_mut().end_drag();
            self.read_mode.enter(&mut ViewportFullscreen::new(ctx));
            self.repaint.mark_needs_repaint();
        }

        self.repaint.end_frame(ctx);
    }
}

/// The lesson body. `scale` multiplies every text size; `read_mode` gets
/// set when the in-lesson fullscreen button is pressed (omitted in read
/// mode itself).
fn show_lesson(ui: &mut Ui, palette: Palette, scale: f32, read_mode: Option<&mut bool>) {
    let s = |size: f32| size * scale;

    ui.add_space(s(12.0));
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(format!("LESSON {}", LESSON.number)).size(s(11.0)));
            ui.label(RichText::new(LESSON.title).size(s(18.0)).strong());
        });
        if let Some(flag) = read_mode {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .add(SlowButton::new("read mode"))
                    .on_hover_text("enter fullscreen mode")
                    .clicked()
                {
                    *flag = true;
                }
            });
        }
    });
    ui.separator();
    ui.add_space(s(12.0));
    ui.label(RichText::new(LESSON.headline).size(s(30.0)).strong());
    ui.label(RichText::new(LESSON.subtitle).size(s(17.0)));
    ui.add_space(s(12.0));

    for block in LESSON.blocks {
        match block {
            Block::Heading(text) => {
                ui.add_space(s(16.0));
                ui.separator();
                ui.label(RichText::new(*text).size(s(22.0)).strong());
                ui.add_space(s(6.0));
            }
            Block::Paragraph(text) => {
                ui.label(RichText::new(*text).size(s(15.0)));
                ui.add_space(s(10.0));
            }
            Block::GridExample => grid_example(ui, palette, scale),
            Block::Video { title, duration } => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.add_space(s(24.0));
                        ui.label(RichText::new("[ play ]").size(s(20.0)));
                        ui.label(RichText::new(*title).size(s(16.0)).strong());
                        ui.label(RichText::new(format!("Duration: {duration}")).size(s(12.0)));
                        ui.add_space(s(24.0));
                    });
                });
            }
            Block::NextSteps => {
                ui.add_space(s(20.0));
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new("Ready for the next step?").size(s(20.0)).strong());
                    ui.label(
                        RichText::new(
                            "You've completed this lesson. Test your knowledge with a quick quiz or \
                             continue to the next lesson.",
                        )
                        .size(s(14.0)),
                    );
                    ui.add_space(s(8.0));
                    ui.horizontal(|ui| {
                        let _ = ui.add(SlowButton::new("Take Quiz"));
                        let _ = ui.add(SlowButton::new("Next Lesson"));
                    });
                });
                ui.add_space(s(20.0));
            }
        }
    }
}

/// Three column placeholders, the middle one filled.
fn grid_example(ui: &mut Ui, palette: Palette, scale: f32) {
    let column = vec2(96.0, 144.0) * scale;
    let gap = 32.0 * scale;
    let height = column.y + 48.0 * scale;
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_stroke(rect.shrink(1.0), 8.0, Stroke::new(1.0, palette.fg));
    let total = column.x * 3.0 + gap * 2.0;
    let mut x = rect.center().x - total / 2.0;
    for i in 0..3 {
        let col = Rect::from_min_size(pos2(x, rect.center().y - column.y / 2.0), column);
        if i == 1 {
            painter.rect_filled(col, 6.0, palette.fg);
        } else {
            painter.rect_filled(col, 6.0, palette.bg);
            painter.rect_stroke(col, 6.0, Stroke::new(1.0, palette.fg));
        }
        x += column.x + gap;
    }
}
