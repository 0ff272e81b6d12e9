mod app;
mod chat;
mod config;
mod content;
mod notepad;
mod panel;
mod platform;
mod readmode;
mod resize;
mod shell;

use app::SlowCourseApp;
use config::CourseConfig;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = CourseConfig::load();
    // first argument picks the track whose notes are opened
    if let Some(track) = std::env::args().nth(1) {
        config.track_id = track;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([900.0, 560.0])
        .with_title("slowCourse");
    if let Some(pos) = slowcore::cascade_position() {
        viewport = viewport.with_position(pos);
    }
    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native("slowCourse", options, Box::new(|cc| {
        Box::new(SlowCourseApp::new(cc, config))
    }))
}
