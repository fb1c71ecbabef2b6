use eframe::egui;
use reel_trivia::ui::app::TriviaApp;

fn main() -> eframe::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Reel Trivia")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Reel Trivia",
        options,
        Box::new(|_cc| Ok(Box::new(TriviaApp::new()))),
    )
}
