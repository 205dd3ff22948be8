mod app;

use clap::Parser;

use indexpick::config::settings as config;
use indexpick::picker::Preset;

#[derive(Parser)]
#[command(name = "indexpick", about = "Demo for the indexed color picker widget")]
struct Cli {
    /// Palette to start with (defaults to the one in settings.json)
    #[arg(long, value_enum)]
    palette: Option<Preset>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    // Первый запуск — кладём шаблон настроек рядом с конфигом
    let path = config::config_path();
    let settings = config::load_settings_from(&path);
    if !path.exists() {
        config::save_settings(&settings);
    }
    let initial = cli.palette.unwrap_or(settings.default_palette);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 560.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IndexPick",
        options,
        Box::new(move |cc| Ok(Box::new(app::DemoApp::new(cc, settings, initial)?))),
    )
}
