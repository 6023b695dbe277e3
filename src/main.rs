use clap::Parser;
use eframe::egui;

use shadertune::app::ShaderTuneApp;
use shadertune::cli::{self, CliArgs};
use shadertune::{i18n, log_info, log_warn, logger};

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // -- Headless check mode ------------------------------------------
    if args.check {
        let code = cli::run_check(&args);
        std::process::exit(if code == std::process::ExitCode::SUCCESS { 0 } else { 1 });
    }

    // -- GUI mode -----------------------------------------------------

    // Initialize session log (overwrites previous session log)
    logger::init();

    i18n::init();
    let lang = args.lang.clone().unwrap_or_else(i18n::detect_system_language);
    i18n::set_language(&lang);
    log_info!("Language: {}", i18n::current_language());

    let (shaders, errors) = cli::load_shaders(&args);
    for e in &errors {
        log_warn!("{}", e);
    }
    log_info!("{} shader(s) available", shaders.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 600.0])
            .with_title("ShaderTune"),
        ..Default::default()
    };

    eframe::run_native(
        "ShaderTune",
        options,
        Box::new(move |cc| Box::new(ShaderTuneApp::new(cc, shaders, errors))),
    )
}
