#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod error;
mod io;
mod model;
mod settings;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = settings::ViewerSettings::load();
    let (dataset, dataset_path, status) = app::initial_dataset(&settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1560.0, 420.0])
            .with_min_inner_size([800.0, 300.0])
            .with_title("Constraint Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Constraint Timeline",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ConstraintViewerApp::new(
                cc,
                settings,
                dataset,
                dataset_path,
                status,
            )))
        }),
    )?;
    Ok(())
}
