use crate::app::ConstraintViewerApp;
use crate::settings::ViewerSettings;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut ConstraintViewerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open Dataset...", icons::FOLDER_OPEN)).clicked() {
                app.open_dataset();
                ui.close_menu();
            }
            if ui.button(format!("{}  Load Bundled Sample", icons::PACKAGE)).clicked() {
                app.load_bundled();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Import Constraint CSV...", icons::FILE_CSV)).clicked() {
                app.import_constraint_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                let dir = ViewerSettings::config_dir();
                if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
                    app.status_message = format!("Cannot open {}: {}", dir.display(), e);
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!("{}  Unzoom          any key", icons::ARROWS_OUT_LINE_HORIZONTAL))
                .clicked()
            {
                app.unzoom();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  CSV Import Format", icons::QUESTION)).clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button(format!("{}  About", icons::INFO)).clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned dataset name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(app.dataset_label()).size(11.0).weak());
        });
    });
}
