use crate::app::ConstraintViewerApp;
use crate::model::priority::PRIORITY_BANDS;
use crate::ui::theme;
use egui::{Context, RichText, Window};

pub fn show_about_dialog(app: &mut ConstraintViewerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 210.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Constraint Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Telescope observation constraints");
                ui.label("plotted as priority over time.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

pub fn show_csv_help_dialog(app: &mut ConstraintViewerApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("Constraint CSV Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([480.0, 420.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_columns")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                        ui.end_row();

                        ui.label(RichText::new("Day count").strong());
                        ui.label("TJD, Time, Day, Day Count, Start");
                        ui.end_row();

                        ui.label(RichText::new("Priority").strong());
                        ui.label("Value, Priority, Pri, Level");
                        ui.end_row();

                        ui.label(RichText::new("Name (optional)").strong());
                        ui.label("Name, Constraint, PCF, Label");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Priority Bands").strong());
                ui.add_space(2.0);
                for band in &PRIORITY_BANDS {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("■").color(band.color));
                        ui.label(format!("{}  ({:.1}, {:.1}]", band.label, band.lower, band.upper));
                    });
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Day counts must increase from row to row.",
                    "• A first row dated before the calendar is the \"no data\" marker and is not plotted.",
                    "• Other rows before the calendar carry their value onto its first day.",
                    "• Rows with an unreadable day count or value are skipped.",
                    "• Without a name column the file name is used.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Example").strong());
                ui.add_space(2.0);
                let example = "Constraint;TJD;Priority\n\
                               Moon Avoid;12880.5;0.2\n\
                               Moon Avoid;12884.5;0.45\n\
                               Moon Avoid;12890.5;0.0";
                egui::Frame::canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
