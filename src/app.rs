use std::path::PathBuf;

use crate::error::Result;
use crate::io;
use crate::model::{Dataset, Layout};
use crate::settings::ViewerSettings;
use crate::ui;
use crate::ui::canvas::CanvasState;
use crate::ui::controller::InteractionController;
use crate::ui::legend::Readout;
use crate::ui::surface::Scene;

/// Main application state.
pub struct ConstraintViewerApp {
    settings: ViewerSettings,
    layout: Layout,
    dataset: Dataset,
    dataset_path: Option<PathBuf>,

    scene: Scene,
    controller: InteractionController,
    canvas_state: CanvasState,
    readout: Option<Readout>,

    // Window state, used to detect resize and focus loss
    last_screen: Option<egui::Rect>,
    was_focused: bool,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    // Status message
    pub status_message: String,
}

/// Dataset to show at startup: the configured feed, or the bundled sample if
/// none is configured or it fails to load.
pub fn initial_dataset(settings: &ViewerSettings) -> Result<(Dataset, Option<PathBuf>, String)> {
    if let Some(path) = &settings.dataset_path {
        match io::load_dataset(path) {
            Ok(dataset) => {
                let status = format!("Loaded {}", path.display());
                return Ok((dataset, Some(path.clone()), status));
            }
            Err(e) => {
                log::warn!("Falling back to bundled sample: {:?}: {}", path, e);
                let status = format!("Could not load {}: {}; showing bundled sample", path.display(), e);
                return Ok((io::bundled_dataset()?, None, status));
            }
        }
    }
    Ok((io::bundled_dataset()?, None, "Ready".to_string()))
}

impl ConstraintViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: ViewerSettings,
        dataset: Dataset,
        dataset_path: Option<PathBuf>,
        status_message: String,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let layout = settings.layout();
        let scene = ui::timeline::build_scene(&layout, &dataset);
        let controller = InteractionController::new(layout, &dataset);

        Self {
            settings,
            layout,
            dataset,
            dataset_path,
            scene,
            controller,
            canvas_state: CanvasState::default(),
            readout: None,
            last_screen: None,
            was_focused: true,
            show_about: false,
            show_csv_help: false,
            status_message,
        }
    }

    /// Replace the dataset and rebuild every layer at the full range.
    fn set_dataset(&mut self, dataset: Dataset, path: Option<PathBuf>) {
        self.scene = ui::timeline::build_scene(&self.layout, &dataset);
        self.controller = InteractionController::new(self.layout, &dataset);
        self.canvas_state = CanvasState::default();
        self.readout = None;
        self.dataset = dataset;
        self.dataset_path = path;
    }

    pub fn dataset_label(&self) -> String {
        match &self.dataset_path {
            Some(path) => path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("dataset")
                .to_string(),
            None => "Bundled sample".to_string(),
        }
    }

    // --- File operations ---

    pub fn open_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule Feed", &["json"])
            .pick_file()
        {
            match io::load_dataset(&path) {
                Ok(dataset) => {
                    self.status_message = format!(
                        "Loaded {} constraints over {} days",
                        dataset.len(),
                        dataset.time_index.len()
                    );
                    self.set_dataset(dataset, Some(path.clone()));
                    self.settings.dataset_path = Some(path);
                    self.settings.save();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn load_bundled(&mut self) {
        match io::bundled_dataset() {
            Ok(dataset) => {
                self.set_dataset(dataset, None);
                self.settings.dataset_path = None;
                self.settings.save();
                self.status_message = "Bundled sample loaded".to_string();
            }
            Err(e) => self.status_message = format!("Error loading: {}", e),
        }
    }

    pub fn import_constraint_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            let first_day = self.dataset.global_range().start;
            let imported = io::csv_import::import_constraint_csv(&path, first_day)
                .and_then(|(series, skipped)| {
                    let name = series.name.clone();
                    let count = series.samples().len();
                    let mut dataset = self.dataset.clone();
                    dataset.push(series)?;
                    Ok((dataset, name, count, skipped))
                });

            match imported {
                Ok((dataset, name, count, skipped)) => {
                    let path = self.dataset_path.clone();
                    self.set_dataset(dataset, path);
                    self.status_message = if skipped > 0 {
                        format!("Imported '{}' ({} change points, {} rows skipped)", name, count, skipped)
                    } else {
                        format!("Imported '{}' ({} change points)", name, count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    // --- View operations ---

    pub fn unzoom(&mut self) {
        let range = self.controller.key_press(&mut self.scene, &self.dataset);
        self.status_message = format!("Unzoomed to {} .. {}", range.start, range.end);
    }

    fn dialog_open(&self) -> bool {
        self.show_about || self.show_csv_help
    }

    fn handle_window_events(&mut self, ctx: &egui::Context) {
        let (screen, focused, any_key) = ctx.input(|i| {
            let any_key = i.events.iter().any(|e| {
                matches!(
                    e,
                    egui::Event::Key { pressed: true, repeat: false, modifiers, .. }
                        if !modifiers.command
                )
            });
            (i.screen_rect(), i.focused, any_key)
        });

        if self.last_screen.is_some_and(|last| last != screen) {
            self.controller.resize(&mut self.scene);
            self.readout = None;
        }
        self.last_screen = Some(screen);

        if self.was_focused && !focused {
            self.controller.focus_lost(&mut self.scene);
        }
        self.was_focused = focused;

        if any_key && !self.dialog_open() && !ctx.wants_keyboard_input() {
            self.unzoom();
        }
    }
}

impl eframe::App for ConstraintViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_window_events(ctx);

        // Top panel: menu bar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let text = match &self.readout {
                        Some(readout) => readout.summary(),
                        None => self.status_message.clone(),
                    };
                    ui.label(
                        egui::RichText::new(text)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let range = self.controller.view_range();
                        ui.label(
                            egui::RichText::new(format!(
                                "Range: {} .. {} ({} days)",
                                range.start,
                                range.end,
                                range.days()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_SECONDARY),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_SECONDARY),
                        );
                        ui.label(
                            egui::RichText::new(format!("Constraints: {}", self.dataset.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_SECONDARY),
                        );
                    });
                });
            });

        // Central panel: layer stack
        let canvas_frame = egui::Frame::default()
            .fill(ui::theme::BG_CANVAS)
            .inner_margin(egui::Margin::same(8.0));
        egui::CentralPanel::default().frame(canvas_frame).show(ctx, |ui| {
            let interaction = ui::canvas::show_layer_stack(
                &mut self.scene,
                &mut self.controller,
                &self.dataset,
                &mut self.canvas_state,
                ui,
            );
            if let Some(range) = interaction.range_changed {
                self.status_message = format!("Zoomed to {} .. {}", range.start, range.end);
                self.readout = None;
            }
            if let Some(readout) = interaction.readout {
                self.readout = Some(readout);
            }
            if interaction.left {
                self.readout = None;
            }
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}
