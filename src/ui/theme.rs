use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_CANVAS: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(244, 245, 248);
pub const BG_STATUS: Color32 = Color32::from_rgb(232, 234, 240);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(214, 217, 226);
pub const ACCENT: Color32 = Color32::from_rgb(70, 120, 200);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(20, 22, 28);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(90, 96, 110);

/// Axis lines, ticks and labels.
pub const AXIS: Color32 = Color32::BLACK;
/// Ticks where the year changes.
pub const YEAR_BOUNDARY: Color32 = Color32::RED;
/// Cursor time bar.
pub const INDICATOR: Color32 = Color32::RED;
/// Drag start/end markers on the unzoomed axis.
pub const DRAG_MARKER: Color32 = Color32::BLUE;
/// Highlight between the drag markers (blue at 20% opacity).
pub const DRAG_SELECTION: Color32 = Color32::from_rgba_premultiplied(0, 0, 51, 51);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const LAYER_GAP: f32 = 6.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const INDICATOR_WIDTH: f64 = 2.0;
pub const DRAG_MARKER_WIDTH: f64 = 3.0;
pub const TICK_LONG_INSET: f64 = 1.0;
pub const TICK_MEDIUM: f64 = 8.0;
pub const TICK_SHORT_LOCAL: f64 = 4.0;
pub const TICK_SHORT_GLOBAL: f64 = 6.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_label() -> FontId {
    FontId::proportional(10.0)
}

pub fn font_readout() -> FontId {
    FontId::monospace(10.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
