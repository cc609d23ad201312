//! The "Legend & Time Display" color bar: band swatches on the left, the
//! time readout grid on the right.

use crate::model::priority::{classify, PRIORITY_BANDS};
use crate::model::{ActiveValue, Layout, TimeIndexEntry, Transition};
use crate::ui::surface::{Scene, Target, TargetId};
use crate::ui::theme;

const SWATCH_WIDTH: f64 = 30.0;
const SEPARATOR_X: f64 = 125.0;
const ROW_TITLE_X: f64 = 130.0;
const HINT_X: f64 = 1120.0;

/// Header columns, offsets from the left margin.
const TJD_HEADER_X: f64 = 350.0;
const SOGS_HEADER_X: f64 = 520.0;
const ABS_HEADER_X: f64 = 835.0;

/// Value columns: `(from, to)` offsets from the left margin.
const TJD_X: (f64, f64) = (378.0, 440.0);
const SOGS_X: (f64, f64) = (588.0, 695.0);
const ABS_X: (f64, f64) = (897.0, 993.0);
const PRIORITY_X: f64 = 300.0;

/// Text baselines of the four readout rows, top to bottom.
const SELECTED_ROW_Y: f64 = 49.0;
const CURSOR_ROW_Y: f64 = 33.0;
const TRANSITION_ROW_Y: f64 = 17.0;
const PRIORITY_ROW_Y: f64 = 2.0;

const VALUE_WIDTH: f64 = 100.0;

/// Everything shown in the time display for one pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    /// Calendar rows at the ends of the current view range.
    pub selected: Option<(TimeIndexEntry, TimeIndexEntry)>,
    /// Calendar row at or before the cursor.
    pub cursor: Option<TimeIndexEntry>,
    /// Day count under the cursor, unsnapped.
    pub cursor_day: f64,
    /// Constraint being inspected.
    pub constraint: Option<String>,
    /// Active change point of the inspected constraint and the one after it.
    pub transition: Option<(Transition, Transition)>,
    pub priority: ActiveValue,
}

impl Readout {
    pub fn new(cursor_day: f64) -> Self {
        Self {
            selected: None,
            cursor: None,
            cursor_day,
            constraint: None,
            transition: None,
            priority: ActiveValue::NoData,
        }
    }

    /// `0.10286 (Priority 5)`, `0` or `no data`.
    pub fn priority_text(&self) -> String {
        let Some(v) = self.priority.value() else {
            return "no data".to_string();
        };
        match classify(v) {
            Some(band) => format!("{} ({})", v, band.label),
            None => format!("{}", v),
        }
    }

    /// One-line form for the status bar.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("tjd {:.3}", self.cursor_day)];
        if let Some(entry) = &self.cursor {
            parts.push(entry.short_label.clone());
            if let Some(time) = entry.absolute_time() {
                parts.push(time.format("%Y-%m-%d %H:%M UTC").to_string());
            }
        }
        if let Some(name) = &self.constraint {
            parts.push(format!("{}: {}", name, self.priority_text()));
        }
        parts.join("  |  ")
    }
}

/// Draw the static part of the color bar.
pub fn draw_color_bar_labels(scene: &mut Scene, target: TargetId, layout: &Layout) {
    let base = target.base();
    let lm = layout.left_margin;
    let height = layout.color_bar_height;
    let row_width = lm * 3.0;

    label(scene, "Legend &", 0.0, height - 8.0, lm, base);
    label(scene, "Time Display", 0.0, height - 20.0, lm, base);
    scene.v_line(lm + SEPARATOR_X, 0.0, theme::AXIS, base);

    let rows = [
        (
            SELECTED_ROW_Y + 1.0,
            "Unzoomed Timeline Selected Range:",
            "Hover mouse over Constraint data to view Selected Time and Priority.",
            true,
        ),
        (
            CURSOR_ROW_Y + 1.0,
            "Zoomed Timeline Time Bar Position:",
            "Within Unzoomed Timeline, downclick to set the Zoomed Start Time,",
            true,
        ),
        (
            TRANSITION_ROW_Y + 1.0,
            "Transition Time Range for Selected PCF:",
            "move the cursor, and upclick to set the Zoomed End Time.",
            true,
        ),
        (
            PRIORITY_ROW_Y,
            "Constraint Priority at Selected Time:",
            "Press any key to reset the visualization to Unzoomed Time.",
            false,
        ),
    ];
    for (y, title, hint, with_headers) in rows {
        label(scene, title, lm + ROW_TITLE_X, y, row_width, base);
        label(scene, hint, lm + HINT_X, y, row_width, base);
        if with_headers {
            label(scene, "[tjd]:", lm + TJD_HEADER_X, y, row_width, base);
            label(scene, "[sogs-date]:", lm + SOGS_HEADER_X, y, row_width, base);
            label(scene, "[abs-time]:", lm + ABS_HEADER_X, y, row_width, base);
        }
    }

    let swatch_height = height / PRIORITY_BANDS.len() as f64;
    for (i, band) in PRIORITY_BANDS.iter().enumerate() {
        let top = height - swatch_height * i as f64;
        let baseline = top - swatch_height + 1.0;
        scene.filled_rect(lm, top, SWATCH_WIDTH, swatch_height, band.color, base);
        label(scene, band.label, lm + 32.0, baseline, lm, base);
        label(scene, &format!("{:.1}", band.lower), lm + 83.0, baseline, lm, base);
        label(scene, &format!("{:.1}", band.upper), lm + 105.0, baseline, lm, base);
    }
}

fn label(scene: &mut Scene, text: &str, x: f64, y: f64, max_width: f64, target: Target) {
    scene.text(text, x, y, max_width, theme::font_label(), theme::AXIS, target);
}

fn value(scene: &mut Scene, text: String, x: f64, y: f64, target: Target) {
    scene.text(text, x, y, VALUE_WIDTH, theme::font_readout(), theme::AXIS, target);
}

/// One `[tjd] [sogs-date] [abs-time]` triple in the first (`slot == 0`) or second column.
#[allow(clippy::too_many_arguments)]
fn time_row(
    scene: &mut Scene,
    lm: f64,
    y: f64,
    slot: usize,
    tjd: String,
    sogs: &str,
    millis: i64,
    target: Target,
) {
    let pick = |(a, b): (f64, f64)| if slot == 0 { a } else { b };
    value(scene, tjd, lm + pick(TJD_X), y, target);
    value(scene, sogs.to_string(), lm + pick(SOGS_X), y, target);
    value(scene, millis.to_string(), lm + pick(ABS_X), y, target);
}

fn entry_row(scene: &mut Scene, lm: f64, y: f64, slot: usize, entry: &TimeIndexEntry, target: Target) {
    let tjd = format!("{}", entry.day_count);
    time_row(scene, lm, y, slot, tjd, &entry.short_label, entry.absolute_millis, target);
}

fn transition_row(scene: &mut Scene, lm: f64, slot: usize, transition: &Transition, target: Target) {
    let tjd = format!("{:.1}", transition.day_count);
    time_row(
        scene,
        lm,
        TRANSITION_ROW_Y,
        slot,
        tjd,
        &transition.short_label,
        transition.absolute_millis,
        target,
    );
}

/// Draw the readout rows onto the color bar's overlay. The caller clears it.
pub fn draw_readouts(scene: &mut Scene, target: TargetId, layout: &Layout, readout: &Readout) {
    let overlay = target.overlay();
    let lm = layout.left_margin;

    if let Some((start, end)) = &readout.selected {
        entry_row(scene, lm, SELECTED_ROW_Y, 0, start, overlay);
        entry_row(scene, lm, SELECTED_ROW_Y, 1, end, overlay);
    }

    if let Some(entry) = &readout.cursor {
        entry_row(scene, lm, CURSOR_ROW_Y, 0, entry, overlay);
    }

    if let Some((active, next)) = &readout.transition {
        transition_row(scene, lm, 0, active, overlay);
        transition_row(scene, lm, 1, next, overlay);
    }

    if readout.constraint.is_some() {
        value(scene, readout.priority_text(), lm + PRIORITY_X, PRIORITY_ROW_Y, overlay);
    }
}

/// Draw only the start or end of the selected range while a drag is underway.
pub fn draw_drag_endpoint(
    scene: &mut Scene,
    target: TargetId,
    layout: &Layout,
    entry: &TimeIndexEntry,
    is_end: bool,
) {
    entry_row(
        scene,
        layout.left_margin,
        SELECTED_ROW_Y,
        usize::from(is_end),
        entry,
        target.overlay(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::{LayerKind, Primitive};

    fn texts(scene: &Scene, target: Target) -> Vec<String> {
        scene
            .primitives(target)
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn color_bar() -> (Scene, TargetId, Layout) {
        let layout = Layout::default();
        let mut scene = Scene::new(layout.canvas_width);
        let id = scene.register("Color Bar", LayerKind::ColorBar, layout.color_bar_height);
        (scene, id, layout)
    }

    #[test]
    fn legend_lists_every_band() {
        let (mut scene, id, layout) = color_bar();
        draw_color_bar_labels(&mut scene, id, &layout);

        let texts = texts(&scene, id.base());
        for label in ["Legend &", "Time Display", "Priority 1", "Priority 6", "[abs-time]:"] {
            assert!(texts.iter().any(|t| t == label), "missing {}", label);
        }
        let swatches = scene
            .primitives(id.base())
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { .. }))
            .count();
        assert_eq!(swatches, 6);
        assert!(scene.primitives(id.overlay()).is_empty());
    }

    #[test]
    fn readouts_go_to_overlay() {
        let (mut scene, id, layout) = color_bar();
        let entry = TimeIndexEntry::new(12950.5, "2014.293:00:00:00", 1118829600000);
        let readout = Readout {
            selected: Some((entry.clone(), entry.clone())),
            cursor: Some(entry.clone()),
            cursor_day: 12950.7,
            constraint: Some("Constraint 2".into()),
            transition: Some((
                Transition {
                    day_count: 12950.5,
                    short_label: entry.short_label.clone(),
                    absolute_millis: entry.absolute_millis,
                    value: 0.35,
                },
                Transition {
                    day_count: 13266.5,
                    short_label: "2015.244:00:00:00".into(),
                    absolute_millis: 1146182400000,
                    value: 0.35,
                },
            )),
            priority: ActiveValue::Value(0.35),
        };

        draw_readouts(&mut scene, id, &layout, &readout);
        let texts = texts(&scene, id.overlay());
        assert_eq!(texts.len(), 6 + 3 + 6 + 1);
        assert!(texts.iter().any(|t| t.starts_with("2015.244")));
        assert!(texts.contains(&"0.35 (Priority 3)".to_string()));
        assert!(scene.primitives(id.base()).is_empty());
    }

    #[test]
    fn priority_text_handles_neutral_and_missing_values() {
        let mut readout = Readout::new(12950.0);
        assert_eq!(readout.priority_text(), "no data");
        readout.priority = ActiveValue::Value(0.0);
        assert_eq!(readout.priority_text(), "0");
        readout.constraint = Some("Constraint 1".into());
        assert!(readout.summary().ends_with("Constraint 1: 0"));
    }

    #[test]
    fn priority_text_keeps_full_precision() {
        let mut readout = Readout::new(12916.0);
        readout.priority = ActiveValue::Value(0.10286);
        assert_eq!(readout.priority_text(), "0.10286 (Priority 5)");
        readout.priority = ActiveValue::Value(0.70905);
        assert_eq!(readout.priority_text(), "0.70905 (Priority 1)");
        readout.priority = ActiveValue::Value(0.1);
        assert_eq!(readout.priority_text(), "0.1 (Priority 6)");
    }
}
