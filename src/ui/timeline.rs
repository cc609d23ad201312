use crate::model::calendar::{day_count_to_short_label, short_year};
use crate::model::priority::fill_color;
use crate::model::{AxisScale, ConstraintSeries, Dataset, Layout, ViewRange};
use crate::ui::legend;
use crate::ui::surface::{LayerKind, Orientation, Scene, TargetId};
use crate::ui::theme;

/// Baseline of the row label drawn in the left margin.
pub(crate) const MARGIN_LABEL_Y: f64 = 6.0;

/// Register every layer in display order and draw the initial content.
pub fn build_scene(layout: &Layout, dataset: &Dataset) -> Scene {
    let mut scene = Scene::new(layout.canvas_width);
    let global = dataset.global_range();

    let global_axis = scene.register("Global Timeline", LayerKind::GlobalTimeline, layout.timeline_height);
    scene.register("Top Timeline", LayerKind::TopTimeline, layout.timeline_height);
    for (id, series) in dataset.iter() {
        scene.register(series.name.clone(), LayerKind::Constraint(id), layout.constraint_height);
    }
    scene.register("Bottom Timeline", LayerKind::BottomTimeline, layout.timeline_height);
    let color_bar = scene.register("Color Bar", LayerKind::ColorBar, layout.color_bar_height);

    render_global_axis(&mut scene, global_axis, layout, global);
    legend::draw_color_bar_labels(&mut scene, color_bar, layout);
    redraw_after_range_change(&mut scene, layout, dataset, global);

    log::debug!("Built scene with {} layers", scene.layers().count());
    scene
}

/// Draw the unzoomed axis: one tick per week, a long labelled tick every
/// `major_tick_period` weeks.
pub fn render_global_axis(scene: &mut Scene, target: TargetId, layout: &Layout, global: ViewRange) {
    let base = target.base();
    let height = layout.timeline_height;
    let period = layout.major_tick_period.max(1) as usize;
    let long_tick = height - theme::TICK_LONG_INSET;

    let days = global.days();
    let weeks = (days / 7.0).ceil() as usize;
    let px_week = layout.plot_width() / days * 7.0;
    let label_width = px_week * period as f64;

    scene.text("Unzoomed", 0.0, MARGIN_LABEL_Y, layout.left_margin, theme::font_label(), theme::AXIS, base);
    scene.h_line(layout.left_margin, height, theme::AXIS, base);

    let mut last_year = None;
    for week in 0..weeks {
        let x = layout.left_margin + week as f64 * px_week;
        let day = global.start + (week * 7) as f64;
        let major = week % period == 0;

        let year = short_year(day);
        let color = year_color(last_year, year);
        last_year = Some(year);

        if major {
            scene.text(
                day_count_to_short_label(day),
                x + 1.0,
                height - long_tick,
                label_width,
                theme::font_label(),
                theme::AXIS,
                base,
            );
        }
        let length = if major { long_tick } else { theme::TICK_SHORT_GLOBAL };
        scene.tick(x, height, length, color, base, Orientation::Vertical);
    }
}

/// Draw a zoomed axis: one tick per day, medium every `major_tick_period`
/// days, long and labelled every `major_tick_period²` days.
pub fn render_local_axis(scene: &mut Scene, target: TargetId, layout: &Layout, range: ViewRange) {
    let base = target.base();
    let height = layout.timeline_height;
    let period = layout.major_tick_period.max(1) as usize;
    let long_tick = height - theme::TICK_LONG_INSET;

    let days = range.days();
    let px_day = layout.plot_width() / days;
    let label_width = px_day * 7.0 * period as f64;

    scene.text("Zoomed", 0.0, MARGIN_LABEL_Y, layout.left_margin, theme::font_label(), theme::AXIS, base);
    scene.h_line(layout.left_margin, height, theme::AXIS, base);

    let mut last_year = None;
    for i in 0..days.ceil() as usize {
        let x = layout.left_margin + i as f64 * px_day;
        let day = range.start + i as f64;

        let year = short_year(day);
        let color = year_color(last_year, year);
        last_year = Some(year);

        let length = if i % (period * period) == 0 {
            scene.text(
                day_count_to_short_label(day),
                x + 1.0,
                height - long_tick,
                label_width,
                theme::font_label(),
                theme::AXIS,
                base,
            );
            long_tick
        } else if i % period == 0 {
            theme::TICK_MEDIUM
        } else {
            theme::TICK_SHORT_LOCAL
        };
        scene.tick(x, height, length, color, base, Orientation::Vertical);
    }
}

fn year_color(last_year: Option<i32>, year: i32) -> egui::Color32 {
    match last_year {
        Some(last) if last != year => theme::YEAR_BOUNDARY,
        _ => theme::AXIS,
    }
}

/// Fill one span per change point, colored by priority band. The last span
/// runs to `global_end`; spans are clipped to the plot area.
pub fn render_constraint_bars(
    scene: &mut Scene,
    target: TargetId,
    layout: &Layout,
    series: &ConstraintSeries,
    range: ViewRange,
    global_end: f64,
) {
    let base = target.base();
    let height = layout.constraint_height;
    let scale = AxisScale::new(layout, range);

    for (start, end, value) in series.spans(global_end) {
        let x0 = scale.day_to_pixel(start).max(layout.left_margin);
        let x1 = scale.day_to_pixel(end).min(layout.canvas_width);
        if x1 <= x0 {
            continue;
        }
        scene.filled_rect(x0, height, x1 - x0, height, fill_color(value), base);
    }

    scene.text(
        series.name.clone(),
        0.0,
        MARGIN_LABEL_Y,
        layout.left_margin,
        theme::font_label(),
        theme::AXIS,
        base,
    );
}

/// Clear and re-render both zoomed axes and every constraint layer for `range`.
pub fn redraw_after_range_change(scene: &mut Scene, layout: &Layout, dataset: &Dataset, range: ViewRange) {
    for kind in [LayerKind::TopTimeline, LayerKind::BottomTimeline] {
        if let Some(id) = scene.find(kind) {
            scene.clear(id.base());
            render_local_axis(scene, id, layout, range);
        }
    }

    let global_end = dataset.global_range().end;
    for (id, series_id) in scene.constraint_layers() {
        scene.clear(id.base());
        if let Some(series) = dataset.series(series_id) {
            render_constraint_bars(scene, id, layout, series, range, global_end);
        }
    }

    log::debug!("Rendered range {:.1} .. {:.1}", range.start, range.end);
}
