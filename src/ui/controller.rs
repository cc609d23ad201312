use crate::model::time_index::snap_to_grid;
use crate::model::view::DragSpan;
use crate::model::{AxisScale, Dataset, DragState, Layout, SeriesId, TimeIndexEntry, TransitionTable, ViewRange};
use crate::ui::legend::{self, Readout};
use crate::ui::surface::{LayerKind, Scene, TargetId};
use crate::ui::theme;
use crate::ui::timeline::{redraw_after_range_change, MARGIN_LABEL_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging,
}

/// Owns the view range and drag state and turns pointer/key events into
/// scene updates. Pixel arguments are logical canvas x coordinates.
#[derive(Debug, Clone)]
pub struct InteractionController {
    layout: Layout,
    global: ViewRange,
    range: ViewRange,
    drag: DragState,
    inspected: Option<(SeriesId, TransitionTable)>,
}

impl InteractionController {
    pub fn new(layout: Layout, dataset: &Dataset) -> Self {
        let global = dataset.global_range();
        Self {
            layout,
            global,
            range: global,
            drag: DragState::default(),
            inspected: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        if self.drag.in_progress().is_some() {
            InteractionState::Dragging
        } else {
            InteractionState::Idle
        }
    }

    pub fn view_range(&self) -> ViewRange {
        self.range
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn drag_history(&self) -> &[DragSpan] {
        self.drag.history()
    }

    /// Name of the constraint whose transitions feed the readouts.
    pub fn inspected(&self) -> Option<&str> {
        self.inspected.as_ref().map(|(_, table)| table.name.as_str())
    }

    fn global_scale(&self) -> AxisScale {
        AxisScale::new(&self.layout, self.global)
    }

    fn view_scale(&self) -> AxisScale {
        AxisScale::new(&self.layout, self.range)
    }

    /// Start a drag on the unzoomed axis.
    pub fn pointer_down(&mut self, scene: &mut Scene, dataset: &Dataset, x: f64) {
        let x = self.layout.clamp_x(x);
        self.drag.begin(x);

        let day = snap_to_grid(self.global_scale().pixel_to_day(x)).clamp(self.global.start, self.global.end);
        log::debug!("Drag started at x={:.1} (tjd {})", x, day);

        if let Some(axis) = scene.find(LayerKind::GlobalTimeline) {
            scene.clear(axis.overlay());
            self.draw_drag_marker(scene, axis, x);
        }
        if let Some(color_bar) = scene.find(LayerKind::ColorBar) {
            scene.clear(color_bar.overlay());
            if let Some(entry) = lookup(dataset, day) {
                legend::draw_drag_endpoint(scene, color_bar, &self.layout, entry, false);
            }
        }
    }

    /// Finish a drag and zoom to the selected span. Returns the new range, or
    /// `None` when no drag was in progress.
    pub fn pointer_up(&mut self, scene: &mut Scene, dataset: &Dataset, x: f64) -> Option<ViewRange> {
        let x = self.layout.clamp_x(x);
        let Some(span) = self.drag.finish(x) else {
            log::debug!("Ignoring pointer up at x={:.1} without a drag", x);
            return None;
        };

        if let Some(axis) = scene.find(LayerKind::GlobalTimeline) {
            self.draw_drag_marker(scene, axis, span.end_x);
            let height = self.layout.timeline_height;
            let left = span.start_x.min(span.end_x);
            let width = (span.end_x - span.start_x).abs();
            scene.filled_rect(left, height, width, height, theme::DRAG_SELECTION, axis.overlay());
        }

        let scale = self.global_scale();
        let range = ViewRange::snapped_within(
            scale.pixel_to_day(span.start_x),
            scale.pixel_to_day(span.end_x),
            self.global,
        );
        log::debug!("Drag finished: {:.1} .. {:.1}", range.start, range.end);
        Some(self.apply_range(scene, dataset, range))
    }

    /// Any key: reset to the full range, as if the whole axis had been dragged.
    pub fn key_press(&mut self, scene: &mut Scene, dataset: &Dataset) -> ViewRange {
        self.drag.record(DragSpan {
            start_x: self.layout.left_margin,
            end_x: self.layout.canvas_width,
        });
        if let Some(axis) = scene.find(LayerKind::GlobalTimeline) {
            scene.clear(axis.overlay());
        }
        log::info!("Unzoomed to {:.1} .. {:.1}", self.global.start, self.global.end);
        self.apply_range(scene, dataset, self.global)
    }

    fn apply_range(&mut self, scene: &mut Scene, dataset: &Dataset, range: ViewRange) -> ViewRange {
        self.range = range;
        redraw_after_range_change(scene, &self.layout, dataset, range);

        if let Some(color_bar) = scene.find(LayerKind::ColorBar) {
            scene.clear(color_bar.overlay());
            let mut readout = Readout::new(range.start);
            readout.selected = self.selected_entries(dataset);
            legend::draw_readouts(scene, color_bar, &self.layout, &readout);
        }
        range
    }

    fn draw_drag_marker(&self, scene: &mut Scene, axis: TargetId, x: f64) {
        let height = self.layout.timeline_height;
        scene.filled_rect(x, height, theme::DRAG_MARKER_WIDTH, height, theme::DRAG_MARKER, axis.overlay());
    }

    /// Move the cursor bar to `x` over `target` and refresh the readouts.
    /// Returns `None` when `target` is not plotted against the zoomed range.
    pub fn pointer_move(
        &mut self,
        scene: &mut Scene,
        dataset: &Dataset,
        target: TargetId,
        x: f64,
    ) -> Option<Readout> {
        let kind = scene.layer(target).kind;
        if !kind.shows_cursor() {
            return None;
        }

        let x = self.layout.clamp_x(x);
        let day = self.view_scale().pixel_to_day(x);

        if let LayerKind::Constraint(series_id) = kind {
            self.inspect(dataset, series_id);
        }

        for id in scene.cursor_layers() {
            let height = scene.layer(id).height;
            scene.clear(id.overlay());
            scene.filled_rect(x, height, theme::INDICATOR_WIDTH, height, theme::INDICATOR, id.overlay());
        }

        if let LayerKind::Constraint(_) = kind {
            let name = scene.layer(target).name.clone();
            scene.text(
                name,
                0.0,
                MARGIN_LABEL_Y,
                self.layout.left_margin,
                theme::font_label(),
                theme::ACCENT,
                target.overlay(),
            );
            scene.h_line(self.layout.left_margin, 1.0, theme::AXIS, target.overlay());
        }

        let readout = self.readout_at(dataset, day);
        if let Some(color_bar) = scene.find(LayerKind::ColorBar) {
            scene.clear(color_bar.overlay());
            legend::draw_readouts(scene, color_bar, &self.layout, &readout);
        }
        Some(readout)
    }

    /// Switch the inspected constraint, rebuilding its transition table.
    fn inspect(&mut self, dataset: &Dataset, series_id: SeriesId) {
        if matches!(&self.inspected, Some((current, _)) if *current == series_id) {
            return;
        }
        let Some(series) = dataset.series(series_id) else {
            return;
        };
        match TransitionTable::build(series, &dataset.time_index) {
            Ok(table) => self.inspected = Some((series_id, table)),
            Err(e) => {
                log::error!("Cannot inspect '{}': {}", series.name, e);
                self.inspected = None;
            }
        }
    }

    fn readout_at(&self, dataset: &Dataset, day: f64) -> Readout {
        let mut readout = Readout::new(day);
        readout.selected = self.selected_entries(dataset);
        readout.cursor = dataset.time_index.find_latest_at_or_before(day).cloned();

        if let Some((_, table)) = &self.inspected {
            readout.constraint = Some(table.name.clone());
            readout.priority = table.active_value_at(day);
            readout.transition = table
                .span_at(day)
                .map(|(active, next)| (active.clone(), next.clone()));
        }
        readout
    }

    fn selected_entries(&self, dataset: &Dataset) -> Option<(TimeIndexEntry, TimeIndexEntry)> {
        let start = lookup(dataset, self.range.start)?;
        let end = lookup(dataset, self.range.end)?;
        Some((start.clone(), end.clone()))
    }

    /// The pointer left the layer stack: remove the cursor bar.
    pub fn pointer_leave(&mut self, scene: &mut Scene) {
        for id in scene.cursor_layers() {
            scene.clear(id.overlay());
        }
    }

    /// Window resized: overlays are stale and a pending drag is abandoned.
    pub fn resize(&mut self, scene: &mut Scene) {
        if self.drag.cancel() {
            log::debug!("Drag cancelled by resize");
        }
        let ids: Vec<TargetId> = scene.layers().map(|(id, _)| id).collect();
        for id in ids {
            scene.clear(id.overlay());
        }
    }

    /// Window lost focus: abandon a pending drag and its marker.
    pub fn focus_lost(&mut self, scene: &mut Scene) {
        if self.drag.cancel() {
            log::debug!("Drag cancelled by focus loss");
            if let Some(axis) = scene.find(LayerKind::GlobalTimeline) {
                scene.clear(axis.overlay());
            }
        }
    }
}

fn lookup(dataset: &Dataset, day: f64) -> Option<&TimeIndexEntry> {
    dataset
        .time_index
        .lookup_by_day_count(day)
        .map_err(|e| log::error!("{}", e))
        .ok()
}
