use crate::model::time_index::snap_to_grid;

/// Fixed canvas geometry shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Logical width of every layer, margin included.
    pub canvas_width: f64,
    /// Width of the label column left of the plot.
    pub left_margin: f64,
    pub timeline_height: f64,
    pub constraint_height: f64,
    pub color_bar_height: f64,
    /// Weeks between labelled ticks on the unzoomed axis.
    pub major_tick_period: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            canvas_width: 1500.0,
            left_margin: 80.0,
            timeline_height: 18.0,
            constraint_height: 18.0,
            color_bar_height: 60.0,
            major_tick_period: 7,
        }
    }
}

impl Layout {
    /// Width of the plot area right of the margin.
    pub fn plot_width(&self) -> f64 {
        self.canvas_width - self.left_margin
    }

    /// Clamp a pointer position to the plot's pixel bounds.
    pub fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(self.left_margin, self.canvas_width)
    }
}

/// A `[start, end]` window of day counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRange {
    pub start: f64,
    pub end: f64,
}

impl ViewRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn days(&self) -> f64 {
        self.end - self.start
    }

    /// Snap both ends to the grid, order them, keep them inside `bounds`,
    /// and widen a zero-length selection to one day.
    pub fn snapped_within(a: f64, b: f64, bounds: ViewRange) -> Self {
        let lo = snap_to_grid(a.min(b)).clamp(bounds.start, bounds.end);
        let hi = snap_to_grid(a.max(b)).clamp(bounds.start, bounds.end);

        if hi > lo {
            Self::new(lo, hi)
        } else if lo + 1.0 <= bounds.end {
            Self::new(lo, lo + 1.0)
        } else {
            Self::new((hi - 1.0).max(bounds.start), hi)
        }
    }
}

/// Linear mapping between plot pixels and day counts for one range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub left_margin: f64,
    pub plot_width: f64,
    pub range: ViewRange,
}

impl AxisScale {
    pub fn new(layout: &Layout, range: ViewRange) -> Self {
        Self {
            left_margin: layout.left_margin,
            plot_width: layout.plot_width(),
            range,
        }
    }

    pub fn pixels_per_day(&self) -> f64 {
        self.plot_width / self.range.days()
    }

    pub fn pixel_to_day(&self, x: f64) -> f64 {
        (x - self.left_margin) * (self.range.days() / self.plot_width) + self.range.start
    }

    pub fn day_to_pixel(&self, day_count: f64) -> f64 {
        (day_count - self.range.start) * (self.plot_width / self.range.days()) + self.left_margin
    }
}

/// A finished drag gesture, in clamped pixels on the unzoomed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSpan {
    pub start_x: f64,
    pub end_x: f64,
}

/// At most one in-progress drag plus the history of completed ones.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    in_progress: Option<f64>,
    history: Vec<DragSpan>,
}

impl DragState {
    pub fn begin(&mut self, start_x: f64) {
        if let Some(previous) = self.in_progress.replace(start_x) {
            log::debug!("Drag restarted at {} (previous start {} dropped)", start_x, previous);
        }
    }

    /// Finish the in-progress drag. Returns `None` when no drag was started.
    pub fn finish(&mut self, end_x: f64) -> Option<DragSpan> {
        let start_x = self.in_progress.take()?;
        let span = DragSpan { start_x, end_x };
        self.history.push(span);
        Some(span)
    }

    /// Record a span that did not go through `begin` (the unzoom shortcut).
    pub fn record(&mut self, span: DragSpan) {
        self.in_progress = None;
        self.history.push(span);
    }

    /// Abandon an in-progress drag. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.in_progress.take().is_some()
    }

    pub fn in_progress(&self) -> Option<f64> {
        self.in_progress
    }

    pub fn latest(&self) -> Option<&DragSpan> {
        self.history.last()
    }

    pub fn history(&self) -> &[DragSpan] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const GLOBAL: ViewRange = ViewRange {
        start: 12879.5,
        end: 13266.5,
    };

    #[test]
    fn pixel_time_round_trip_for_global_and_zoomed_ranges() {
        let layout = Layout::default();
        for range in [GLOBAL, ViewRange::new(12900.5, 13000.5), ViewRange::new(12950.5, 12951.5)] {
            let scale = AxisScale::new(&layout, range);
            let mut day = range.start;
            while day <= range.end {
                let back = scale.pixel_to_day(scale.day_to_pixel(day));
                assert_abs_diff_eq!(back, day, epsilon = 1e-9);
                day += 1.0;
            }
        }
    }

    #[test]
    fn plot_edges_map_to_range_ends() {
        let layout = Layout::default();
        let scale = AxisScale::new(&layout, GLOBAL);
        assert_abs_diff_eq!(scale.pixel_to_day(80.0), 12879.5);
        assert_abs_diff_eq!(scale.pixel_to_day(1500.0), 13266.5, epsilon = 1e-9);
        assert_abs_diff_eq!(scale.pixels_per_day(), 1420.0 / 387.0);
    }

    #[test]
    fn clamps_pointer_to_plot() {
        let layout = Layout::default();
        assert_eq!(layout.clamp_x(12.0), 80.0);
        assert_eq!(layout.clamp_x(1800.0), 1500.0);
        assert_eq!(layout.clamp_x(400.0), 400.0);
    }

    #[test]
    fn snapped_range_is_ordered_and_bounded() {
        let r = ViewRange::snapped_within(13000.2, 12900.7, GLOBAL);
        assert_eq!(r, ViewRange::new(12900.5, 13000.5));

        let full = ViewRange::snapped_within(12879.5, 13266.5, GLOBAL);
        assert_eq!(full, GLOBAL);
    }

    #[test]
    fn zero_length_selection_widens_to_one_day() {
        assert_eq!(
            ViewRange::snapped_within(12950.1, 12950.9, GLOBAL),
            ViewRange::new(12950.5, 12951.5)
        );
        assert_eq!(
            ViewRange::snapped_within(13266.5, 13266.5, GLOBAL),
            ViewRange::new(13265.5, 13266.5)
        );
    }

    #[test]
    fn drag_state_tracks_one_pending_start() {
        let mut drag = DragState::default();
        assert!(drag.finish(200.0).is_none());

        drag.begin(100.0);
        drag.begin(120.0);
        let span = drag.finish(300.0).unwrap();
        assert_eq!(span, DragSpan { start_x: 120.0, end_x: 300.0 });
        assert_eq!(drag.history().len(), 1);

        drag.begin(50.0);
        assert!(drag.cancel());
        assert!(!drag.cancel());
        assert_eq!(drag.latest(), Some(&span));
    }
}
