//! Named drawing layers with bottom-left-origin primitives.
//!
//! Every layer owns two planes: a *base* plane for content that only changes
//! when the view range changes (axes, constraint bars, legend) and an
//! *overlay* plane for content redrawn on every pointer event (cursor bar,
//! drag highlight, readouts). Drawing calls append to a plane's display list;
//! the host paints the lists each frame.

use egui::{Color32, FontId, Pos2, Rect};

use crate::model::SeriesId;

/// Opaque handle to a registered layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    Base,
    Overlay,
}

/// A drawable surface: one plane of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub id: TargetId,
    pub plane: Plane,
}

impl TargetId {
    pub fn base(self) -> Target {
        Target {
            id: self,
            plane: Plane::Base,
        }
    }

    pub fn overlay(self) -> Target {
        Target {
            id: self,
            plane: Plane::Overlay,
        }
    }
}

/// What a layer shows; constraint layers carry the series they plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    ColorBar,
    GlobalTimeline,
    TopTimeline,
    Constraint(SeriesId),
    BottomTimeline,
}

impl LayerKind {
    /// Layers plotted against the zoomed range, which carry the cursor bar.
    pub fn shows_cursor(self) -> bool {
        matches!(
            self,
            LayerKind::TopTimeline | LayerKind::Constraint(_) | LayerKind::BottomTimeline
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A stored drawing command in top-left layer pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
    },
    Rect {
        rect: Rect,
        color: Color32,
    },
    Text {
        /// Left end of the text baseline.
        pos: Pos2,
        text: String,
        max_width: f32,
        font: FontId,
        color: Color32,
    },
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub height: f64,
    base: Vec<Primitive>,
    overlay: Vec<Primitive>,
    base_revision: u64,
    overlay_revision: u64,
}

impl Layer {
    pub fn primitives(&self, plane: Plane) -> &[Primitive] {
        match plane {
            Plane::Base => &self.base,
            Plane::Overlay => &self.overlay,
        }
    }

    /// Number of times the plane has been cleared.
    pub fn revision(&self, plane: Plane) -> u64 {
        match plane {
            Plane::Base => self.base_revision,
            Plane::Overlay => self.overlay_revision,
        }
    }
}

/// Registry of every layer in the viewer, in display order.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            layers: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Register a layer (with its paired overlay) below the existing ones.
    pub fn register(&mut self, name: impl Into<String>, kind: LayerKind, height: f64) -> TargetId {
        self.layers.push(Layer {
            name: name.into(),
            kind,
            height,
            base: Vec::new(),
            overlay: Vec::new(),
            base_revision: 0,
            overlay_revision: 0,
        });
        TargetId(self.layers.len() - 1)
    }

    pub fn layer(&self, id: TargetId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn layers(&self) -> impl Iterator<Item = (TargetId, &Layer)> {
        self.layers.iter().enumerate().map(|(i, l)| (TargetId(i), l))
    }

    pub fn find(&self, kind: LayerKind) -> Option<TargetId> {
        self.layers().find(|(_, l)| l.kind == kind).map(|(id, _)| id)
    }

    pub fn cursor_layers(&self) -> Vec<TargetId> {
        self.layers()
            .filter(|(_, l)| l.kind.shows_cursor())
            .map(|(id, _)| id)
            .collect()
    }

    /// Constraint layers and the series each one plots.
    pub fn constraint_layers(&self) -> Vec<(TargetId, SeriesId)> {
        self.layers()
            .filter_map(|(id, l)| match l.kind {
                LayerKind::Constraint(series) => Some((id, series)),
                _ => None,
            })
            .collect()
    }

    pub fn primitives(&self, target: Target) -> &[Primitive] {
        self.layer(target.id).primitives(target.plane)
    }

    fn plane_mut(&mut self, target: Target) -> &mut Vec<Primitive> {
        let layer = &mut self.layers[target.id.0];
        match target.plane {
            Plane::Base => &mut layer.base,
            Plane::Overlay => &mut layer.overlay,
        }
    }

    fn flip(&self, target: Target, y: f64) -> f32 {
        (self.layer(target.id).height - y) as f32
    }

    pub fn clear(&mut self, target: Target) {
        let layer = &mut self.layers[target.id.0];
        match target.plane {
            Plane::Base => {
                layer.base.clear();
                layer.base_revision += 1;
            }
            Plane::Overlay => {
                layer.overlay.clear();
                layer.overlay_revision += 1;
            }
        }
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color32, target: Target) {
        let from = Pos2::new(x1 as f32, self.flip(target, y1));
        let to = Pos2::new(x2 as f32, self.flip(target, y2));
        self.plane_mut(target).push(Primitive::Line { from, to, color });
    }

    /// Fill a rectangle whose top edge sits `y` above the bottom of the layer.
    pub fn filled_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color32,
        target: Target,
    ) {
        let top = self.flip(target, y);
        let rect = Rect::from_two_pos(
            Pos2::new(x as f32, top),
            Pos2::new((x + width) as f32, top + height as f32),
        );
        self.plane_mut(target).push(Primitive::Rect { rect, color });
    }

    /// A tick hanging down (vertical) or left (horizontal) from `(x, y)`.
    pub fn tick(
        &mut self,
        x: f64,
        y: f64,
        length: f64,
        color: Color32,
        target: Target,
        orientation: Orientation,
    ) {
        match orientation {
            Orientation::Vertical => self.line(x, y, x, y - length, color, target),
            Orientation::Horizontal => self.line(x, y, x - length, y, color, target),
        }
    }

    /// Horizontal line from `x` to the right edge.
    pub fn h_line(&mut self, x: f64, y: f64, color: Color32, target: Target) {
        let width = self.width;
        self.line(x, y, width, y, color, target);
    }

    /// Vertical line from `y` to the top edge.
    pub fn v_line(&mut self, x: f64, y: f64, color: Color32, target: Target) {
        let height = self.layer(target.id).height;
        self.line(x, y, x, height, color, target);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        max_width: f64,
        font: FontId,
        color: Color32,
        target: Target,
    ) {
        let pos = Pos2::new(x as f32, self.flip(target, y));
        self.plane_mut(target).push(Primitive::Text {
            pos,
            text: text.into(),
            max_width: max_width as f32,
            font,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (Scene, TargetId, TargetId) {
        let mut scene = Scene::new(1500.0);
        let a = scene.register("Top Timeline", LayerKind::TopTimeline, 18.0);
        let b = scene.register("Constraint 1", LayerKind::Constraint(SeriesId(0)), 18.0);
        (scene, a, b)
    }

    #[test]
    fn vertical_axis_is_flipped() {
        let (mut scene, a, _) = scene();
        scene.line(10.0, 0.0, 10.0, 18.0, Color32::BLACK, a.base());
        assert_eq!(
            scene.primitives(a.base())[0],
            Primitive::Line {
                from: Pos2::new(10.0, 18.0),
                to: Pos2::new(10.0, 0.0),
                color: Color32::BLACK,
            }
        );
    }

    #[test]
    fn rect_top_edge_is_measured_from_bottom() {
        let (mut scene, a, _) = scene();
        scene.filled_rect(100.0, 18.0, 2.0, 18.0, Color32::RED, a.overlay());
        match &scene.primitives(a.overlay())[0] {
            Primitive::Rect { rect, .. } => {
                assert_eq!(rect.min, Pos2::new(100.0, 0.0));
                assert_eq!(rect.max, Pos2::new(102.0, 18.0));
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn targets_are_independent() {
        let (mut scene, a, b) = scene();
        scene.h_line(80.0, 18.0, Color32::BLACK, a.base());
        scene.tick(90.0, 18.0, 6.0, Color32::BLACK, b.base(), Orientation::Vertical);
        scene.text("x", 0.0, 0.0, 80.0, FontId::default(), Color32::BLACK, b.overlay());

        scene.clear(b.base());
        assert_eq!(scene.primitives(a.base()).len(), 1);
        assert!(scene.primitives(b.base()).is_empty());
        assert_eq!(scene.primitives(b.overlay()).len(), 1);
        assert_eq!(scene.layer(b).revision(Plane::Base), 1);
        assert_eq!(scene.layer(b).revision(Plane::Overlay), 0);
    }

    #[test]
    fn horizontal_tick_points_left() {
        let (mut scene, a, _) = scene();
        scene.tick(50.0, 9.0, 5.0, Color32::BLACK, a.base(), Orientation::Horizontal);
        assert_eq!(
            scene.primitives(a.base())[0],
            Primitive::Line {
                from: Pos2::new(50.0, 9.0),
                to: Pos2::new(45.0, 9.0),
                color: Color32::BLACK,
            }
        );
    }

    #[test]
    fn finds_layers_by_kind() {
        let (scene, a, b) = scene();
        assert_eq!(scene.find(LayerKind::TopTimeline), Some(a));
        assert_eq!(scene.find(LayerKind::ColorBar), None);
        assert_eq!(scene.constraint_layers(), vec![(b, SeriesId(0))]);
    }
}
