use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::model::{Dataset, ViewRange};
use crate::ui::controller::{InteractionController, InteractionState};
use crate::ui::legend::Readout;
use crate::ui::surface::{LayerKind, Plane, Primitive, Scene, TargetId};
use crate::ui::theme;

/// Hover position remembered between frames so the cursor overlay is only
/// redrawn when the pointer actually moves.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    last_hover: Option<(TargetId, f32)>,
}

/// What happened in the layer stack this frame.
#[derive(Debug, Clone, Default)]
pub struct CanvasInteraction {
    pub range_changed: Option<ViewRange>,
    pub readout: Option<Readout>,
    pub left: bool,
}

/// Paint every layer scaled to the available width and feed pointer events
/// back into the controller.
pub fn show_layer_stack(
    scene: &mut Scene,
    controller: &mut InteractionController,
    dataset: &Dataset,
    state: &mut CanvasState,
    ui: &mut Ui,
) -> CanvasInteraction {
    let mut interaction = CanvasInteraction::default();
    let available = ui.available_width();
    let scale = (available / scene.width() as f32).max(0.25);

    let mut rects: Vec<(TargetId, egui::Response)> = Vec::new();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = theme::LAYER_GAP;
            for (id, layer) in scene.layers() {
                let size = Vec2::new(available, layer.height as f32 * scale);
                let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
                painter.rect_filled(response.rect, 0.0, theme::BG_CANVAS);

                for plane in [Plane::Base, Plane::Overlay] {
                    for primitive in layer.primitives(plane) {
                        paint(&painter, response.rect, scale, primitive);
                    }
                }
                rects.push((id, response));
            }
        });

    let to_logical = |rect: Rect, pos: Pos2| ((pos.x - rect.min.x) / scale) as f64;
    let (pressed, released, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });

    let mut touched = false;
    let global = rects
        .iter()
        .find(|(id, _)| scene.layer(*id).kind == LayerKind::GlobalTimeline);
    if let (Some((_, response)), Some(pos)) = (global, latest) {
        let x = to_logical(response.rect, pos);
        if pressed && response.hovered() {
            controller.pointer_down(scene, dataset, x);
            touched = true;
        } else if released && controller.state() == InteractionState::Dragging {
            interaction.range_changed = controller.pointer_up(scene, dataset, x);
            touched = true;
        }
    }

    let hovered = rects
        .iter()
        .filter(|(id, _)| scene.layer(*id).kind.shows_cursor())
        .find_map(|(id, response)| {
            let pos = response.hover_pos()?;
            Some((*id, response.rect, pos))
        });

    match hovered {
        Some((id, rect, pos)) => {
            if state.last_hover != Some((id, pos.x)) {
                state.last_hover = Some((id, pos.x));
                interaction.readout = controller.pointer_move(scene, dataset, id, to_logical(rect, pos));
                touched = true;
            }
        }
        None => {
            if state.last_hover.take().is_some() {
                controller.pointer_leave(scene);
                interaction.left = true;
                touched = true;
            }
        }
    }

    // Scene edits made after painting show up on the next frame.
    if touched {
        ui.ctx().request_repaint();
    }
    interaction
}

fn paint(painter: &egui::Painter, rect: Rect, scale: f32, primitive: &Primitive) {
    let at = |p: Pos2| rect.min + p.to_vec2() * scale;
    match primitive {
        Primitive::Line { from, to, color } => {
            painter.line_segment([at(*from), at(*to)], Stroke::new(1.0, *color));
        }
        Primitive::Rect { rect: r, color } => {
            painter.rect_filled(Rect::from_min_max(at(r.min), at(r.max)), 0.0, *color);
        }
        Primitive::Text {
            pos,
            text,
            max_width,
            font,
            color,
        } => {
            let font = FontId::new(font.size * scale, font.family.clone());
            let galley = painter.layout_no_wrap(text.clone(), font, *color);
            let anchor = at(*pos);
            // Primitive positions are baselines; galleys are placed by their top.
            let top_left = Pos2::new(anchor.x, anchor.y - galley.size().y * 0.8);
            let clip = Rect::from_min_max(
                Pos2::new(anchor.x, rect.min.y),
                Pos2::new(anchor.x + max_width * scale, rect.max.y),
            )
            .intersect(rect);
            painter
                .with_clip_rect(clip)
                .galley(top_left, galley, Color32::TRANSPARENT);
        }
    }
}
