use crate::render::{Outline, Surface, draw_scene};
use crate::sandbox::Simulation;
use crate::vector::Vector2;
use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use std::f32::consts::PI;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x12, 0x12, 0x18);
/// Maximum angular step when flattening arcs into polylines.
const ARC_STEP: f32 = PI / 32.0;

pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(0x12, 0x12, 0x18)))
            .add_systems(
                EguiPrimaryContextPass,
                paint_scene.run_if(resource_exists::<Simulation>),
            );
    }
}

/// [`Surface`] over an egui painter on the background layer, beneath all panels.
pub struct EguiSurface {
    painter: egui::Painter,
}

impl EguiSurface {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            painter: ctx.layer_painter(egui::LayerId::background()),
        }
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_srgba().to_u8_array();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn to_pos2(v: Vector2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

impl Surface for EguiSurface {
    fn size(&self) -> Vector2 {
        let size = self.painter.clip_rect().size();
        Vector2::new(size.x, size.y)
    }

    fn clear(&mut self) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, BACKGROUND);
    }

    fn circle(&mut self, center: Vector2, radius: f32, fill: Color, outline: Option<Outline>) {
        let stroke = outline
            .map(|o| egui::Stroke::new(o.width, to_color32(o.color)))
            .unwrap_or(egui::Stroke::NONE);
        self.painter
            .circle(to_pos2(center), radius, to_color32(fill), stroke);
    }

    fn line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color) {
        self.painter.line_segment(
            [to_pos2(from), to_pos2(to)],
            egui::Stroke::new(width, to_color32(color)),
        );
    }

    fn arc(&mut self, center: Vector2, radius: f32, start: f32, end: f32, width: f32, color: Color) {
        let steps = (((end - start).abs() / ARC_STEP).ceil() as usize).max(2);
        let points = (0..=steps)
            .map(|i| {
                let t = start + (end - start) * i as f32 / steps as f32;
                to_pos2(center + Vector2::from_angle(t) * radius)
            })
            .collect();
        self.painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(width, to_color32(color)),
        ));
    }

    fn text(&mut self, position: Vector2, text: &str, size: f32, color: Color) {
        self.painter.text(
            to_pos2(position),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size.max(1.0)),
            to_color32(color),
        );
    }
}

fn paint_scene(mut contexts: EguiContexts, simulation: Res<Simulation>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let mut surface = EguiSurface::new(ctx);
    draw_scene(&simulation, &mut surface);
}
