//! Scene drawing against an abstract 2D surface.
//!
//! The simulation only knows about [`Surface`]; the Bevy host supplies an
//! egui-backed implementation in `visualization`.

use crate::angles::AtomsAngle;
use crate::components::Atom;
use crate::resources::World;
use crate::sandbox::Simulation;
use crate::vector::Vector2;
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Gap between an atom's drawn edge and the angle arc around it.
const ARC_MARGIN: f32 = 5.0;
const ARC_WIDTH: f32 = 2.0;
const ANGLE_LABEL_OFFSET: f32 = 20.0;
const ANGLE_LABEL_SIZE: f32 = 12.0;
const ANCHOR_OUTLINE_WIDTH: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub width: f32,
    pub color: Color,
}

/// Immediate-mode drawing target in surface pixels, origin top-left, y down.
pub trait Surface {
    fn size(&self) -> Vector2;
    fn clear(&mut self);
    fn circle(&mut self, center: Vector2, radius: f32, fill: Color, outline: Option<Outline>);
    fn line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color);
    /// Arc from `start` sweeping to `end`, both in radians measured from +x.
    fn arc(&mut self, center: Vector2, radius: f32, start: f32, end: f32, width: f32, color: Color);
    fn text(&mut self, position: Vector2, text: &str, size: f32, color: Color);
}

/// Draws one frame: angle arcs, then bonds, then atoms on top.
pub fn draw_scene(sim: &Simulation, surface: &mut impl Surface) {
    let world = sim.world();
    let zoom = world.zoom;
    surface.clear();

    if sim.settings.calculate_angles {
        for angle in sim.angles() {
            draw_angle(sim, angle, surface);
        }
    }

    for bond in sim.bonds() {
        let (Some(a), Some(b)) = (sim.atom(&bond.atom1), sim.atom(&bond.atom2)) else {
            continue;
        };
        surface.line(
            world.world_to_screen(a.pos),
            world.world_to_screen(b.pos),
            bond.kind.line_width() * zoom,
            bond.kind.color(),
        );
    }

    let anchor = sim.interaction().last_clicked_item_id.as_ref();
    for atom in sim.atoms() {
        draw_atom(atom, anchor == Some(&atom.id), world, surface);
    }
}

fn draw_atom(atom: &Atom, highlighted: bool, world: &World, surface: &mut impl Surface) {
    let zoom = world.zoom;
    let center = world.world_to_screen(atom.pos);
    let radius = atom.animated_size() * zoom;
    let outline = highlighted.then_some(Outline {
        width: ANCHOR_OUTLINE_WIDTH * zoom,
        color: Color::WHITE,
    });
    surface.circle(center, radius, atom.fill_color(), outline);

    let style = atom.style();
    if let Some(symbol) = &atom.properties.symbol {
        surface.text(center, symbol, style.symbol_font_size * zoom, Color::WHITE);
    }
    if let Some(number) = atom.properties.atomic_number {
        let corner = center - Vector2::splat(radius * 0.55);
        surface.text(
            corner,
            &number.to_string(),
            style.atomic_number_size * zoom,
            Color::WHITE,
        );
    }
}

fn draw_angle(sim: &Simulation, angle: &AtomsAngle, surface: &mut impl Surface) {
    let (Some(a1), Some(vertex), Some(a3)) = (
        sim.atom(&angle.atom1),
        sim.atom(&angle.atom2),
        sim.atom(&angle.atom3),
    ) else {
        return;
    };
    let world = sim.world();
    let zoom = world.zoom;
    let center = world.world_to_screen(vertex.pos);
    let radius = (vertex.animated_size() + ARC_MARGIN) * zoom;
    let (start, end) = smaller_arc(a1.pos - vertex.pos, a3.pos - vertex.pos);
    let color = Color::hsl((angle.angle * 2.0).rem_euclid(360.0), 0.5, 0.5);
    surface.arc(center, radius, start, end, ARC_WIDTH * zoom, color);

    let middle = (start + end) / 2.0;
    let label = center + Vector2::from_angle(middle) * (radius + ANGLE_LABEL_OFFSET * zoom);
    surface.text(
        label,
        &format!("{:.0}°", angle.angle),
        ANGLE_LABEL_SIZE,
        Color::WHITE,
    );
}

/// Start and end (start <= end) of the shorter arc between two rays.
pub fn smaller_arc(ray1: Vector2, ray3: Vector2) -> (f32, f32) {
    let start = ray1.y.atan2(ray1.x);
    let sweep = (ray3.y.atan2(ray3.x) - start).rem_euclid(TAU);
    if sweep > PI {
        (start + sweep - TAU, start)
    } else {
        (start, start + sweep)
    }
}
