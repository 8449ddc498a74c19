// src/ui/hud.rs

use crate::resources::TimeMode;
use crate::sandbox::Simulation;
use crate::simulation::SimulationStats;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        // One system draws every HUD element.
        app.add_systems(EguiPrimaryContextPass, hud_egui_system);
    }
}

/// Counts, camera and timing in the top-left corner.
fn hud_egui_system(
    mut contexts: EguiContexts,
    // Absent before startup succeeds and after teardown.
    simulation: Option<Res<Simulation>>,
    stats: Res<SimulationStats>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // --- 1. Center "SIMULATION STOPPED" text ---
    // Only drawn once there is no simulation to report on.
    let Some(simulation) = simulation else {
        egui::Area::new(egui::Id::new("hud_stopped_text"))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, -100.0)) // Slightly above center
            .show(ctx, |ui| {
                // Large, bold, semi-transparent so the empty scene stays visible.
                let text = egui::RichText::new("SIMULATION STOPPED")
                    .font(egui::FontId::proportional(48.0))
                    .color(egui::Color32::from_white_alpha(180))
                    .strong();
                ui.label(text);
            });
        return;
    };

    // Smoothed FPS from FrameTimeDiagnosticsPlugin; empty for the first few frames.
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());

    // --- 2. Top-Left Info Panel (counts, camera, timing) ---
    egui::Area::new(egui::Id::new("hud_info_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .show(ctx, |ui| {
            // Semitransparent frame for readability over the scene.
            let frame = egui::Frame::popup(ui.style()).fill(egui::Color32::from_black_alpha(128));
            frame.show(ui, |ui| {
                ui.set_width(200.0); // Fixed width so the panel doesn't jitter

                ui.label(
                    egui::RichText::new("Molecule Sandbox").font(egui::FontId::proportional(16.0)),
                );
                ui.separator();

                ui.label(format!("Atoms: {}", simulation.atoms().len()));
                ui.label(format!("Bonds: {}", simulation.bonds().len()));
                ui.label(format!("Angles: {}", simulation.angles().len()));
                // Running totals from bond maintenance since startup.
                ui.label(format!(
                    "Formed / broken: {} / {}",
                    stats.bonds_formed, stats.bonds_broken
                ));

                ui.separator();

                // Camera and clock state.
                let world = simulation.world();
                ui.label(format!(
                    "Zoom: {:.2} (target {:.2})",
                    world.zoom, world.target_zoom
                ));
                let mode = match simulation.settings.time_mode {
                    TimeMode::Realtime => "realtime",
                    TimeMode::Constant => "constant",
                };
                ui.label(format!("Time: {mode}, dt {:.4} s", stats.last_delta));
                ui.label(format!("Ticks: {}", simulation.ticks()));
                match fps {
                    Some(fps) => ui.label(format!("FPS: {fps:.0}")),
                    None => ui.label("FPS: -"),
                };
            });
        });
}
