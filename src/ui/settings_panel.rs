// src/ui/settings_panel.rs

use crate::resources::{MAX_ITERATIONS_PER_SECOND, MIN_ITERATIONS_PER_SECOND, TimeMode};
use crate::sandbox::Simulation;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

pub struct SettingsPanelPlugin;

impl Plugin for SettingsPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            settings_panel_egui_system.run_if(resource_exists::<Simulation>),
        );
    }
}

/// Edits a copy of the settings and writes it back only when it changed.
/// The slider range keeps the rate inside the validated bounds.
fn settings_panel_egui_system(mut contexts: EguiContexts, mut simulation: ResMut<Simulation>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let mut settings = simulation.settings;
    egui::Window::new("Settings")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .resizable(false)
        .default_open(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Time mode");
                ui.radio_value(&mut settings.time_mode, TimeMode::Realtime, "Realtime");
                ui.radio_value(&mut settings.time_mode, TimeMode::Constant, "Constant");
            });
            ui.add_enabled(
                settings.time_mode == TimeMode::Constant,
                egui::Slider::new(
                    &mut settings.iterations_per_second,
                    MIN_ITERATIONS_PER_SECOND..=MAX_ITERATIONS_PER_SECOND,
                )
                .text("Iterations / s"),
            );
            ui.checkbox(&mut settings.calculate_angles, "Calculate angles");
        });

    if settings != simulation.settings {
        info!("Settings changed to {:?}", settings);
        simulation.settings = settings;
    }
}
