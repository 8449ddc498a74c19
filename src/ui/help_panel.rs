// src/ui/help_panel.rs

use super::UiSet;
use crate::sandbox::Simulation;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

// Closed on startup; the opener button is shown instead.
#[derive(Resource, Default)]
struct HelpPanelState {
    is_open: bool,
}

pub struct HelpPanelPlugin;

impl Plugin for HelpPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HelpPanelState>()
            .add_systems(Update, toggle_help_visibility.in_set(UiSet))
            .add_systems(EguiPrimaryContextPass, help_panel_egui_system);
    }
}

/// Flips the panel on `H`, independent of the engine key bindings.
fn toggle_help_visibility(keys: Res<ButtonInput<KeyCode>>, mut help_state: ResMut<HelpPanelState>) {
    if keys.just_pressed(KeyCode::KeyH) {
        help_state.is_open = !help_state.is_open;
    }
}

fn help_panel_egui_system(
    mut contexts: EguiContexts,
    mut panel_state: ResMut<HelpPanelState>,
    simulation: Option<Res<Simulation>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // --- 1. Open: the full key reference window ---
    if panel_state.is_open {
        // Show the configured bindings; fall back to defaults once the simulation is gone.
        let keys = simulation.as_ref().map(|sim| sim.keys).unwrap_or_default();
        egui::Window::new("Help")
            .open(&mut panel_state.is_open)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
            .resizable(false)
            .show(ctx, |ui| {
                // Two columns: key on the left, what it does on the right.
                egui::Grid::new("help_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        let rows = [
                            ("h".to_string(), "Toggle this help window"),
                            (keys.spawn.to_string(), "Spawn a random atom at the cursor"),
                            (keys.delete.to_string(), "Delete the atom under the cursor"),
                            (keys.reset.to_string(), "Remove every atom"),
                            ("LMB Drag".to_string(), "Move an atom"),
                            ("Ctrl+LMB".to_string(), "Pick anchor, then toggle a bond to it"),
                            ("Scroll".to_string(), "Zoom"),
                            ("Esc".to_string(), "Stop the simulation"),
                        ];
                        for (key, action) in rows {
                            ui.label(key);
                            ui.label(action);
                            ui.end_row();
                        }
                    });

                // Bonding is automatic, so it gets a note rather than a key row.
                ui.separator();
                ui.label("Atoms closer than 400 units bond on their own.");
            });
    }
    // --- 2. Closed: a small opener button in the corner ---
    else {
        egui::Area::new(egui::Id::new("Help Opener Area"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let response = ui.button("❔ Help (H)");
                    if response.clicked() {
                        panel_state.is_open = true;
                    }
                    response.on_hover_text("Click or press 'H' to open the help panel.");
                });
            });
    }
}
