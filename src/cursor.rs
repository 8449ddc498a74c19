// src/cursor.rs

use crate::interaction::{CursorAffordance, InteractionSet};
use crate::sandbox::Simulation;
use bevy::prelude::*;
use bevy::window::SystemCursorIcon;
use bevy::winit::cursor::CursorIcon;
use bevy_egui::EguiContexts;

// Logical cursor state; the icon is only swapped when this changes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, States, Hash)]
enum CursorState {
    #[default]
    Default,
    Hover,
    Dragging,
}

pub struct CustomCursorPlugin;

impl Plugin for CustomCursorPlugin {
    fn build(&self, app: &mut App) {
        // Runs after input forwarding so the drag state is current for this frame.
        app.init_state::<CursorState>().add_systems(
            Update,
            (
                determine_cursor_state.run_if(resource_exists::<Simulation>),
                apply_cursor_icon.run_if(state_changed::<CursorState>),
            )
                .chain()
                .after(InteractionSet),
        );
    }
}

/// Decides what the cursor's state should be from the engine's affordance.
fn determine_cursor_state(
    simulation: Res<Simulation>,
    mut egui_contexts: EguiContexts,
    mut next_state: ResMut<NextState<CursorState>>,
) {
    let Ok(ctx) = egui_contexts.ctx_mut() else {
        return;
    };

    let interaction = simulation.interaction();
    // Priority 1: an atom is being dragged, even across egui panels.
    let new_state = if interaction.dragging_id.is_some() {
        CursorState::Dragging
    }
    // Priority 2: the pointer is over an egui element.
    else if ctx.is_pointer_over_area() {
        CursorState::Default
    }
    // Priority 3: whatever the engine reports for the scene under the pointer.
    else {
        match interaction.cursor {
            CursorAffordance::Pointer => CursorState::Hover,
            CursorAffordance::Default => CursorState::Default,
        }
    };

    // Only a real change triggers `apply_cursor_icon` via `state_changed`.
    next_state.set(new_state);
}

/// Swaps the window's cursor icon to match the current state.
fn apply_cursor_icon(
    windows: Query<Entity, With<Window>>,
    state: Res<State<CursorState>>,
    mut commands: Commands,
) {
    // Single-window app; nothing to do while the window is gone.
    let Ok(window_entity) = windows.single() else {
        return;
    };

    let icon = match state.get() {
        CursorState::Default => SystemCursorIcon::Default,
        CursorState::Hover => SystemCursorIcon::Pointer,
        CursorState::Dragging => SystemCursorIcon::Grabbing,
    };

    commands
        .entity(window_entity)
        .insert(CursorIcon::System(icon));
}
