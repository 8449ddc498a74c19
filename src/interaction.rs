use crate::components::AtomId;
use crate::sandbox::Simulation;
use crate::vector::Vector2;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused, WindowResized};
use bevy_egui::input::{egui_wants_any_keyboard_input, egui_wants_any_pointer_input};
use std::collections::HashSet;

/// Target zoom change per pixel of wheel travel.
pub const WHEEL_ZOOM_SENSITIVITY: f32 = 0.001;
/// Pixels per wheel "line" when the platform reports line units.
const WHEEL_LINE_HEIGHT: f32 = 100.0;

/// Raw input delivered by the host. Positions are surface pixels, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: Vector2,
        bond_modifier: bool,
    },
    PointerMove {
        position: Vector2,
    },
    PointerUp,
    KeyDown(char),
    KeyUp(char),
    FocusGained,
    /// Positive scrolls down and zooms out.
    Wheel {
        delta_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::PointerDown { .. } | InputEvent::PointerMove { .. } | InputEvent::PointerUp => {
                InputKind::Pointer
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => InputKind::Keyboard,
            InputEvent::FocusGained => InputKind::Focus,
            InputEvent::Wheel { .. } => InputKind::Wheel,
            InputEvent::Resize { .. } => InputKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Pointer,
    Keyboard,
    Focus,
    Wheel,
    Resize,
}

impl InputKind {
    pub const ALL: [InputKind; 5] = [
        InputKind::Pointer,
        InputKind::Keyboard,
        InputKind::Focus,
        InputKind::Wheel,
        InputKind::Resize,
    ];
}

/// Listener registrations scoped to one simulation instance.
#[derive(Debug, Default, Clone)]
pub struct InputListeners {
    registered: HashSet<InputKind>,
}

impl InputListeners {
    pub fn register_all(&mut self) {
        self.registered.extend(InputKind::ALL);
    }

    pub fn release_all(&mut self) {
        self.registered.clear();
    }

    pub fn is_registered(&self, kind: InputKind) -> bool {
        self.registered.contains(&kind)
    }

    pub fn any_registered(&self) -> bool {
        !self.registered.is_empty()
    }
}

/// What the host should show as the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    #[default]
    Default,
    Pointer,
}

/// Transient input state. Nothing here survives a reset except the pointer.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub dragging_id: Option<AtomId>,
    /// Anchor for bond-modifier clicks.
    pub last_clicked_item_id: Option<AtomId>,
    pub pressed_keys: HashSet<char>,
    /// Last pointer position, in world units.
    pub pointer: Vector2,
    pub cursor: CursorAffordance,
}

impl InteractionState {
    pub fn clear_drag(&mut self) {
        self.dragging_id = None;
    }

    pub fn clear_anchor(&mut self) {
        self.last_clicked_item_id = None;
    }

    /// Drops drag and anchor references to a deleted atom.
    pub fn forget_atom(&mut self, id: &AtomId) {
        if self.dragging_id.as_ref() == Some(id) {
            self.dragging_id = None;
        }
        if self.last_clicked_item_id.as_ref() == Some(id) {
            self.last_clicked_item_id = None;
        }
    }
}

impl Simulation {
    /// Feeds one input event through the interaction state machine.
    ///
    /// Returns `false` when no listener for the event's kind is registered,
    /// which is always the case after [`Simulation::destroy`].
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.listeners.is_registered(event.kind()) {
            return false;
        }
        match event {
            // Pointer positions arrive in surface pixels; the engine works in world units.
            InputEvent::PointerDown {
                position,
                bond_modifier,
            } => {
                self.interaction.pointer = self.world.screen_to_world(position);
                self.pointer_down(bond_modifier);
            }
            InputEvent::PointerMove { position } => {
                self.interaction.pointer = self.world.screen_to_world(position);
                self.refresh_cursor();
            }
            InputEvent::PointerUp => self.interaction.clear_drag(),
            InputEvent::KeyDown(key) => self.key_down(key.to_ascii_lowercase()),
            InputEvent::KeyUp(key) => {
                self.interaction
                    .pressed_keys
                    .remove(&key.to_ascii_lowercase());
            }
            // Key-ups and the pointer release may have been missed while unfocused.
            InputEvent::FocusGained => {
                self.interaction.pressed_keys.clear();
                self.interaction.clear_drag();
            }
            InputEvent::Wheel { delta_y } => {
                self.world
                    .nudge_target_zoom(-delta_y * WHEEL_ZOOM_SENSITIVITY);
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
        true
    }

    fn pointer_down(&mut self, bond_modifier: bool) {
        let hovered = self.atom_at(self.interaction.pointer).cloned();
        // Modifier click: toggle a bond from the previous anchor, then re-anchor
        // on whatever is under the pointer (possibly nothing).
        if bond_modifier {
            if let Some(anchor) = self.interaction.last_clicked_item_id.clone() {
                self.toggle_bond(Some(&anchor), hovered.as_ref());
            }
            self.interaction.last_clicked_item_id = hovered;
        }
        // Plain click: drop the anchor and start dragging the hovered atom, if any.
        else {
            self.interaction.clear_anchor();
            if let Some(id) = hovered {
                debug!("Dragging {}", id);
                self.interaction.dragging_id = Some(id);
            }
        }
    }

    /// Pointer over an atom; otherwise default unless a drag is holding it.
    fn refresh_cursor(&mut self) {
        if self.atom_at(self.interaction.pointer).is_some() {
            self.interaction.cursor = CursorAffordance::Pointer;
        } else if self.interaction.dragging_id.is_none() {
            self.interaction.cursor = CursorAffordance::Default;
        }
    }

    /// Actions fire on the initial press only; held keys auto-repeat as no-ops.
    fn key_down(&mut self, key: char) {
        if !self.interaction.pressed_keys.insert(key) {
            return;
        }
        let keys = self.keys;
        if key == keys.spawn {
            self.spawn_random_atom(self.interaction.pointer);
        } else if key == keys.delete {
            if let Some(id) = self.atom_at(self.interaction.pointer).cloned() {
                self.remove_atom(&id);
            }
        } else if key == keys.reset {
            self.reset();
        }
    }
}

/// Host systems that translate Bevy input into [`InputEvent`]s.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionSet;

/// Tears the running simulation down and removes it from the world.
#[derive(Event, Debug, Default)]
pub struct TeardownEvent;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TeardownEvent>().add_systems(
            Update,
            (
                // Presses and wheel over an egui panel belong to the panel.
                forward_pointer_presses.run_if(not(egui_wants_any_pointer_input)),
                // Releases and moves always reach the engine, so a drag that
                // ends over a panel still ends.
                forward_pointer_releases,
                forward_cursor_moves,
                // Typing into a text field must not spawn atoms.
                forward_keys.run_if(not(egui_wants_any_keyboard_input)),
                forward_wheel.run_if(not(egui_wants_any_pointer_input)),
                forward_window_events,
                // Teardown goes last so this frame's input is handled first.
                request_teardown,
                handle_teardown,
            )
                .chain()
                .in_set(InteractionSet)
                .run_if(resource_exists::<Simulation>),
        );
    }
}

/// Left-button press at the cursor. Ctrl held makes it a bond-toggle click.
fn forward_pointer_presses(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut simulation: ResMut<Simulation>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    // Cursor outside the window: nothing to click on.
    let Some(position) = window.cursor_position() else {
        return;
    };
    let bond_modifier = keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    simulation.handle_input(InputEvent::PointerDown {
        position,
        bond_modifier,
    });
}

fn forward_pointer_releases(
    buttons: Res<ButtonInput<MouseButton>>,
    mut simulation: ResMut<Simulation>,
) {
    if buttons.just_released(MouseButton::Left) {
        simulation.handle_input(InputEvent::PointerUp);
    }
}

fn forward_cursor_moves(
    mut cursor_moved: EventReader<CursorMoved>,
    mut simulation: ResMut<Simulation>,
) {
    // Only the latest position this frame matters.
    if let Some(event) = cursor_moved.read().last() {
        simulation.handle_input(InputEvent::PointerMove {
            position: event.position,
        });
    }
}

/// Character keys only; named keys such as Escape are handled by the host.
fn forward_keys(mut keyboard: EventReader<KeyboardInput>, mut simulation: ResMut<Simulation>) {
    for event in keyboard.read() {
        // Logical key so bindings follow the user's layout.
        let Key::Character(text) = &event.logical_key else {
            continue;
        };
        let Some(key) = text.chars().next() else {
            continue;
        };
        let input = match event.state {
            ButtonState::Pressed => InputEvent::KeyDown(key),
            ButtonState::Released => InputEvent::KeyUp(key),
        };
        simulation.handle_input(input);
    }
}

fn forward_wheel(mut wheel: EventReader<MouseWheel>, mut simulation: ResMut<Simulation>) {
    for event in wheel.read() {
        // Normalize to pixels so line-based mice and touchpads zoom alike.
        let pixels = match event.unit {
            MouseScrollUnit::Line => event.y * WHEEL_LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        };
        // Bevy reports scrolling up as positive.
        simulation.handle_input(InputEvent::Wheel { delta_y: -pixels });
    }
}

fn forward_window_events(
    mut focused: EventReader<WindowFocused>,
    mut resized: EventReader<WindowResized>,
    mut simulation: ResMut<Simulation>,
) {
    // Focus loss needs no handling; regaining it resets stale key and drag state.
    if focused.read().any(|event| event.focused) {
        simulation.handle_input(InputEvent::FocusGained);
    }
    if let Some(event) = resized.read().last() {
        simulation.handle_input(InputEvent::Resize {
            width: event.width,
            height: event.height,
        });
    }
}

/// Escape stops the simulation for good.
fn request_teardown(keys: Res<ButtonInput<KeyCode>>, mut teardown: EventWriter<TeardownEvent>) {
    if keys.just_pressed(KeyCode::Escape) {
        teardown.write(TeardownEvent);
    }
}

fn handle_teardown(
    mut commands: Commands,
    mut teardown: EventReader<TeardownEvent>,
    mut simulation: ResMut<Simulation>,
) {
    if teardown.read().last().is_some() {
        // Release listeners first, then drop the resource; every system gated
        // on `resource_exists::<Simulation>` stops from the next frame on.
        simulation.destroy();
        commands.remove_resource::<Simulation>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Atom;
    use crate::config::SandboxConfig;

    fn sandbox() -> Simulation {
        let config = SandboxConfig {
            seed: Some(5),
            ..SandboxConfig::default()
        };
        Simulation::new(Some(Vec2::new(1600.0, 1200.0)), config).unwrap()
    }

    fn with_atoms(ids: &[(&str, f32, f32)]) -> Simulation {
        let mut sim = sandbox();
        for &(id, x, y) in ids {
            sim.add_atom(Atom::new(id.into(), Vec2::new(x, y)));
        }
        sim
    }

    #[test]
    fn plain_click_on_atom_starts_drag_and_clears_anchor() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0)]);
        sim.interaction.last_clicked_item_id = Some("a".into());
        sim.handle_input(InputEvent::PointerDown {
            position: Vec2::new(105.0, 100.0),
            bond_modifier: false,
        });
        assert_eq!(sim.interaction().dragging_id, Some("a".into()));
        assert_eq!(sim.interaction().last_clicked_item_id, None);
        sim.handle_input(InputEvent::PointerUp);
        assert_eq!(sim.interaction().dragging_id, None);
    }

    #[test]
    fn click_on_empty_space_does_not_drag() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0)]);
        sim.handle_input(InputEvent::PointerDown {
            position: Vec2::new(500.0, 500.0),
            bond_modifier: false,
        });
        assert_eq!(sim.interaction().dragging_id, None);
    }

    #[test]
    fn modifier_clicks_toggle_bond_from_anchor() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0), ("b", 900.0, 100.0)]);
        let click = |x| InputEvent::PointerDown {
            position: Vec2::new(x, 100.0),
            bond_modifier: true,
        };
        sim.handle_input(click(100.0));
        assert_eq!(sim.interaction().last_clicked_item_id, Some("a".into()));
        assert!(sim.bonds().is_empty());

        sim.handle_input(click(900.0));
        assert!(sim.is_bonded(&"a".into(), &"b".into()));
        assert_eq!(sim.interaction().last_clicked_item_id, Some("b".into()));

        sim.handle_input(click(100.0));
        assert!(sim.bonds().is_empty());
        assert_eq!(sim.interaction().dragging_id, None);
    }

    #[test]
    fn modifier_click_on_empty_space_clears_anchor() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0)]);
        for x in [100.0, 600.0] {
            sim.handle_input(InputEvent::PointerDown {
                position: Vec2::new(x, 100.0),
                bond_modifier: true,
            });
        }
        assert_eq!(sim.interaction().last_clicked_item_id, None);
        assert!(sim.bonds().is_empty());
    }

    #[test]
    fn pointer_is_zoom_corrected() {
        let mut sim = sandbox();
        sim.world.set_zoom(2.0);
        sim.handle_input(InputEvent::PointerMove {
            position: Vec2::new(200.0, 100.0),
        });
        assert_eq!(sim.interaction().pointer, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn cursor_follows_hover_but_sticks_while_dragging() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0)]);
        let moved = |x| InputEvent::PointerMove {
            position: Vec2::new(x, 100.0),
        };
        sim.handle_input(moved(100.0));
        assert_eq!(sim.interaction().cursor, CursorAffordance::Pointer);
        sim.handle_input(moved(600.0));
        assert_eq!(sim.interaction().cursor, CursorAffordance::Default);

        sim.handle_input(moved(100.0));
        sim.handle_input(InputEvent::PointerDown {
            position: Vec2::new(100.0, 100.0),
            bond_modifier: false,
        });
        sim.handle_input(moved(600.0));
        assert_eq!(sim.interaction().cursor, CursorAffordance::Pointer);
    }

    #[test]
    fn spawn_key_fires_once_per_press() {
        let mut sim = sandbox();
        sim.handle_input(InputEvent::PointerMove {
            position: Vec2::new(300.0, 300.0),
        });
        sim.handle_input(InputEvent::KeyDown('n'));
        sim.handle_input(InputEvent::KeyDown('n'));
        assert_eq!(sim.atoms().len(), 1);
        assert_eq!(sim.atoms()[0].pos, Vec2::new(300.0, 300.0));
        sim.handle_input(InputEvent::KeyUp('n'));
        sim.handle_input(InputEvent::KeyDown('N'));
        assert_eq!(sim.atoms().len(), 2);
    }

    #[test]
    fn delete_key_removes_hovered_atom() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0), ("b", 200.0, 100.0)]);
        sim.tick(0.0);
        assert_eq!(sim.bonds().len(), 1);
        sim.handle_input(InputEvent::PointerMove {
            position: Vec2::new(100.0, 100.0),
        });
        sim.handle_input(InputEvent::KeyDown('d'));
        assert!(sim.atom(&"a".into()).is_none());
        assert!(sim.bonds().is_empty());
    }

    #[test]
    fn reset_key_clears_everything() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0), ("b", 200.0, 100.0)]);
        sim.handle_input(InputEvent::PointerDown {
            position: Vec2::new(100.0, 100.0),
            bond_modifier: false,
        });
        sim.tick(0.0);
        sim.handle_input(InputEvent::KeyDown('r'));
        assert!(sim.atoms().is_empty());
        assert!(sim.bonds().is_empty());
        assert!(sim.angles().is_empty());
        assert_eq!(sim.interaction().dragging_id, None);
    }

    #[test]
    fn focus_clears_keys_and_drag() {
        let mut sim = with_atoms(&[("a", 100.0, 100.0)]);
        sim.handle_input(InputEvent::KeyDown('x'));
        sim.handle_input(InputEvent::PointerDown {
            position: Vec2::new(100.0, 100.0),
            bond_modifier: false,
        });
        sim.handle_input(InputEvent::FocusGained);
        assert!(sim.interaction().pressed_keys.is_empty());
        assert_eq!(sim.interaction().dragging_id, None);
    }

    #[test]
    fn wheel_moves_target_within_bounds() {
        let mut sim = sandbox();
        sim.handle_input(InputEvent::Wheel { delta_y: -100.0 });
        assert!((sim.world().target_zoom - 1.1).abs() < 1e-6);
        for _ in 0..1000 {
            sim.handle_input(InputEvent::Wheel { delta_y: 500.0 });
        }
        assert_eq!(sim.world().target_zoom, crate::resources::MIN_ZOOM);
    }

    #[test]
    fn released_listeners_ignore_input() {
        let mut sim = sandbox();
        sim.destroy();
        assert!(!sim.handle_input(InputEvent::KeyDown('n')));
        assert!(sim.atoms().is_empty());
    }
}
