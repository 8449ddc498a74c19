use bevy::math::Vec2;
use molecule_sandbox::resources::{MAX_ZOOM, MIN_ZOOM};
use molecule_sandbox::{Atom, CursorAffordance, InputEvent, SandboxConfig, Simulation};

fn sandbox() -> Simulation {
    let config = SandboxConfig {
        seed: Some(1),
        ..SandboxConfig::default()
    };
    Simulation::new(Some(Vec2::new(1600.0, 1600.0)), config).unwrap()
}

#[test]
fn zoom_chases_wheel_target_inside_bounds() {
    let mut sim = sandbox();
    for _ in 0..200 {
        sim.handle_input(InputEvent::Wheel { delta_y: -400.0 });
        sim.tick(0.0);
        let world = sim.world();
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&world.target_zoom));
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&world.zoom));
    }
    assert_eq!(sim.world().target_zoom, MAX_ZOOM);
    assert!(sim.world().zoom > 9.9);

    for _ in 0..400 {
        sim.handle_input(InputEvent::Wheel { delta_y: 400.0 });
        sim.tick(0.0);
        assert!(sim.world().zoom >= MIN_ZOOM);
    }
    assert_eq!(sim.world().target_zoom, MIN_ZOOM);
}

#[test]
fn dragged_atom_tracks_zoom_corrected_pointer() {
    let mut sim = sandbox();
    sim.add_atom(Atom::new("a".into(), Vec2::new(200.0, 200.0)));
    sim.add_atom(Atom::new("b".into(), Vec2::new(260.0, 200.0)));
    sim.handle_input(InputEvent::PointerDown {
        position: Vec2::new(200.0, 200.0),
        bond_modifier: false,
    });
    for step in 0..20 {
        let screen = Vec2::new(200.0 + step as f32 * 10.0, 200.0);
        sim.handle_input(InputEvent::PointerMove { position: screen });
        sim.tick(1.0 / 60.0);
        let expected = screen / sim.world().zoom;
        assert_eq!(sim.atom(&"a".into()).unwrap().pos, expected);
    }
    assert_eq!(sim.interaction().cursor, CursorAffordance::Pointer);
}

#[test]
fn focus_recovery_releases_stuck_drag() {
    let mut sim = sandbox();
    sim.add_atom(Atom::new("a".into(), Vec2::new(200.0, 200.0)));
    sim.handle_input(InputEvent::PointerDown {
        position: Vec2::new(200.0, 200.0),
        bond_modifier: false,
    });
    sim.handle_input(InputEvent::KeyDown('n'));
    sim.handle_input(InputEvent::FocusGained);
    assert!(sim.interaction().dragging_id.is_none());
    assert!(sim.interaction().pressed_keys.is_empty());

    // 'n' fires again because its press state was cleared.
    sim.handle_input(InputEvent::KeyDown('n'));
    assert_eq!(sim.atoms().len(), 3);
}

#[test]
fn manual_bond_survives_until_distance_rule_applies() {
    let mut sim = sandbox();
    sim.add_atom(Atom::new("a".into(), Vec2::new(100.0, 100.0)));
    sim.add_atom(Atom::new("b".into(), Vec2::new(1000.0, 100.0)));
    for x in [100.0, 1000.0] {
        sim.handle_input(InputEvent::PointerDown {
            position: Vec2::new(x, 100.0),
            bond_modifier: true,
        });
    }
    assert!(sim.is_bonded(&"a".into(), &"b".into()));
    // 900 apart: the next maintenance pass dissolves it.
    sim.tick(1.0 / 60.0);
    assert!(!sim.is_bonded(&"a".into(), &"b".into()));
}

#[test]
fn teardown_releases_listeners() {
    let mut sim = sandbox();
    sim.add_atom(Atom::new("a".into(), Vec2::new(100.0, 100.0)));
    assert!(sim.is_active());
    sim.destroy();
    assert!(!sim.is_active());
    for event in [
        InputEvent::PointerDown {
            position: Vec2::new(100.0, 100.0),
            bond_modifier: false,
        },
        InputEvent::KeyDown('r'),
        InputEvent::Wheel { delta_y: -100.0 },
        InputEvent::Resize {
            width: 10.0,
            height: 10.0,
        },
    ] {
        assert!(!sim.handle_input(event));
    }
    sim.tick(1.0);
    assert_eq!(sim.atoms().len(), 1);
    assert_eq!(sim.viewport(), Vec2::new(1600.0, 1600.0));
    assert_eq!(sim.ticks(), 0);
}
