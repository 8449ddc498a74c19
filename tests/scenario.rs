use bevy::math::Vec2;
use molecule_sandbox::{InputEvent, SandboxConfig, Settings, Simulation, TimeMode};

const STEP: f32 = 1.0 / 60.0;

fn sandbox() -> Simulation {
    let config = SandboxConfig {
        settings: Settings {
            time_mode: TimeMode::Constant,
            iterations_per_second: 60.0,
            calculate_angles: true,
        },
        seed: Some(2024),
        ..SandboxConfig::default()
    };
    Simulation::new(Some(Vec2::new(2000.0, 2000.0)), config).unwrap()
}

fn spawn_at(sim: &mut Simulation, x: f32, y: f32) {
    sim.handle_input(InputEvent::PointerMove {
        position: Vec2::new(x, y),
    });
    sim.handle_input(InputEvent::KeyDown('n'));
    sim.handle_input(InputEvent::KeyUp('n'));
}

#[test]
fn drag_apart_breaks_bond() {
    let mut sim = sandbox();
    spawn_at(&mut sim, 0.0, 0.0);
    spawn_at(&mut sim, 50.0, 0.0);
    let a = sim.atoms()[0].id.clone();
    let b = sim.atoms()[1].id.clone();

    sim.tick(STEP);
    assert!(sim.is_bonded(&a, &b));
    assert!(sim.is_bonded(&b, &a));

    let grab = sim.atom(&a).unwrap().pos * sim.world().zoom;
    sim.handle_input(InputEvent::PointerDown {
        position: grab,
        bond_modifier: false,
    });
    assert_eq!(sim.interaction().dragging_id.as_ref(), Some(&a));
    sim.handle_input(InputEvent::PointerMove {
        position: Vec2::new(1000.0, 1000.0),
    });

    sim.tick(STEP);
    assert_eq!(sim.atom(&a).unwrap().pos, Vec2::new(1000.0, 1000.0));
    assert!(!sim.is_bonded(&a, &b));
    assert!(sim.bonds().is_empty());
}

#[test]
fn deleting_an_atom_removes_its_bonds_and_angles() {
    let mut sim = sandbox();
    spawn_at(&mut sim, 500.0, 500.0);
    spawn_at(&mut sim, 600.0, 500.0);
    spawn_at(&mut sim, 600.0, 600.0);
    sim.tick(STEP);
    assert_eq!(sim.bonds().len(), 3);
    assert_eq!(sim.angles().len(), 3);

    let victim = sim.atoms()[1].id.clone();
    let at = sim.atom(&victim).unwrap().pos;
    sim.handle_input(InputEvent::PointerMove { position: at });
    sim.handle_input(InputEvent::KeyDown('d'));

    assert!(sim.atom(&victim).is_none());
    assert!(sim.bonds().iter().all(|bond| !bond.touches(&victim)));
    assert!(sim.bond_graph().is_consistent());
    sim.tick(STEP);
    assert_eq!(sim.bonds().len(), 1);
    assert!(sim.angles().iter().all(|angle| !angle.involves(&victim)));
}

#[test]
fn far_atoms_stay_apart() {
    let mut sim = sandbox();
    spawn_at(&mut sim, 100.0, 100.0);
    spawn_at(&mut sim, 900.0, 100.0);
    for _ in 0..30 {
        sim.tick(STEP);
    }
    assert!(sim.bonds().is_empty());
    assert_eq!(sim.atoms()[0].pos, Vec2::new(100.0, 100.0));
}
