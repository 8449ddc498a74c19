use crate::bonding::{BondChanges, BondGraph};
use crate::components::{Atom, AtomId};
use crate::interaction::InteractionSet;
use crate::resources::{Settings, TimeMode};
use crate::sandbox::Simulation;
use crate::vector::{Vector2, VectorExt};
use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhysicsSet;

/// Integration looks this many force-units ahead of the current position.
const LOOKAHEAD: f32 = 10.0;
/// Fraction of the gap to the lookahead target closed per second of `dt`.
const SETTLE_RATE: f32 = 0.5;

/// Net spring force on each atom, index-aligned with `atoms`.
///
/// Each bond contributes `f` from [`crate::bond::BondKind::compute_force`],
/// subtracted from its first endpoint and added to its second.
pub fn accumulate_bond_forces(atoms: &[Atom], graph: &BondGraph) -> Vec<Vector2> {
    let slots: HashMap<&AtomId, usize> = atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| (&atom.id, i))
        .collect();
    let mut forces = vec![Vector2::ZERO; atoms.len()];
    for bond in graph.bonds() {
        let (Some(&i), Some(&j)) = (slots.get(&bond.atom1), slots.get(&bond.atom2)) else {
            continue;
        };
        let force = bond.force_between(&atoms[i], &atoms[j]);
        forces[i] -= force;
        forces[j] += force;
    }
    forces
}

/// Damped step toward `pos + vel * LOOKAHEAD`.
pub fn integrate_position(atom: &mut Atom, delta_time: f32) {
    let target = atom.pos + atom.vel * LOOKAHEAD;
    atom.pos.self_interpolate(target, SETTLE_RATE * delta_time);
}

/// Teleports an atom that left the visible extent back to the middle of the
/// offending axis. Only one axis is corrected per call.
pub fn wrap_to_extent(atom: &mut Atom, extent: Vector2) {
    if atom.pos.x < 0.0 || atom.pos.x > extent.x {
        atom.pos.x = extent.x / 2.0;
    } else if atom.pos.y < 0.0 || atom.pos.y > extent.y {
        atom.pos.y = extent.y / 2.0;
    }
}

/// One physics step over the atom set.
///
/// The dragged atom is pinned to `pointer` before anything else, bonds are
/// then maintained against the current positions, and every other atom takes
/// its accumulated bond force as velocity and integrates.
pub fn step_physics(
    atoms: &mut [Atom],
    graph: &mut BondGraph,
    dragging: Option<&AtomId>,
    pointer: Vector2,
    extent: Vector2,
    delta_time: f32,
) -> BondChanges {
    if let Some(id) = dragging {
        if let Some(atom) = atoms.iter_mut().find(|atom| &atom.id == id) {
            atom.pos = pointer;
        }
    }

    let changes = graph.maintain(atoms);
    let forces = accumulate_bond_forces(atoms, graph);

    for (atom, force) in atoms.iter_mut().zip(forces) {
        if dragging == Some(&atom.id) {
            continue;
        }
        atom.vel = force;
        integrate_position(atom, delta_time);
        wrap_to_extent(atom, extent);
    }
    changes
}

/// Turns frame timestamps into simulation `deltaTime` under a [`TimeMode`].
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last_frame: Option<Duration>,
}

impl FrameClock {
    /// A clock whose first realtime delta is measured from `now`.
    pub fn started_at(now: Duration) -> Self {
        Self {
            last_frame: Some(now),
        }
    }

    /// Step size for the frame at `now` (time since the host started).
    ///
    /// In `Constant` mode the result depends only on the settings. In
    /// `Realtime` mode an unstarted clock yields zero on its first frame.
    pub fn delta(&mut self, settings: &Settings, now: Duration) -> f32 {
        let previous = self.last_frame.replace(now);
        match settings.time_mode {
            TimeMode::Realtime => previous
                .map(|last| now.saturating_sub(last).as_secs_f32())
                .unwrap_or(0.0),
            TimeMode::Constant => (1.0 / 60.0) * settings.iterations_per_second,
        }
    }
}

/// Rolling per-tick counts for the metrics panel.
#[derive(Resource, Debug, Default)]
pub struct SimulationStats {
    pub ticks: u64,
    pub last_delta: f32,
    /// Totals since startup.
    pub bonds_formed: u64,
    pub bonds_broken: u64,
    pub atoms: VecDeque<(f64, f64)>,
    pub bonds: VecDeque<(f64, f64)>,
    pub angles: VecDeque<(f64, f64)>,
    pub formed: VecDeque<(f64, f64)>,
    pub broken: VecDeque<(f64, f64)>,
}

impl SimulationStats {
    pub const HISTORY_LEN: usize = 600;

    /// Appends one sample per series for the tick that just ran on `simulation`.
    pub fn record(&mut self, delta_time: f32, simulation: &Simulation, changes: BondChanges) {
        self.ticks += 1;
        self.last_delta = delta_time;
        self.bonds_formed += changes.formed as u64;
        self.bonds_broken += changes.broken as u64;
        let x = self.ticks as f64;
        for (series, value) in [
            (&mut self.atoms, simulation.atoms().len()),
            (&mut self.bonds, simulation.bonds().len()),
            (&mut self.angles, simulation.angles().len()),
            (&mut self.formed, changes.formed),
            (&mut self.broken, changes.broken),
        ] {
            if series.len() == Self::HISTORY_LEN {
                series.pop_front();
            }
            series.push_back((x, value as f64));
        }
    }
}

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct SandboxClock(pub FrameClock);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SandboxClock>()
            .init_resource::<SimulationStats>()
            .configure_sets(Update, PhysicsSet.after(InteractionSet))
            .add_systems(
                Update,
                advance_simulation
                    .in_set(PhysicsSet)
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

fn advance_simulation(
    time: Res<Time>,
    mut clock: ResMut<SandboxClock>,
    mut simulation: ResMut<Simulation>,
    mut stats: ResMut<SimulationStats>,
) {
    let settings = simulation.settings;
    let delta_time = clock.delta(&settings, time.elapsed());
    let changes = simulation.tick(delta_time);
    stats.record(delta_time, &simulation, changes);
}
