use crate::angles::{AtomsAngle, detect_angles};
use crate::bond::Bond;
use crate::bonding::{BondChanges, BondGraph, BondToggle};
use crate::components::{Atom, AtomId};
use crate::config::{KeyBindings, SandboxConfig};
use crate::elements::ElementTable;
use crate::error::{Result, SandboxError};
use crate::interaction::{InputListeners, InteractionState};
use crate::resources::{Settings, World};
use crate::simulation::step_physics;
use crate::vector::Vector2;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The sandbox: atoms, bonds, derived angles, camera and interaction state.
///
/// All mutation happens through [`Simulation::tick`] and
/// [`Simulation::handle_input`], both on the host's single update thread.
#[derive(Resource)]
pub struct Simulation {
    pub(crate) atoms: Vec<Atom>,
    pub(crate) graph: BondGraph,
    pub(crate) angles: Vec<AtomsAngle>,
    pub(crate) world: World,
    /// Replaced freely by the host; read by value at the start of each tick.
    pub settings: Settings,
    pub(crate) viewport: Vector2,
    pub(crate) interaction: InteractionState,
    pub(crate) listeners: InputListeners,
    pub(crate) keys: KeyBindings,
    elements: ElementTable,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    /// Builds a sandbox for a surface of `surface_size` logical pixels.
    ///
    /// Fails when there is no surface or it has no drawable area; the host
    /// must not start a tick loop in that case.
    pub fn new(surface_size: Option<Vector2>, config: SandboxConfig) -> Result<Self> {
        let Some(size) = surface_size else {
            return Err(SandboxError::SurfaceUnavailable(
                "no rendering surface".to_string(),
            ));
        };
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(SandboxError::SurfaceUnavailable(format!(
                "surface is {}x{}",
                size.x, size.y
            )));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut listeners = InputListeners::default();
        listeners.register_all();
        info!(
            "Simulation started on a {}x{} surface with {:?}",
            size.x, size.y, config.settings
        );
        Ok(Self {
            atoms: Vec::new(),
            graph: BondGraph::default(),
            angles: Vec::new(),
            world: World::default(),
            settings: config.settings,
            viewport: size,
            interaction: InteractionState::default(),
            listeners,
            keys: config.keys,
            elements: ElementTable::embedded()?,
            rng,
            ticks: 0,
        })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        self.graph.bonds()
    }

    pub fn bond_graph(&self) -> &BondGraph {
        &self.graph
    }

    pub fn angles(&self) -> &[AtomsAngle] {
        &self.angles
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn viewport(&self) -> Vector2 {
        self.viewport
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether input listeners are still registered.
    pub fn is_active(&self) -> bool {
        self.listeners.any_registered()
    }

    pub fn atom(&self, id: &AtomId) -> Option<&Atom> {
        self.atoms.iter().find(|atom| &atom.id == id)
    }

    pub fn is_bonded(&self, a: &AtomId, b: &AtomId) -> bool {
        self.graph.is_bonded(a, b)
    }

    /// Visible area in world units at the current zoom.
    pub fn world_extent(&self) -> Vector2 {
        self.viewport / self.world.zoom
    }

    /// First atom in iteration order whose base radius contains `point`.
    pub fn atom_at(&self, point: Vector2) -> Option<&AtomId> {
        self.atoms
            .iter()
            .find(|atom| atom.contains(point))
            .map(|atom| &atom.id)
    }

    /// Inserts an atom. Rejects duplicate ids and non-positive sizes.
    pub fn add_atom(&mut self, atom: Atom) -> bool {
        if atom.size <= 0.0 || self.atom(&atom.id).is_some() {
            return false;
        }
        self.atoms.push(atom);
        true
    }

    /// Spawns an atom of a random element at `pos` (world units).
    pub fn spawn_random_atom(&mut self, pos: Vector2) -> Option<AtomId> {
        let atom = loop {
            let atom = Atom::generate_random(pos, &mut self.rng, &self.elements)?;
            if self.atom(&atom.id).is_none() {
                break atom;
            }
        };
        let id = atom.id.clone();
        info!(
            "Spawned {} ({}) at ({:.1}, {:.1})",
            atom.properties.symbol.as_deref().unwrap_or("?"),
            id,
            pos.x,
            pos.y
        );
        self.add_atom(atom).then_some(id)
    }

    /// Spawns `count` random atoms scattered over the visible area.
    pub fn spawn_scattered(&mut self, count: usize) -> Vec<AtomId> {
        let extent = self.world_extent();
        (0..count)
            .filter_map(|_| {
                let pos = Vector2::new(
                    self.rng.random_range(0.0..extent.x),
                    self.rng.random_range(0.0..extent.y),
                );
                self.spawn_random_atom(pos)
            })
            .collect()
    }

    /// Deletes an atom and everything that referenced it: its bonds, their
    /// index entries, angles through it, and drag or anchor state.
    pub fn remove_atom(&mut self, id: &AtomId) -> bool {
        let before = self.atoms.len();
        self.atoms.retain(|atom| &atom.id != id);
        if self.atoms.len() == before {
            return false;
        }
        let removed_bonds = self.graph.remove_atom(id);
        self.angles.retain(|angle| !angle.involves(id));
        self.interaction.forget_atom(id);
        info!("Deleted atom {} and {} bond(s)", id, removed_bonds);
        true
    }

    /// Manual bond toggle between two atoms, independent of distance.
    pub fn toggle_bond(&mut self, a: Option<&AtomId>, b: Option<&AtomId>) -> BondToggle {
        let outcome = self.graph.toggle(&self.atoms, a, b);
        if let BondToggle::Ignored(reason) = outcome {
            debug!("Ignored bond request {:?} -> {:?}: {:?}", a, b, reason);
        }
        outcome
    }

    /// Removes all atoms, bonds and angles and drops drag state.
    pub fn reset(&mut self) {
        self.atoms.clear();
        self.graph.clear();
        self.angles.clear();
        self.interaction.clear_drag();
        self.interaction.clear_anchor();
        info!("Simulation reset");
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vector2::new(width, height);
            info!("Surface resized to {}x{}", width, height);
        }
    }

    /// Advances one frame by `delta_time` seconds and reports the bonds
    /// that formed or broke during it.
    ///
    /// Order: physics (which maintains bonds), zoom easing, then angle
    /// detection when enabled. Does nothing after [`Simulation::destroy`].
    pub fn tick(&mut self, delta_time: f32) -> BondChanges {
        if !self.is_active() {
            return BondChanges::default();
        }
        let settings = self.settings;
        let extent = self.world_extent();
        let dragging = self.interaction.dragging_id.clone();
        let changes = step_physics(
            &mut self.atoms,
            &mut self.graph,
            dragging.as_ref(),
            self.interaction.pointer,
            extent,
            delta_time,
        );
        self.world.smooth_zoom();
        if settings.calculate_angles {
            self.angles = detect_angles(&self.atoms, &self.graph);
        } else {
            self.angles.clear();
        }
        self.ticks += 1;
        changes
    }

    /// Releases every input listener and drops transient input state.
    /// Ticks and input are ignored afterwards.
    pub fn destroy(&mut self) {
        self.listeners.release_all();
        self.interaction = InteractionState::default();
        info!("Simulation torn down after {} ticks", self.ticks);
    }
}
