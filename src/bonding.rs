//! Bond bookkeeping: the authoritative bond list, its pair index, distance
//! driven formation and dissolution, and manual toggling.

use crate::bond::{Bond, BondIndex};
use crate::components::{Atom, AtomId};
use bevy::log::{debug, info};

/// Pairs closer than this bond; pairs farther apart unbond.
pub const BOND_DISTANCE: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SameAtom,
    UnknownAtom,
    DuplicatePair,
}

/// Outcome of a manual bond toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToggle {
    Created,
    Removed,
    Ignored(IgnoreReason),
}

/// Pairs changed by one maintenance pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondChanges {
    pub formed: usize,
    pub broken: usize,
}

#[derive(Debug, Default, Clone)]
pub struct BondGraph {
    bonds: Vec<Bond>,
    index: BondIndex,
}

impl BondGraph {
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// O(1) membership through the pair index.
    pub fn is_bonded(&self, a: &AtomId, b: &AtomId) -> bool {
        self.index.contains(a, b)
    }

    /// A new bond is valid when it joins two distinct atoms not already bonded.
    pub fn is_bond_valid(&self, a: &AtomId, b: &AtomId) -> bool {
        a != b && !self.bonds.iter().any(|bond| bond.connects(a, b))
    }

    /// Adds a covalent bond if valid. Returns whether it was added.
    pub fn try_add(&mut self, a: &AtomId, b: &AtomId) -> bool {
        if !self.is_bond_valid(a, b) {
            return false;
        }
        self.bonds.push(Bond::new(a.clone(), b.clone()));
        self.index.insert(a, b);
        true
    }

    /// Removes the bond joining `a` and `b`, in either order.
    pub fn remove_pair(&mut self, a: &AtomId, b: &AtomId) -> bool {
        let Some(position) = self.bonds.iter().position(|bond| bond.connects(a, b)) else {
            return false;
        };
        self.bonds.remove(position);
        self.index.remove(a, b);
        true
    }

    /// Cascade for a deleted atom: drops its bonds, then its index entries.
    /// Returns how many bonds were removed.
    pub fn remove_atom(&mut self, id: &AtomId) -> usize {
        let before = self.bonds.len();
        self.bonds.retain(|bond| !bond.touches(id));
        self.index.forget_atom(id);
        before - self.bonds.len()
    }

    pub fn clear(&mut self) {
        self.bonds.clear();
        self.index.clear();
    }

    /// Manual toggle: removes an existing bond between the two atoms,
    /// otherwise creates one. Malformed requests are ignored.
    pub fn toggle(&mut self, atoms: &[Atom], a: Option<&AtomId>, b: Option<&AtomId>) -> BondToggle {
        let (Some(a), Some(b)) = (a, b) else {
            return BondToggle::Ignored(IgnoreReason::UnknownAtom);
        };
        if a == b {
            return BondToggle::Ignored(IgnoreReason::SameAtom);
        }
        let known = |id: &AtomId| atoms.iter().any(|atom| &atom.id == id);
        if !known(a) || !known(b) {
            return BondToggle::Ignored(IgnoreReason::UnknownAtom);
        }
        if self.remove_pair(a, b) {
            info!("Removed bond between {} and {}", a, b);
            return BondToggle::Removed;
        }
        if self.try_add(a, b) {
            info!("Created bond between {} and {}", a, b);
            BondToggle::Created
        } else {
            BondToggle::Ignored(IgnoreReason::DuplicatePair)
        }
    }

    /// Applies the distance rule to every unordered pair.
    ///
    /// A dragged atom is still covered: its pairs are evaluated from the
    /// partner's side, so dragging an atom away breaks its bonds on the
    /// same tick. Both comparisons are strict; a pair at exactly
    /// [`BOND_DISTANCE`] keeps whatever state it had.
    pub fn maintain(&mut self, atoms: &[Atom]) -> BondChanges {
        let mut changes = BondChanges::default();
        for (i, a) in atoms.iter().enumerate() {
            for b in &atoms[i + 1..] {
                let distance = a.pos.distance(b.pos);
                let bonded = self.is_bonded(&a.id, &b.id);
                if distance < BOND_DISTANCE && !bonded {
                    if self.try_add(&a.id, &b.id) {
                        debug!("Bond formed {}-{} at {:.1}", a.id, b.id, distance);
                        changes.formed += 1;
                    }
                } else if distance > BOND_DISTANCE && bonded && self.remove_pair(&a.id, &b.id) {
                    debug!("Bond broken {}-{} at {:.1}", a.id, b.id, distance);
                    changes.broken += 1;
                }
            }
        }
        changes
    }

    /// Whether the pair index still mirrors the bond list.
    pub fn is_consistent(&self) -> bool {
        self.index.mirrors(&self.bonds)
    }
}
