use crate::components::{Atom, AtomId};
use crate::vector::Vector2;
use bevy::color::palettes::basic::{BLUE, RED, WHITE};
use bevy::prelude::*;
use std::collections::HashSet;

/// Spring parameters for a bond behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub spring_constant: f32,
    pub ideal_length: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            spring_constant: 0.1,
            ideal_length: 100.0,
        }
    }
}

/// Force-generating behavior of a bond, selected by tag.
///
/// Only covalent bonds are created by the simulation; ionic and metallic
/// share the same spring law until they get their own models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BondKind {
    Covalent(SpringParams),
    Ionic(SpringParams),
    Metallic(SpringParams),
}

impl Default for BondKind {
    fn default() -> Self {
        BondKind::Covalent(SpringParams::default())
    }
}

impl BondKind {
    fn params(&self) -> SpringParams {
        match self {
            BondKind::Covalent(p) | BondKind::Ionic(p) | BondKind::Metallic(p) => *p,
        }
    }

    /// Hooke force along `b - a`. The caller subtracts it from `a` and adds
    /// it to `b`, which pulls a stretched bond together.
    pub fn compute_force(&self, a: Vector2, b: Vector2) -> Vector2 {
        let params = self.params();
        let displacement = a.distance(b) - params.ideal_length;
        let force_magnitude = -params.spring_constant * displacement;
        (b - a).normalize_or_zero() * force_magnitude
    }

    pub fn color(&self) -> Color {
        match self {
            BondKind::Covalent(_) => WHITE.into(),
            BondKind::Ionic(_) => BLUE.into(),
            BondKind::Metallic(_) => RED.into(),
        }
    }

    /// Line width at zoom 1.
    pub fn line_width(&self) -> f32 {
        5.0
    }
}

/// An edge between two atoms, referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub atom1: AtomId,
    pub atom2: AtomId,
    pub kind: BondKind,
}

impl Bond {
    pub fn new(atom1: AtomId, atom2: AtomId) -> Self {
        Self {
            atom1,
            atom2,
            kind: BondKind::default(),
        }
    }

    /// True for either ordering of `a` and `b`.
    pub fn connects(&self, a: &AtomId, b: &AtomId) -> bool {
        (&self.atom1 == a && &self.atom2 == b) || (&self.atom1 == b && &self.atom2 == a)
    }

    pub fn touches(&self, id: &AtomId) -> bool {
        &self.atom1 == id || &self.atom2 == id
    }

    /// The far end of the bond as seen from `id`, if `id` is an endpoint.
    pub fn other(&self, id: &AtomId) -> Option<&AtomId> {
        if &self.atom1 == id {
            Some(&self.atom2)
        } else if &self.atom2 == id {
            Some(&self.atom1)
        } else {
            None
        }
    }

    pub fn force_between(&self, a: &Atom, b: &Atom) -> Vector2 {
        self.kind.compute_force(a.pos, b.pos)
    }
}

/// Fast membership cache mirroring the bond list.
///
/// Both orderings of a pair are stored so lookups never need to canonicalize.
#[derive(Debug, Default, Clone)]
pub struct BondIndex {
    pairs: HashSet<(AtomId, AtomId)>,
}

impl BondIndex {
    pub fn insert(&mut self, a: &AtomId, b: &AtomId) {
        self.pairs.insert((a.clone(), b.clone()));
        self.pairs.insert((b.clone(), a.clone()));
    }

    pub fn remove(&mut self, a: &AtomId, b: &AtomId) {
        self.pairs.remove(&(a.clone(), b.clone()));
        self.pairs.remove(&(b.clone(), a.clone()));
    }

    pub fn contains(&self, a: &AtomId, b: &AtomId) -> bool {
        self.pairs.contains(&(a.clone(), b.clone()))
    }

    /// Drops every entry that mentions `id`.
    pub fn forget_atom(&mut self, id: &AtomId) {
        self.pairs.retain(|(a, b)| a != id && b != id);
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Number of unordered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether every bond is indexed and nothing else is.
    pub fn mirrors(&self, bonds: &[Bond]) -> bool {
        self.len() == bonds.len() && bonds.iter().all(|b| self.contains(&b.atom1, &b.atom2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (AtomId, AtomId, AtomId) {
        (AtomId::from("a"), AtomId::from("b"), AtomId::from("c"))
    }

    #[test]
    fn stretched_spring_pulls_together() {
        let kind = BondKind::default();
        let a = Vec2::ZERO;
        let b = Vec2::new(150.0, 0.0);
        let f = kind.compute_force(a, b);
        // displacement 50 -> magnitude -5 along +x
        assert!((f - Vec2::new(-5.0, 0.0)).length() < 1e-5);
        // applied as -f on a: a moves toward b
        assert!((-f).x > 0.0);
    }

    #[test]
    fn compressed_spring_pushes_apart() {
        let f = BondKind::default().compute_force(Vec2::ZERO, Vec2::new(40.0, 0.0));
        assert!(f.x > 0.0);
        assert!((-f).x < 0.0);
    }

    #[test]
    fn coincident_atoms_give_zero_force() {
        let f = BondKind::default().compute_force(Vec2::ONE, Vec2::ONE);
        assert_eq!(f, Vec2::ZERO);
    }

    #[test]
    fn bond_is_symmetric() {
        let (a, b, c) = ids();
        let bond = Bond::new(a.clone(), b.clone());
        assert!(bond.connects(&a, &b));
        assert!(bond.connects(&b, &a));
        assert!(!bond.connects(&a, &c));
        assert_eq!(bond.other(&a), Some(&b));
        assert_eq!(bond.other(&b), Some(&a));
        assert_eq!(bond.other(&c), None);
    }

    #[test]
    fn index_stores_both_orderings() {
        let (a, b, c) = ids();
        let mut index = BondIndex::default();
        index.insert(&a, &b);
        assert!(index.contains(&a, &b));
        assert!(index.contains(&b, &a));
        assert_eq!(index.len(), 1);

        index.insert(&b, &c);
        index.forget_atom(&b);
        assert!(index.is_empty());
    }

    #[test]
    fn index_mirrors_bond_list() {
        let (a, b, c) = ids();
        let bonds = vec![Bond::new(a.clone(), b.clone()), Bond::new(b, c)];
        let mut index = BondIndex::default();
        for bond in &bonds {
            index.insert(&bond.atom1, &bond.atom2);
        }
        assert!(index.mirrors(&bonds));
        index.remove(&a, &AtomId::from("b"));
        assert!(!index.mirrors(&bonds));
    }
}
