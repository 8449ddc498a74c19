use crate::bonding::BondGraph;
use crate::components::{Atom, AtomId};
use crate::vector::VectorExt;
use std::collections::{HashMap, HashSet};
use std::f32::consts::TAU;

/// A bond angle at `atom2` between the bonds to `atom1` and `atom3`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomsAngle {
    pub atom1: AtomId,
    /// The vertex.
    pub atom2: AtomId,
    pub atom3: AtomId,
    /// Degrees in `[0, 180]`.
    pub angle: f32,
}

impl AtomsAngle {
    pub fn involves(&self, id: &AtomId) -> bool {
        &self.atom1 == id || &self.atom2 == id || &self.atom3 == id
    }
}

/// Every vertex angle along a path `a1 - a2 - a3` of bonds.
///
/// Results are unique per vertex and unordered outer pair, and come out in
/// atom order then bond order, so the list is stable between frames for an
/// unchanged graph.
pub fn detect_angles(atoms: &[Atom], graph: &BondGraph) -> Vec<AtomsAngle> {
    let by_id: HashMap<&AtomId, &Atom> = atoms.iter().map(|atom| (&atom.id, atom)).collect();
    let mut adjacency: HashMap<&AtomId, Vec<&AtomId>> = HashMap::new();
    for bond in graph.bonds() {
        adjacency.entry(&bond.atom1).or_default().push(&bond.atom2);
        adjacency.entry(&bond.atom2).or_default().push(&bond.atom1);
    }

    let mut seen: HashSet<(&AtomId, &AtomId, &AtomId)> = HashSet::new();
    let mut angles = Vec::new();
    for a1 in atoms {
        let Some(first_ring) = adjacency.get(&a1.id) else {
            continue;
        };
        for &vertex_id in first_ring {
            let Some(vertex) = by_id.get(vertex_id) else {
                continue;
            };
            let Some(second_ring) = adjacency.get(vertex_id) else {
                continue;
            };
            for &a3_id in second_ring {
                if a3_id == &a1.id {
                    continue;
                }
                let Some(a3) = by_id.get(a3_id) else {
                    continue;
                };
                if !(graph.is_bonded(&a1.id, vertex_id) && graph.is_bonded(vertex_id, a3_id)) {
                    continue;
                }
                let outer = if &a1.id < a3_id {
                    (&a1.id, a3_id)
                } else {
                    (a3_id, &a1.id)
                };
                if !seen.insert((vertex_id, outer.0, outer.1)) {
                    continue;
                }
                let ray1 = a1.pos - vertex.pos;
                let ray3 = a3.pos - vertex.pos;
                angles.push(AtomsAngle {
                    atom1: a1.id.clone(),
                    atom2: vertex_id.clone(),
                    atom3: a3_id.clone(),
                    angle: ray1.angle_between_degrees(ray3),
                });
            }
        }
    }
    angles
}

/// Counter-clockwise angle from the ray `vertex -> a1` to `vertex -> a3`,
/// in `[0, 360)` degrees.
///
/// Only defined for a closed triangle: returns `None` unless all three
/// pairs are bonded or any id is unknown.
pub fn signed_angle(
    atoms: &[Atom],
    graph: &BondGraph,
    a1: &AtomId,
    vertex: &AtomId,
    a3: &AtomId,
) -> Option<f32> {
    if !(graph.is_bonded(a1, vertex) && graph.is_bonded(vertex, a3) && graph.is_bonded(a3, a1)) {
        return None;
    }
    let find = |id: &AtomId| atoms.iter().find(|atom| &atom.id == id);
    let (p1, pv, p3) = (find(a1)?.pos, find(vertex)?.pos, find(a3)?.pos);
    let ray1 = p1 - pv;
    let ray3 = p3 - pv;
    let radians = (ray3.y.atan2(ray3.x) - ray1.y.atan2(ray1.x)).rem_euclid(TAU);
    Some(radians.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn atom(id: &str, x: f32, y: f32) -> Atom {
        Atom::new(AtomId::from(id), Vec2::new(x, y))
    }

    fn triangle() -> (Vec<Atom>, BondGraph) {
        let atoms = vec![atom("a", 0.0, 0.0), atom("b", 1.0, 0.0), atom("c", 1.0, 1.0)];
        let mut graph = BondGraph::default();
        graph.maintain(&atoms);
        (atoms, graph)
    }

    #[test]
    fn right_angle_at_vertex() {
        let (atoms, graph) = triangle();
        let angles = detect_angles(&atoms, &graph);
        let at_b = angles
            .iter()
            .find(|a| a.atom2 == AtomId::from("b"))
            .unwrap();
        assert!((at_b.angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn one_angle_per_vertex_and_outer_pair() {
        let (atoms, graph) = triangle();
        let angles = detect_angles(&atoms, &graph);
        assert_eq!(angles.len(), 3);
        let total: f32 = angles.iter().map(|a| a.angle).sum();
        assert!((total - 180.0).abs() < 1e-2);
    }

    #[test]
    fn open_chain_has_single_angle() {
        let atoms = vec![atom("a", 0.0, 0.0), atom("b", 100.0, 0.0), atom("c", 200.0, 0.0)];
        let mut graph = BondGraph::default();
        graph.try_add(&"a".into(), &"b".into());
        graph.try_add(&"b".into(), &"c".into());
        let angles = detect_angles(&atoms, &graph);
        assert_eq!(angles.len(), 1);
        assert_eq!(angles[0].atom2, AtomId::from("b"));
        assert!((angles[0].angle - 180.0).abs() < 1e-2);
    }

    #[test]
    fn no_bonds_no_angles() {
        let atoms = vec![atom("a", 0.0, 0.0), atom("b", 1.0, 0.0)];
        assert!(detect_angles(&atoms, &BondGraph::default()).is_empty());
    }

    #[test]
    fn coincident_atoms_do_not_produce_nan() {
        let atoms = vec![atom("a", 5.0, 5.0), atom("b", 5.0, 5.0), atom("c", 5.0, 5.0)];
        let mut graph = BondGraph::default();
        graph.maintain(&atoms);
        for angle in detect_angles(&atoms, &graph) {
            assert!(angle.angle.is_finite());
        }
    }

    #[test]
    fn signed_angle_needs_closed_triangle() {
        let (atoms, graph) = triangle();
        let (a, b, c) = (AtomId::from("a"), AtomId::from("b"), AtomId::from("c"));
        let ccw = signed_angle(&atoms, &graph, &a, &b, &c).unwrap();
        let cw = signed_angle(&atoms, &graph, &c, &b, &a).unwrap();
        assert!((ccw - 270.0).abs() < 1e-3);
        assert!((cw - 90.0).abs() < 1e-3);

        let mut open = graph.clone();
        open.remove_pair(&a, &c);
        assert!(signed_angle(&atoms, &open, &a, &b, &c).is_none());
    }
}
