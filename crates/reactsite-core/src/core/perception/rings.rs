use crate::core::models::molecule::Molecule;
use std::collections::VecDeque;

/// Flags every atom that lies on at least one cycle of the bond graph.
///
/// A bond is cyclic when its two ends stay connected after the bond itself is
/// removed; an atom is a ring member when any of its bonds is cyclic.
pub fn ring_membership(molecule: &Molecule) -> Vec<bool> {
    let mut in_ring = vec![false; molecule.atom_count()];
    for (bond_idx, bond) in molecule.bonds().iter().enumerate() {
        if in_ring[bond.atom1_idx] && in_ring[bond.atom2_idx] {
            continue;
        }
        if is_cyclic(molecule, bond_idx) {
            in_ring[bond.atom1_idx] = true;
            in_ring[bond.atom2_idx] = true;
        }
    }
    in_ring
}

fn is_cyclic(molecule: &Molecule, bond_idx: usize) -> bool {
    let bond = &molecule.bonds()[bond_idx];
    let (start, goal) = (bond.atom1_idx, bond.atom2_idx);
    let mut visited = vec![false; molecule.atom_count()];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        for (next, via) in molecule.neighbors(current) {
            if std::ptr::eq(via, bond) || visited[next] {
                continue;
            }
            if next == goal {
                return true;
            }
            visited[next] = true;
            queue.push_back(next);
        }
    }
    false
}
