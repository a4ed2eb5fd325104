//! Derived per-atom chemistry: valence, implicit hydrogens, ring membership and
//! hybridization.
//!
//! Everything here is computed from the bond graph alone; coordinates are never
//! consulted.

pub mod hybridization;
pub mod rings;
pub mod valence;

use crate::core::models::atom::Hybridization;
use crate::core::models::molecule::Molecule;
use tracing::debug;

/// Perceived properties of a single atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtomPerception {
    pub explicit_valence: u8,
    pub implicit_hydrogens: u8,
    pub total_valence: u8,
    pub in_ring: bool,
    pub hybridization: Hybridization,
}

/// Perceives every atom of `molecule`, in atom-index order.
pub fn perceive(molecule: &Molecule) -> Vec<AtomPerception> {
    let explicit: Vec<u8> = (0..molecule.atom_count())
        .map(|idx| valence::explicit_valence(molecule, idx))
        .collect();
    let implicit: Vec<u8> = molecule
        .atoms()
        .iter()
        .zip(&explicit)
        .map(|(atom, &ev)| valence::implicit_hydrogens(atom, ev))
        .collect();
    let ring_member = rings::ring_membership(molecule);
    let hybridizations = hybridization::assign(molecule, &explicit, &implicit);

    let perceived: Vec<AtomPerception> = (0..molecule.atom_count())
        .map(|idx| AtomPerception {
            explicit_valence: explicit[idx],
            implicit_hydrogens: implicit[idx],
            total_valence: explicit[idx].saturating_add(implicit[idx]),
            in_ring: ring_member[idx],
            hybridization: hybridizations[idx],
        })
        .collect();

    debug!(
        atoms = perceived.len(),
        ring_atoms = perceived.iter().filter(|p| p.in_ring).count(),
        implicit_h = perceived.iter().map(|p| p.implicit_hydrogens as usize).sum::<usize>(),
        "Perceived atom properties"
    );
    perceived
}
