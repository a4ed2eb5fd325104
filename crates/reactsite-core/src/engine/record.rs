use crate::core::models::atom::Hybridization;
use crate::core::models::molecule::Molecule;
use crate::core::perception::AtomPerception;

/// Everything the classifier reads about one atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    pub index: usize,
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub hybridization: Hybridization,
    pub in_ring: bool,
    pub total_valence: u8,
    /// Implicit hydrogen count: valence slots not explained by explicit bonds.
    pub implicit_valence: u8,
}

impl AtomRecord {
    /// Snapshots every atom of a perceived molecule, in index order.
    ///
    /// `perception` must come from [`crate::core::perception::perceive`] on the same
    /// molecule; atoms past its end are not snapshotted.
    pub fn collect(molecule: &Molecule, perception: &[AtomPerception]) -> Vec<Self> {
        molecule
            .atoms()
            .iter()
            .zip(perception)
            .map(|(atom, p)| Self {
                index: atom.index,
                atomic_number: atom.atomic_number(),
                symbol: atom.symbol(),
                hybridization: p.hybridization,
                in_ring: p.in_ring,
                total_valence: p.total_valence,
                implicit_valence: p.implicit_hydrogens,
            })
            .collect()
    }
}
