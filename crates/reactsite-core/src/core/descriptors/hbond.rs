use super::{DescriptorError, attached_hydrogens};
use crate::core::models::molecule::Molecule;
use crate::core::perception::AtomPerception;

fn is_n_or_o(atomic_number: u8) -> bool {
    matches!(atomic_number, 7 | 8)
}

/// Nitrogen and oxygen atoms carrying at least one hydrogen.
pub fn donors(molecule: &Molecule, perception: &[AtomPerception]) -> Result<usize, DescriptorError> {
    Ok(molecule
        .atoms()
        .iter()
        .filter(|a| is_n_or_o(a.atomic_number()))
        .filter(|a| attached_hydrogens(molecule, perception, a.index) > 0)
        .count())
}

/// Nitrogen and oxygen atoms, except positively charged nitrogen.
pub fn acceptors(molecule: &Molecule) -> Result<usize, DescriptorError> {
    Ok(molecule
        .atoms()
        .iter()
        .filter(|a| is_n_or_o(a.atomic_number()))
        .filter(|a| !(a.atomic_number() == 7 && a.formal_charge > 0))
        .count())
}
