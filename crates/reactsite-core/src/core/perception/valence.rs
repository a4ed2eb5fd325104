use crate::core::models::atom::Atom;
use crate::core::models::element;
use crate::core::models::molecule::Molecule;

/// Sum of bond orders on an atom, aromatic bonds counting 1.5, rounded to the nearest integer.
pub fn explicit_valence(molecule: &Molecule, idx: usize) -> u8 {
    let sum: f64 = molecule
        .neighbors(idx)
        .map(|(_, bond)| bond.order.valence_contribution())
        .sum();
    sum.round().clamp(0.0, u8::MAX as f64) as u8
}

/// Number of hydrogens needed to bring an atom up to its nearest allowed valence.
///
/// Charged atoms use the valence list of their isoelectronic element, so `N+`
/// behaves like carbon and `O-` like fluorine. Elements with no default valences
/// (transition metals) never receive implicit hydrogens, and neither do atoms
/// already above their largest allowed valence.
pub fn implicit_hydrogens(atom: &Atom, explicit_valence: u8) -> u8 {
    let effective_z = i16::from(atom.atomic_number()) - i16::from(atom.formal_charge);
    let Some(effective) = u8::try_from(effective_z).ok().and_then(element::by_number) else {
        return 0;
    };
    if atom.element.default_valences.is_empty() {
        return 0;
    }
    effective
        .default_valences
        .iter()
        .find(|&&v| v >= explicit_valence)
        .map_or(0, |&v| v - explicit_valence)
}
