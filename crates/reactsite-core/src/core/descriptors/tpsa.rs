//! Topological polar surface area from Ertl's N/O/S/P fragment contributions
//! (J. Med. Chem. 43, 3714 (2000)).

use super::{DescriptorError, attached_hydrogens};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use crate::core::perception::AtomPerception;

pub fn tpsa(molecule: &Molecule, perception: &[AtomPerception]) -> Result<f64, DescriptorError> {
    Ok((0..molecule.atom_count())
        .map(|idx| contribution(molecule, perception, idx))
        .sum())
}

fn contribution(molecule: &Molecule, perception: &[AtomPerception], idx: usize) -> f64 {
    let atom = &molecule.atoms()[idx];
    let h = attached_hydrogens(molecule, perception, idx);
    let heavy_degree = molecule
        .neighbors(idx)
        .filter(|&(n, _)| !molecule.atoms()[n].is_hydrogen())
        .count();
    let orders: Vec<BondOrder> = molecule.neighbors(idx).map(|(_, b)| b.order).collect();
    let double = orders.contains(&BondOrder::Double);
    let triple = orders.contains(&BondOrder::Triple);
    let aromatic = orders.contains(&BondOrder::Aromatic);

    match atom.atomic_number() {
        7 if atom.formal_charge > 0 => match h {
            0 => 3.01,
            1 => 4.36,
            2 => 16.61,
            _ => 27.64,
        },
        7 if aromatic => {
            if h > 0 {
                15.79
            } else {
                12.89
            }
        }
        7 => match (heavy_degree, h, double, triple) {
            (1, 0, _, true) => 23.79,
            (1, 1, true, _) => 23.85,
            (1, _, _, _) => 26.02,
            (2, 0, true, _) => 12.36,
            (2, _, _, _) => 12.03,
            (3, 0, true, _) => 11.68,
            (3, _, _, _) => 3.24,
            _ => 0.0,
        },
        8 if atom.formal_charge < 0 => 23.06,
        8 if aromatic => 13.14,
        8 => match (heavy_degree, h, double) {
            (1, 0, true) => 17.07,
            (_, h, _) if h > 0 => 20.23,
            (2, 0, _) => 9.23,
            (1, 0, false) => 17.07,
            _ => 0.0,
        },
        16 if h > 0 => 38.80,
        16 if double => 32.09,
        16 if heavy_degree >= 2 => 25.30,
        15 if double => 34.14,
        15 if h > 0 => 23.47,
        15 => 13.59,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::core::perception::perceive;

    fn tpsa_of(mol: &Molecule) -> f64 {
        tpsa(mol, &perceive(mol)).unwrap()
    }

    #[test]
    fn carboxylic_acid_sums_carbonyl_and_hydroxyl() {
        assert!((tpsa_of(&acetic_acid()) - 37.30).abs() < 1e-9);
    }

    #[test]
    fn primary_amine_and_nitrile() {
        let amine = build(&[("C", 0), ("N", 0)], &[(0, 1, BondOrder::Single)]);
        assert!((tpsa_of(&amine) - 26.02).abs() < 1e-9);

        let nitrile = build(&[("C", 0), ("C", 0), ("N", 0)], &[
            (0, 1, BondOrder::Single),
            (1, 2, BondOrder::Triple),
        ]);
        assert!((tpsa_of(&nitrile) - 23.79).abs() < 1e-9);
    }

    #[test]
    fn hydrocarbons_have_no_polar_surface() {
        let ethane = build(&[("C", 0), ("C", 0)], &[(0, 1, BondOrder::Single)]);
        assert_eq!(tpsa_of(&ethane), 0.0);
    }

    #[test]
    fn ether_oxygen() {
        let ether = build(&[("C", 0), ("O", 0), ("C", 0)], &[
            (0, 1, BondOrder::Single),
            (1, 2, BondOrder::Single),
        ]);
        assert!((tpsa_of(&ether) - 9.23).abs() < 1e-9);
    }
}
