use crate::core::models::atom::{Atom, Hybridization};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;

/// Non-bonding electron pairs left on an atom once its valence is satisfied.
pub fn lone_pairs(atom: &Atom, total_valence: u8) -> u8 {
    let remaining = i16::from(atom.element.outer_electrons)
        - i16::from(atom.formal_charge)
        - i16::from(total_valence);
    (remaining.max(0) / 2) as u8
}

/// Assigns a hybridization to every atom.
///
/// Multiple bonds decide first (a triple bond or two cumulated double bonds on a
/// two-coordinate atom give SP, one double or aromatic bond on an atom with at most
/// three partners gives SP2). Remaining atoms are classified by steric number
/// (partners plus lone pairs). Lone-pair donors among N, O and S that end up SP3 are
/// promoted to SP2 when bonded to an atom carrying a pi bond.
pub fn assign(molecule: &Molecule, explicit: &[u8], implicit: &[u8]) -> Vec<Hybridization> {
    let local: Vec<Hybridization> = (0..molecule.atom_count())
        .map(|idx| local_environment(molecule, idx, explicit[idx], implicit[idx]))
        .collect();

    local
        .iter()
        .enumerate()
        .map(|(idx, &hyb)| {
            let atom = &molecule.atoms()[idx];
            let donor = matches!(atom.atomic_number(), 7 | 8 | 16)
                && lone_pairs(atom, explicit[idx].saturating_add(implicit[idx])) > 0;
            if hyb == Hybridization::SP3
                && donor
                && molecule.neighbors(idx).any(|(n, _)| has_pi_bond(molecule, n))
            {
                Hybridization::SP2
            } else {
                hyb
            }
        })
        .collect()
}

fn has_pi_bond(molecule: &Molecule, idx: usize) -> bool {
    molecule
        .neighbors(idx)
        .any(|(_, bond)| bond.order.is_multiple())
}

fn local_environment(molecule: &Molecule, idx: usize, explicit: u8, implicit: u8) -> Hybridization {
    let atom = &molecule.atoms()[idx];
    if atom.is_hydrogen() {
        return Hybridization::S;
    }
    if atom.element.default_valences.is_empty() {
        return Hybridization::Unspecified;
    }

    let mut doubles = 0;
    let mut triple = false;
    let mut aromatic = false;
    for (_, bond) in molecule.neighbors(idx) {
        match bond.order {
            BondOrder::Double => doubles += 1,
            BondOrder::Triple => triple = true,
            BondOrder::Aromatic => aromatic = true,
            BondOrder::Single => {}
        }
    }

    let partners = molecule.degree(idx) + implicit as usize;
    if partners <= 2 && (triple || doubles >= 2) {
        return Hybridization::SP;
    }
    if partners <= 3 && (doubles == 1 || aromatic) {
        return Hybridization::SP2;
    }

    let steric = partners + lone_pairs(atom, explicit.saturating_add(implicit)) as usize;
    match steric {
        0 | 1 => Hybridization::S,
        2 => Hybridization::SP,
        3 => Hybridization::SP2,
        4 => Hybridization::SP3,
        5 => Hybridization::SP3D,
        6 => Hybridization::SP3D2,
        _ => Hybridization::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::perception::perceive;
    use nalgebra::Point3;

    fn build(atoms: &[(&str, i8)], bonds: &[(usize, usize, BondOrder)]) -> Molecule {
        let mut b = MoleculeBuilder::new("t");
        for (symbol, charge) in atoms {
            b.add_atom(symbol, Point3::origin(), *charge).unwrap();
        }
        for &(i, j, order) in bonds {
            b.add_bond(i, j, order);
        }
        b.build().unwrap()
    }

    fn hybs(mol: &Molecule) -> Vec<Hybridization> {
        perceive(mol).iter().map(|p| p.hybridization).collect()
    }

    #[test]
    fn acetaldehyde_carbonyl_is_sp2_and_methyl_sp3() {
        let mol = build(
            &[("C", 0), ("C", 0), ("O", 0)],
            &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Double)],
        );
        assert_eq!(
            hybs(&mol),
            vec![Hybridization::SP3, Hybridization::SP2, Hybridization::SP2]
        );
    }

    #[test]
    fn nitrile_is_sp() {
        let mol = build(
            &[("C", 0), ("C", 0), ("N", 0)],
            &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Triple)],
        );
        let h = hybs(&mol);
        assert_eq!(h[1], Hybridization::SP);
        assert_eq!(h[2], Hybridization::SP);
    }

    #[test]
    fn carbon_dioxide_centre_is_sp() {
        let mol = build(
            &[("O", 0), ("C", 0), ("O", 0)],
            &[(0, 1, BondOrder::Double), (1, 2, BondOrder::Double)],
        );
        assert_eq!(hybs(&mol)[1], Hybridization::SP);
    }

    #[test]
    fn sulfone_sulfur_stays_sp3() {
        // Dimethyl sulfone.
        let mol = build(
            &[("C", 0), ("S", 0), ("C", 0), ("O", 0), ("O", 0)],
            &[
                (0, 1, BondOrder::Single),
                (1, 2, BondOrder::Single),
                (1, 3, BondOrder::Double),
                (1, 4, BondOrder::Double),
            ],
        );
        assert_eq!(hybs(&mol)[1], Hybridization::SP3);
    }

    #[test]
    fn amide_nitrogen_is_promoted_by_conjugation() {
        // Acetamide: C-C(=O)-N
        let mol = build(
            &[("C", 0), ("C", 0), ("O", 0), ("N", 0)],
            &[
                (0, 1, BondOrder::Single),
                (1, 2, BondOrder::Double),
                (1, 3, BondOrder::Single),
            ],
        );
        assert_eq!(hybs(&mol)[3], Hybridization::SP2);
    }

    #[test]
    fn alcohol_oxygen_and_amine_nitrogen_stay_sp3() {
        let mol = build(
            &[("C", 0), ("O", 0), ("N", 0)],
            &[(0, 1, BondOrder::Single), (0, 2, BondOrder::Single)],
        );
        let h = hybs(&mol);
        assert_eq!(h[1], Hybridization::SP3);
        assert_eq!(h[2], Hybridization::SP3);
    }

    #[test]
    fn carbocation_is_sp2_and_hydrogen_is_s() {
        let mol = build(
            &[("C", 1), ("H", 0)],
            &[(0, 1, BondOrder::Single)],
        );
        let h = hybs(&mol);
        assert_eq!(h[0], Hybridization::SP2);
        assert_eq!(h[1], Hybridization::S);
    }

    #[test]
    fn metals_are_unspecified() {
        let mol = build(&[("Fe", 0)], &[]);
        assert_eq!(hybs(&mol), vec![Hybridization::Unspecified]);
    }

    #[test]
    fn lone_pair_counts() {
        let mol = build(&[("N", 0), ("O", 0), ("O", -1), ("C", 0)], &[]);
        let atoms = mol.atoms();
        assert_eq!(lone_pairs(&atoms[0], 3), 1);
        assert_eq!(lone_pairs(&atoms[1], 2), 2);
        assert_eq!(lone_pairs(&atoms[2], 1), 3);
        assert_eq!(lone_pairs(&atoms[3], 4), 0);
    }
}
