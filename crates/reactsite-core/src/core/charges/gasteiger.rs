use super::params::{GasteigerParams, ParamTable};
use super::{ChargeAnnotation, ChargeAnnotator, ChargeError};
use crate::core::models::atom::Hybridization;
use crate::core::models::molecule::Molecule;
use crate::core::perception::AtomPerception;
use tracing::{debug, trace};

pub const DEFAULT_ITERATIONS: usize = 12;

const INITIAL_DAMPING: f64 = 0.5;
// Hydrogen's cation electronegativity does not follow from its polynomial.
const HYDROGEN_CATION_ELECTRONEGATIVITY: f64 = 20.02;

/// Gasteiger-Marsili partial equalization of orbital electronegativity.
///
/// Implicit hydrogens take part as virtual atoms so heavy-atom charges match
/// those of the fully hydrogenated structure; only the real atoms are reported.
/// Atoms without tabulated parameters are excluded from charge flow and left
/// unannotated.
#[derive(Debug, Clone)]
pub struct GasteigerCharger {
    params: ParamTable,
    iterations: usize,
}

impl Default for GasteigerCharger {
    fn default() -> Self {
        Self::new(ParamTable::builtin(), DEFAULT_ITERATIONS)
    }
}

struct Node {
    params: Option<GasteigerParams>,
    cation_chi: f64,
    neighbors: Vec<usize>,
}

impl GasteigerCharger {
    pub fn new(params: ParamTable, iterations: usize) -> Self {
        Self { params, iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn build_graph(&self, molecule: &Molecule, perception: &[AtomPerception]) -> (Vec<Node>, Vec<f64>) {
        let mut nodes: Vec<Node> = molecule
            .atoms()
            .iter()
            .zip(perception)
            .map(|(atom, p)| {
                let params = self.params.lookup(atom.atomic_number(), p.hybridization);
                Node {
                    params,
                    cation_chi: cation_chi(atom.atomic_number(), params),
                    neighbors: molecule.neighbors(atom.index).map(|(n, _)| n).collect(),
                }
            })
            .collect();
        let mut charges: Vec<f64> = molecule
            .atoms()
            .iter()
            .map(|a| f64::from(a.formal_charge))
            .collect();

        let hydrogen = self.params.lookup(1, Hybridization::S);
        for (parent, p) in perception.iter().enumerate() {
            for _ in 0..p.implicit_hydrogens {
                let idx = nodes.len();
                nodes.push(Node {
                    params: hydrogen,
                    cation_chi: cation_chi(1, hydrogen),
                    neighbors: vec![parent],
                });
                nodes[parent].neighbors.push(idx);
                charges.push(0.0);
            }
        }
        (nodes, charges)
    }
}

fn cation_chi(atomic_number: u8, params: Option<GasteigerParams>) -> f64 {
    match (atomic_number, params) {
        (1, Some(_)) => HYDROGEN_CATION_ELECTRONEGATIVITY,
        (_, Some(p)) => p.cation_electronegativity(),
        (_, None) => 0.0,
    }
}

impl ChargeAnnotator for GasteigerCharger {
    fn annotate(
        &self,
        molecule: &Molecule,
        perception: &[AtomPerception],
    ) -> Result<ChargeAnnotation, ChargeError> {
        if perception.len() != molecule.atom_count() {
            return Err(ChargeError::PerceptionMismatch {
                atoms: molecule.atom_count(),
                perceived: perception.len(),
            });
        }

        let (nodes, mut charges) = self.build_graph(molecule, perception);
        let mut damping = INITIAL_DAMPING;

        for iteration in 0..self.iterations {
            let chi: Vec<Option<f64>> = nodes
                .iter()
                .zip(&charges)
                .map(|(node, &q)| node.params.map(|p| p.electronegativity(q)))
                .collect();

            for (i, node) in nodes.iter().enumerate() {
                let Some(chi_i) = chi[i] else { continue };
                let mut dq = 0.0;
                for &j in &node.neighbors {
                    let Some(chi_j) = chi[j] else { continue };
                    let dx = chi_j - chi_i;
                    // Normalize by the cation of whichever atom donates electrons.
                    let denominator = if dx < 0.0 {
                        nodes[j].cation_chi
                    } else {
                        node.cation_chi
                    };
                    if denominator.abs() > f64::EPSILON {
                        dq += dx / denominator;
                    }
                }
                charges[i] += damping * dq;
            }
            trace!(iteration, damping, "Gasteiger iteration complete");
            damping *= INITIAL_DAMPING;
        }

        let annotation = ChargeAnnotation::new(
            nodes
                .iter()
                .zip(&charges)
                .take(molecule.atom_count())
                .map(|(node, &q)| node.params.map(|_| q))
                .collect(),
        );
        debug!(
            atoms = molecule.atom_count(),
            virtual_hydrogens = nodes.len() - molecule.atom_count(),
            annotated = annotation.annotated_count(),
            "Computed Gasteiger charges"
        );
        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::models::topology::BondOrder;
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

    fn charges_of(mol: &Molecule) -> ChargeAnnotation {
        GasteigerCharger::default()
            .annotate(mol, &perceive(mol))
            .unwrap()
    }

    #[test]
    fn ethanol_oxygen_is_negative_and_carbinol_carbon_positive() {
        let mol = build(
            &[("C", 0), ("C", 0), ("O", 0)],
            &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Single)],
        );
        let ann = charges_of(&mol);
        assert!(ann.charge_of(2) < -0.3, "O = {}", ann.charge_of(2));
        assert!(ann.charge_of(1) > 0.0, "C1 = {}", ann.charge_of(1));
        assert_eq!(ann.annotated_count(), 3);
    }

    #[test]
    fn methane_carbon_is_slightly_negative() {
        let mol = build(&[("C", 0)], &[]);
        let q = charges_of(&mol).charge_of(0);
        assert!(q < 0.0 && q > -0.15, "C = {q}");
    }

    #[test]
    fn isolated_atom_without_hydrogens_keeps_formal_charge() {
        let mol = build(&[("Cl", -1)], &[]);
        assert_eq!(charges_of(&mol).charge_of(0), -1.0);
    }

    #[test]
    fn formaldehyde_carbonyl_is_polarised() {
        let mol = build(&[("C", 0), ("O", 0)], &[(0, 1, BondOrder::Double)]);
        let ann = charges_of(&mol);
        assert!(ann.charge_of(0) > 0.0);
        assert!(ann.charge_of(1) < -0.2);
    }

    #[test]
    fn nitrogen_draws_charge_from_carbon() {
        let mol = build(
            &[("C", 0), ("N", 0)],
            &[(0, 1, BondOrder::Single)],
        );
        let ann = charges_of(&mol);
        assert!(ann.charge_of(1) < ann.charge_of(0));
    }

    #[test]
    fn unparameterised_atoms_are_left_unannotated() {
        let mol = build(
            &[("Fe", 0), ("C", 0)],
            &[(0, 1, BondOrder::Single)],
        );
        let ann = charges_of(&mol);
        assert_eq!(ann.raw(0), None);
        assert_eq!(ann.charge_of(0), 0.0);
        assert!(ann.raw(1).is_some());
    }

    #[test]
    fn zero_iterations_return_formal_charges() {
        let mol = build(
            &[("N", 1), ("C", 0)],
            &[(0, 1, BondOrder::Single)],
        );
        let charger = GasteigerCharger::new(ParamTable::builtin(), 0);
        let ann = charger.annotate(&mol, &perceive(&mol)).unwrap();
        assert_eq!(ann.charge_of(0), 1.0);
        assert_eq!(ann.charge_of(1), 0.0);
    }

    #[test]
    fn mismatched_perception_is_rejected() {
        let mol = build(&[("C", 0), ("O", 0)], &[(0, 1, BondOrder::Single)]);
        let err = GasteigerCharger::default()
            .annotate(&mol, &perceive(&mol)[..1])
            .unwrap_err();
        assert!(matches!(
            err,
            ChargeError::PerceptionMismatch { atoms: 2, perceived: 1 }
        ));
    }
}
