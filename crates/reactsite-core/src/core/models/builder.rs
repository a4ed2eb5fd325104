use super::atom::Atom;
use super::element;
use super::molecule::Molecule;
use super::topology::{Bond, BondOrder};
use nalgebra::Point3;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unknown element symbol: '{0}'")]
    UnknownElement(String),
    #[error("Bond {bond} references atom {atom}, but only {atom_count} atoms exist")]
    AtomOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },
    #[error("Bond {bond} connects atom {atom} to itself")]
    SelfBond { bond: usize, atom: usize },
    #[error("Atoms {0} and {1} are bonded more than once")]
    DuplicateBond(usize, usize),
}

pub struct MoleculeBuilder {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl MoleculeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Appends an atom and returns its zero-based index.
    pub fn add_atom(
        &mut self,
        symbol: &str,
        position: Point3<f64>,
        formal_charge: i8,
    ) -> Result<usize, BuildError> {
        let data = element::by_symbol(symbol)
            .ok_or_else(|| BuildError::UnknownElement(symbol.to_string()))?;
        let index = self.atoms.len();
        let mut atom = Atom::new(index, data, position);
        atom.formal_charge = formal_charge;
        self.atoms.push(atom);
        Ok(index)
    }

    pub fn set_formal_charge(&mut self, idx: usize, charge: i8) -> &mut Self {
        if let Some(atom) = self.atoms.get_mut(idx) {
            atom.formal_charge = charge;
        }
        self
    }

    /// Records a bond between two atoms by zero-based index; validated in [`Self::build`].
    pub fn add_bond(&mut self, idx1: usize, idx2: usize, order: BondOrder) -> &mut Self {
        self.bonds.push(Bond::new(idx1, idx2, order));
        self
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn build(self) -> Result<Molecule, BuildError> {
        let atom_count = self.atoms.len();
        let mut adjacency = vec![Vec::new(); atom_count];
        let mut seen = HashSet::new();

        for (bond_idx, bond) in self.bonds.iter().enumerate() {
            for atom in [bond.atom1_idx, bond.atom2_idx] {
                if atom >= atom_count {
                    return Err(BuildError::AtomOutOfRange {
                        bond: bond_idx,
                        atom,
                        atom_count,
                    });
                }
            }
            if bond.atom1_idx == bond.atom2_idx {
                return Err(BuildError::SelfBond {
                    bond: bond_idx,
                    atom: bond.atom1_idx,
                });
            }
            let key = (
                bond.atom1_idx.min(bond.atom2_idx),
                bond.atom1_idx.max(bond.atom2_idx),
            );
            if !seen.insert(key) {
                return Err(BuildError::DuplicateBond(key.0, key.1));
            }
            adjacency[bond.atom1_idx].push((bond.atom2_idx, bond_idx));
            adjacency[bond.atom2_idx].push((bond.atom1_idx, bond_idx));
        }

        Ok(Molecule {
            name: self.name,
            atoms: self.atoms,
            bonds: self.bonds,
            adjacency,
        })
    }
}
