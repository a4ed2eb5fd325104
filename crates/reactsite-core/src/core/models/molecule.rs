use super::atom::Atom;
use super::topology::Bond;
use nalgebra::Point3;

/// A small molecule: atoms in declaration order plus the bonds between them.
///
/// The atom/bond graph is immutable once built (see [`super::builder::MoleculeBuilder`]);
/// only atom positions may be replaced, which is how conformer embedding installs
/// generated coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    pub(crate) name: String,
    pub(crate) atoms: Vec<Atom>,
    pub(crate) bonds: Vec<Bond>,
    // adjacency[atom_idx] = [(neighbor_idx, bond_idx)]
    pub(crate) adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom(&self, idx: usize) -> Option<&Atom> {
        self.atoms.get(idx)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Neighbours of an atom together with the bond leading to each of them.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, &Bond)> + '_ {
        self.adjacency
            .get(idx)
            .into_iter()
            .flatten()
            .map(move |&(n, b)| (n, &self.bonds[b]))
    }

    /// Number of explicit bonds on an atom.
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency.get(idx).map_or(0, Vec::len)
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.neighbors(a).find(|&(n, _)| n == b).map(|(_, bond)| bond)
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Replaces every atom position at once.
    ///
    /// # Panics
    ///
    /// Panics if `positions` does not hold exactly one point per atom.
    pub fn set_positions(&mut self, positions: &[Point3<f64>]) {
        assert_eq!(
            positions.len(),
            self.atoms.len(),
            "one position per atom is required"
        );
        for (atom, &p) in self.atoms.iter_mut().zip(positions) {
            atom.position = p;
        }
    }
}
