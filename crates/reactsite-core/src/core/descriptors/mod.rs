//! Whole-molecule descriptors reported beside the site classification.
//!
//! Every property is computed independently and returns its own `Result`;
//! [`compute_properties`] keeps the ones that succeed and drops the rest.

pub mod composition;
pub mod crippen;
pub mod hbond;
pub mod tpsa;

use crate::core::models::molecule::Molecule;
use crate::core::perception::AtomPerception;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Molecule has no atoms")]
    EmptyMolecule,
    #[error("No {property} contribution is defined for element {symbol}")]
    UnsupportedElement {
        property: &'static str,
        symbol: String,
    },
    #[error("Perception does not match the molecule")]
    PerceptionMismatch,
}

/// Descriptor values as reported to callers. Absent fields were not computable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MolecularProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpsa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_bond_donors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_bond_acceptors: Option<usize>,
}

impl MolecularProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Computes every descriptor, omitting (and logging) those that fail.
pub fn compute_properties(molecule: &Molecule, perception: &[AtomPerception]) -> MolecularProperties {
    if perception.len() != molecule.atom_count() {
        warn!(error = %DescriptorError::PerceptionMismatch, "Skipping all descriptors");
        return MolecularProperties::default();
    }
    MolecularProperties {
        formula: settle("formula", composition::formula(molecule, perception)),
        molecular_weight: settle(
            "molecularWeight",
            composition::molecular_weight(molecule, perception).map(round3),
        ),
        log_p: settle("logP", crippen::log_p(molecule, perception).map(round3)),
        tpsa: settle("tpsa", tpsa::tpsa(molecule, perception).map(round3)),
        h_bond_donors: settle("hBondDonors", hbond::donors(molecule, perception)),
        h_bond_acceptors: settle("hBondAcceptors", hbond::acceptors(molecule)),
    }
}

fn settle<T>(property: &str, result: Result<T, DescriptorError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(property, error = %e, "Descriptor could not be computed; omitting it");
            None
        }
    }
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Hydrogens on an atom: implicit ones plus explicit hydrogen neighbours.
pub(crate) fn attached_hydrogens(molecule: &Molecule, perception: &[AtomPerception], idx: usize) -> usize {
    let explicit = molecule
        .neighbors(idx)
        .filter(|&(n, _)| molecule.atoms()[n].is_hydrogen())
        .count();
    explicit + perception[idx].implicit_hydrogens as usize
}
