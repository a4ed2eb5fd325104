//! Partial atomic charges.
//!
//! [`ChargeAnnotator`] is the seam between the classifier and whatever assigns
//! charges; [`gasteiger::GasteigerCharger`] is the built-in implementation.

pub mod gasteiger;
pub mod params;

use crate::core::models::molecule::Molecule;
use crate::core::perception::AtomPerception;
use params::ParamLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChargeError {
    #[error("Failed to load charge parameters: {0}")]
    Params(#[from] ParamLoadError),
    #[error("Perception covers {perceived} atoms but the molecule has {atoms}")]
    PerceptionMismatch { atoms: usize, perceived: usize },
}

/// Partial charge per atom index. Atoms the annotator could not parameterize carry `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChargeAnnotation {
    charges: Vec<Option<f64>>,
}

impl ChargeAnnotation {
    pub fn new(charges: Vec<Option<f64>>) -> Self {
        Self { charges }
    }

    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            charges: values.into_iter().map(Some).collect(),
        }
    }

    /// The value as annotated, which may be missing or NaN.
    pub fn raw(&self, idx: usize) -> Option<f64> {
        self.charges.get(idx).copied().flatten()
    }

    /// The charge used for classification: missing or non-finite values read as `0.0`.
    pub fn charge_of(&self, idx: usize) -> f64 {
        match self.raw(idx) {
            Some(q) if q.is_finite() => q,
            _ => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Number of atoms carrying a finite charge.
    pub fn annotated_count(&self) -> usize {
        self.charges
            .iter()
            .filter(|q| q.is_some_and(f64::is_finite))
            .count()
    }
}

pub trait ChargeAnnotator {
    fn annotate(
        &self,
        molecule: &Molecule,
        perception: &[AtomPerception],
    ) -> Result<ChargeAnnotation, ChargeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_nan_charges_read_as_zero() {
        let ann = ChargeAnnotation::new(vec![Some(-0.42), None, Some(f64::NAN), Some(0.2)]);
        assert_eq!(ann.charge_of(0), -0.42);
        assert_eq!(ann.charge_of(1), 0.0);
        assert_eq!(ann.charge_of(2), 0.0);
        assert_eq!(ann.charge_of(3), 0.2);
        assert_eq!(ann.charge_of(99), 0.0);
        assert!(ann.raw(2).unwrap().is_nan());
        assert_eq!(ann.annotated_count(), 2);
    }

    #[test]
    fn from_values_annotates_every_atom() {
        let ann = ChargeAnnotation::from_values([0.1, -0.1]);
        assert_eq!(ann.len(), 2);
        assert_eq!(ann.annotated_count(), 2);
    }
}
