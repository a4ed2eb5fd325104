use crate::core::models::molecule::Molecule;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{trace, warn};

const TETRAHEDRAL_COS: f64 = -1.0 / 3.0;
const BOND_STIFFNESS: f64 = 1.0;
const ANGLE_STIFFNESS: f64 = 0.5;
const REPULSION_STIFFNESS: f64 = 0.2;
const REPULSION_RANGE: f64 = 2.5;
// Fraction of the per-atom Newton step taken each iteration.
const STEP_DAMPING: f64 = 0.5;
const MAX_DISPLACEMENT: f64 = 0.3;

#[derive(Debug, Error, PartialEq)]
pub enum EmbedError {
    #[error("Cannot embed a molecule without atoms")]
    EmptyMolecule,
    #[error("Embedding produced non-finite coordinates for atom {0}")]
    NonFinite(usize),
}

/// Settings for generating coordinates from topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConformerConfig {
    /// Seed for the random starting coordinates; equal seeds give equal conformers.
    pub seed: u64,
    pub max_iterations: usize,
    /// Largest per-atom displacement (Angstroms) at which relaxation stops.
    pub tolerance: f64,
}

impl Default for ConformerConfig {
    fn default() -> Self {
        Self {
            seed: 0xf00d,
            max_iterations: 2000,
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedReport {
    pub iterations: usize,
    pub converged: bool,
    /// Largest atom displacement in the final iteration.
    pub final_displacement: f64,
}

struct Restraint {
    i: usize,
    j: usize,
    target: f64,
    stiffness: f64,
}

fn distance_restraints(molecule: &Molecule) -> (Vec<Restraint>, HashSet<(usize, usize)>) {
    let radius = |idx: usize| molecule.atoms()[idx].element.covalent_radius;
    let mut restraints = Vec::new();
    let mut restrained = HashSet::new();

    for bond in molecule.bonds() {
        let (i, j) = (bond.atom1_idx, bond.atom2_idx);
        restraints.push(Restraint {
            i,
            j,
            target: radius(i) + radius(j),
            stiffness: BOND_STIFFNESS,
        });
        restrained.insert((i.min(j), i.max(j)));
    }

    for center in 0..molecule.atom_count() {
        let arms: Vec<usize> = molecule.neighbors(center).map(|(n, _)| n).collect();
        for (a, &i) in arms.iter().enumerate() {
            for &k in &arms[a + 1..] {
                let key = (i.min(k), i.max(k));
                if !restrained.insert(key) {
                    continue;
                }
                let (d1, d2) = (radius(i) + radius(center), radius(k) + radius(center));
                let target = (d1 * d1 + d2 * d2 - 2.0 * d1 * d2 * TETRAHEDRAL_COS).sqrt();
                restraints.push(Restraint {
                    i,
                    j: k,
                    target,
                    stiffness: ANGLE_STIFFNESS,
                });
            }
        }
    }
    (restraints, restrained)
}

/// Generates coordinates from the bond graph and installs them on `molecule`.
///
/// Atoms start at seeded random positions and relax by steepest descent on
/// harmonic restraints: bonded pairs toward the sum of their covalent radii,
/// atoms sharing a neighbour toward the tetrahedral 1-3 distance, and every
/// other pair pushed apart when closer than a soft contact range. The result
/// is centred on the origin.
pub fn embed(molecule: &mut Molecule, config: &ConformerConfig) -> Result<EmbedReport, EmbedError> {
    let n = molecule.atom_count();
    if n == 0 {
        return Err(EmbedError::EmptyMolecule);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let half_width = 1.0 + (n as f64).cbrt();
    let mut positions: Vec<Point3<f64>> = (0..n)
        .map(|_| {
            Point3::new(
                rng.gen_range(-half_width..half_width),
                rng.gen_range(-half_width..half_width),
                rng.gen_range(-half_width..half_width),
            )
        })
        .collect();

    let (restraints, restrained) = distance_restraints(molecule);
    let mut report = EmbedReport {
        iterations: 0,
        converged: n == 1,
        final_displacement: 0.0,
    };

    while !report.converged && report.iterations < config.max_iterations {
        let mut forces = vec![Vector3::zeros(); n];
        let mut load = vec![0.0; n];

        for r in &restraints {
            apply_spring(&positions, &mut forces, r.i, r.j, r.target, r.stiffness, &mut rng);
            load[r.i] += r.stiffness;
            load[r.j] += r.stiffness;
        }
        for i in 0..n {
            for j in i + 1..n {
                if restrained.contains(&(i, j)) {
                    continue;
                }
                let d = (positions[j] - positions[i]).norm();
                if d < REPULSION_RANGE {
                    apply_spring(&positions, &mut forces, i, j, REPULSION_RANGE, REPULSION_STIFFNESS, &mut rng);
                    load[i] += REPULSION_STIFFNESS;
                    load[j] += REPULSION_STIFFNESS;
                }
            }
        }

        let mut largest: f64 = 0.0;
        for ((pos, force), &k) in positions.iter_mut().zip(&forces).zip(&load) {
            if k <= 0.0 {
                continue;
            }
            let mut step = force * (STEP_DAMPING / k);
            let length = step.norm();
            if length > MAX_DISPLACEMENT {
                step *= MAX_DISPLACEMENT / length;
            }
            *pos += step;
            largest = largest.max(step.norm());
        }

        report.iterations += 1;
        report.final_displacement = largest;
        report.converged = largest < config.tolerance;
        trace!(iteration = report.iterations, displacement = largest, "Relaxation step");
    }

    if !report.converged {
        warn!(
            iterations = report.iterations,
            displacement = report.final_displacement,
            "Conformer relaxation stopped before converging"
        );
    }

    let centroid = positions.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n as f64;
    for (idx, pos) in positions.iter_mut().enumerate() {
        *pos -= centroid;
        if !pos.coords.iter().all(|c| c.is_finite()) {
            return Err(EmbedError::NonFinite(idx));
        }
    }
    molecule.set_positions(&positions);
    Ok(report)
}

// Pulls (or pushes) atoms i and j toward `target` separation.
fn apply_spring(
    positions: &[Point3<f64>],
    forces: &mut [Vector3<f64>],
    i: usize,
    j: usize,
    target: f64,
    stiffness: f64,
    rng: &mut StdRng,
) {
    let mut delta = positions[j] - positions[i];
    let mut d = delta.norm();
    if d < 1e-8 {
        // Coincident atoms have no separation direction; pick one at random.
        delta = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        d = delta.norm().max(1e-8);
    }
    let f = delta * (stiffness * (d - target) / d);
    forces[i] += f;
    forces[j] -= f;
}
