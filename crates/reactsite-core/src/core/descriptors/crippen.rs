//! Simplified Wildman-Crippen logP (J. Chem. Inf. Comput. Sci. 39, 868 (1999)).
//!
//! Atom types are collapsed to a handful of environment classes per element.
//! Elements outside the table have no defined contribution, so the estimate
//! fails rather than silently under-counting.

use super::DescriptorError;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use crate::core::perception::AtomPerception;

const H_ON_CARBON: f64 = 0.1230;
const H_ON_HETEROATOM: f64 = -0.2677;

pub fn log_p(molecule: &Molecule, perception: &[AtomPerception]) -> Result<f64, DescriptorError> {
    let mut total = 0.0;
    for (idx, atom) in molecule.atoms().iter().enumerate() {
        if atom.is_hydrogen() {
            let on_carbon = molecule
                .neighbors(idx)
                .any(|(n, _)| molecule.atoms()[n].atomic_number() == 6);
            total += if on_carbon { H_ON_CARBON } else { H_ON_HETEROATOM };
            continue;
        }
        total += heavy_contribution(molecule, perception, idx)?;

        let implicit = f64::from(perception[idx].implicit_hydrogens);
        total += implicit
            * if atom.atomic_number() == 6 {
                H_ON_CARBON
            } else {
                H_ON_HETEROATOM
            };
    }
    Ok(total)
}

fn heavy_contribution(
    molecule: &Molecule,
    perception: &[AtomPerception],
    idx: usize,
) -> Result<f64, DescriptorError> {
    let atom = &molecule.atoms()[idx];
    let orders: Vec<BondOrder> = molecule.neighbors(idx).map(|(_, b)| b.order).collect();
    let aromatic = orders.contains(&BondOrder::Aromatic);
    let double = orders.contains(&BondOrder::Double);
    let hetero_neighbor = molecule
        .neighbors(idx)
        .any(|(n, _)| !matches!(molecule.atoms()[n].atomic_number(), 1 | 6));
    let heavy_degree = molecule
        .neighbors(idx)
        .filter(|&(n, _)| !molecule.atoms()[n].is_hydrogen())
        .count();

    let value = match atom.atomic_number() {
        6 => {
            if aromatic {
                if hetero_neighbor { -0.14 } else { 0.296 }
            } else if double {
                if hetero_neighbor { -0.03 } else { 0.08 }
            } else if perception[idx].in_ring || heavy_degree <= 2 {
                0.1441
            } else if heavy_degree == 3 {
                0.0
            } else {
                -0.04
            }
        }
        7 => {
            if aromatic {
                -0.3187
            } else if atom.formal_charge > 0 {
                -1.019
            } else if double {
                -0.5262
            } else {
                -0.4458
            }
        }
        8 => {
            if atom.formal_charge < 0 {
                -1.189
            } else if double {
                -0.3339
            } else if heavy_degree >= 2 {
                -0.2893
            } else {
                -0.3567
            }
        }
        9 => 0.4118,
        15 => 0.2836,
        16 => {
            if double {
                -0.1084
            } else if atom.formal_charge != 0 {
                -0.5188
            } else {
                0.6237
            }
        }
        17 => 0.6895,
        35 => 0.8813,
        53 => 1.050,
        _ => {
            return Err(DescriptorError::UnsupportedElement {
                property: "logP",
                symbol: atom.symbol().to_string(),
            });
        }
    };
    Ok(value)
}
