use super::DescriptorError;
use crate::core::models::element;
use crate::core::models::molecule::Molecule;
use crate::core::perception::AtomPerception;
use std::collections::BTreeMap;

/// Molecular formula in Hill order, implicit hydrogens included, with a net-charge suffix.
pub fn formula(molecule: &Molecule, perception: &[AtomPerception]) -> Result<String, DescriptorError> {
    if molecule.is_empty() {
        return Err(DescriptorError::EmptyMolecule);
    }
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (atom, p) in molecule.atoms().iter().zip(perception) {
        *counts.entry(atom.symbol()).or_insert(0) += 1;
        if p.implicit_hydrogens > 0 {
            *counts.entry("H").or_insert(0) += p.implicit_hydrogens as usize;
        }
    }

    let mut out = String::new();
    let mut push = |symbol: &str, count: usize| {
        out.push_str(symbol);
        if count > 1 {
            out.push_str(&count.to_string());
        }
    };
    if let Some(c) = counts.remove("C") {
        push("C", c);
        if let Some(h) = counts.remove("H") {
            push("H", h);
        }
    }
    for (symbol, count) in counts {
        push(symbol, count);
    }

    let net: i32 = molecule.atoms().iter().map(|a| i32::from(a.formal_charge)).sum();
    match net {
        0 => {}
        1 => out.push('+'),
        -1 => out.push('-'),
        n if n > 0 => out.push_str(&format!("+{n}")),
        n => out.push_str(&n.to_string()),
    }
    Ok(out)
}

/// Average molecular weight in g/mol, implicit hydrogens included.
pub fn molecular_weight(molecule: &Molecule, perception: &[AtomPerception]) -> Result<f64, DescriptorError> {
    if molecule.is_empty() {
        return Err(DescriptorError::EmptyMolecule);
    }
    let hydrogen = element::by_number(1).map_or(1.008, |h| h.atomic_weight);
    Ok(molecule
        .atoms()
        .iter()
        .zip(perception)
        .map(|(atom, p)| atom.element.atomic_weight + f64::from(p.implicit_hydrogens) * hydrogen)
        .sum())
}
