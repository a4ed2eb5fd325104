use super::record::AtomRecord;
use crate::core::descriptors::round3;
use crate::core::models::element;

/// Symbols that receive the electronegativity bonus.
const ELECTRONEGATIVE_SYMBOLS: [&str; 8] = ["O", "N", "S", "P", "F", "Cl", "Br", "I"];
const ELECTRONEGATIVE_BONUS: f64 = 0.6;
const HETEROATOM_BONUS: f64 = 0.25;
const EXCESS_BASELINE: f64 = 3.0;
const EXCESS_WEIGHT: f64 = 0.1;

/// Covalent radius of the element, plus a fixed bonus for the common electronegative
/// heteroatoms. Only meaningful for ranking.
pub fn electronegativity_proxy(record: &AtomRecord) -> f64 {
    let base = element::by_number(record.atomic_number).map_or(0.0, |e| e.covalent_radius);
    if ELECTRONEGATIVE_SYMBOLS.contains(&record.symbol) {
        base + ELECTRONEGATIVE_BONUS
    } else {
        base
    }
}

/// Heuristic site score: charge magnitude, a bonus for atoms other than H and C, and a
/// small term for any proxy excess over 3.0. Rounded to three decimals.
pub fn score(charge: f64, record: &AtomRecord) -> f64 {
    let polarity = charge.abs();
    let hetero_bonus = if matches!(record.atomic_number, 1 | 6) {
        0.0
    } else {
        HETEROATOM_BONUS
    };
    let excess = (electronegativity_proxy(record) - EXCESS_BASELINE).max(0.0);
    round3(polarity + hetero_bonus + EXCESS_WEIGHT * excess)
}

#[cfg(test)]
pub(crate) fn record(atomic_number: u8, total_valence: u8, implicit_valence: u8) -> AtomRecord {
    use crate::core::models::atom::Hybridization;
    let symbol = element::by_number(atomic_number).map_or("?", |e| e.symbol);
    AtomRecord {
        index: 0,
        atomic_number,
        symbol,
        hybridization: Hybridization::Unspecified,
        in_ring: false,
        total_valence,
        implicit_valence,
    }
}
