use phf::{Map, phf_map};

/// Static periodic-table data for one element.
///
/// The covalent radius is the value the reactivity scoring uses as its
/// electronegativity proxy base, so it must stay consistent across releases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Covalent radius in Angstroms.
    pub covalent_radius: f64,
    /// Standard atomic weight in g/mol.
    pub atomic_weight: f64,
    pub outer_electrons: u8,
    /// Allowed neutral valences in ascending order; empty when the element takes no implicit hydrogens.
    pub default_valences: &'static [u8],
}

const fn el(
    atomic_number: u8,
    symbol: &'static str,
    covalent_radius: f64,
    atomic_weight: f64,
    outer_electrons: u8,
    default_valences: &'static [u8],
) -> ElementData {
    ElementData {
        atomic_number,
        symbol,
        covalent_radius,
        atomic_weight,
        outer_electrons,
        default_valences,
    }
}

static ELEMENTS: [ElementData; 54] = [
    el(1, "H", 0.23, 1.008, 1, &[1]),
    el(2, "He", 0.93, 4.003, 2, &[0]),
    el(3, "Li", 0.68, 6.941, 1, &[1]),
    el(4, "Be", 0.35, 9.012, 2, &[2]),
    el(5, "B", 0.83, 10.812, 3, &[3]),
    el(6, "C", 0.68, 12.011, 4, &[4]),
    el(7, "N", 0.68, 14.007, 5, &[3]),
    el(8, "O", 0.68, 15.999, 6, &[2]),
    el(9, "F", 0.64, 18.998, 7, &[1]),
    el(10, "Ne", 1.12, 20.180, 8, &[0]),
    el(11, "Na", 0.97, 22.990, 1, &[1]),
    el(12, "Mg", 1.10, 24.305, 2, &[2]),
    el(13, "Al", 1.35, 26.982, 3, &[3]),
    el(14, "Si", 1.20, 28.086, 4, &[4]),
    el(15, "P", 1.05, 30.974, 5, &[3, 5, 7]),
    el(16, "S", 1.02, 32.067, 6, &[2, 4, 6]),
    el(17, "Cl", 0.99, 35.453, 7, &[1]),
    el(18, "Ar", 1.57, 39.948, 8, &[0]),
    el(19, "K", 1.33, 39.098, 1, &[1]),
    el(20, "Ca", 0.99, 40.078, 2, &[2]),
    el(21, "Sc", 1.44, 44.956, 3, &[]),
    el(22, "Ti", 1.47, 47.867, 4, &[]),
    el(23, "V", 1.33, 50.942, 5, &[]),
    el(24, "Cr", 1.35, 51.996, 6, &[]),
    el(25, "Mn", 1.35, 54.938, 7, &[]),
    el(26, "Fe", 1.34, 55.845, 8, &[]),
    el(27, "Co", 1.33, 58.933, 9, &[]),
    el(28, "Ni", 1.50, 58.693, 10, &[]),
    el(29, "Cu", 1.52, 63.546, 11, &[]),
    el(30, "Zn", 1.45, 65.390, 2, &[]),
    el(31, "Ga", 1.22, 69.723, 3, &[3]),
    el(32, "Ge", 1.17, 72.610, 4, &[4]),
    el(33, "As", 1.21, 74.922, 5, &[3, 5, 7]),
    el(34, "Se", 1.22, 78.960, 6, &[2, 4, 6]),
    el(35, "Br", 1.21, 79.904, 7, &[1]),
    el(36, "Kr", 1.91, 83.800, 8, &[0]),
    el(37, "Rb", 1.47, 85.468, 1, &[1]),
    el(38, "Sr", 1.12, 87.620, 2, &[2]),
    el(39, "Y", 1.78, 88.906, 3, &[]),
    el(40, "Zr", 1.56, 91.224, 4, &[]),
    el(41, "Nb", 1.48, 92.906, 5, &[]),
    el(42, "Mo", 1.47, 95.940, 6, &[]),
    el(43, "Tc", 1.35, 98.000, 7, &[]),
    el(44, "Ru", 1.40, 101.070, 8, &[]),
    el(45, "Rh", 1.45, 102.906, 9, &[]),
    el(46, "Pd", 1.50, 106.420, 10, &[]),
    el(47, "Ag", 1.59, 107.868, 11, &[]),
    el(48, "Cd", 1.69, 112.412, 2, &[]),
    el(49, "In", 1.63, 114.818, 3, &[3]),
    el(50, "Sn", 1.46, 118.711, 4, &[2, 4]),
    el(51, "Sb", 1.46, 121.760, 5, &[3, 5, 7]),
    el(52, "Te", 1.47, 127.600, 6, &[2, 4, 6]),
    el(53, "I", 1.40, 126.904, 7, &[1, 3, 5]),
    el(54, "Xe", 1.98, 131.290, 8, &[0, 2, 4, 6]),
];

static SYMBOL_INDEX: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15,
    "S" => 16, "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22,
    "V" => 23, "Cr" => 24, "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29,
    "Zn" => 30, "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42, "Tc" => 43,
    "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48, "In" => 49, "Sn" => 50,
    "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
};

/// Looks up an element by atomic number.
pub fn by_number(atomic_number: u8) -> Option<&'static ElementData> {
    if atomic_number == 0 {
        return None;
    }
    ELEMENTS.get(atomic_number as usize - 1)
}

/// Looks up an element by symbol.
///
/// The symbol is normalized first (`"CL"`, `"cl"` and `"Cl"` all resolve to chlorine).
pub fn by_symbol(symbol: &str) -> Option<&'static ElementData> {
    let mut chars = symbol.trim().chars();
    let first = chars.next()?;
    let normalized: String = std::iter::once(first.to_ascii_uppercase())
        .chain(chars.map(|c| c.to_ascii_lowercase()))
        .collect();
    SYMBOL_INDEX
        .get(normalized.as_str())
        .and_then(|&z| by_number(z))
}
