use super::element::ElementData;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

/// Orbital hybridization state of an atom.
///
/// The textual forms (`"SP3"`, `"UNSPECIFIED"`, ...) are the ones reported in site
/// explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Hybridization {
    /// No hybridization could be assigned.
    #[default]
    Unspecified,
    S,
    SP,
    SP2,
    SP3,
    SP3D,
    SP3D2,
    Other,
}

impl Hybridization {
    /// Whether a concrete hybridization tag has been assigned.
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::S => "S",
            Self::SP => "SP",
            Self::SP2 => "SP2",
            Self::SP3 => "SP3",
            Self::SP3D => "SP3D",
            Self::SP3D2 => "SP3D2",
            Self::Other => "OTHER",
        };
        f.write_str(tag)
    }
}

impl FromStr for Hybridization {
    type Err = ();

    /// Parses a hybridization tag, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `()` if the input does not name a known hybridization state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNSPECIFIED" | "" => Ok(Self::Unspecified),
            "S" => Ok(Self::S),
            "SP" => Ok(Self::SP),
            "SP2" => Ok(Self::SP2),
            "SP3" => Ok(Self::SP3),
            "SP3D" => Ok(Self::SP3D),
            "SP3D2" => Ok(Self::SP3D2),
            "OTHER" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

/// An atom of a molecule as read from a structure file.
///
/// Only the information carried by the connection table lives here; everything derived
/// from it (valence, rings, hybridization) is computed by [`crate::core::perception`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Zero-based position of the atom in declaration order.
    pub index: usize,
    pub element: &'static ElementData,
    /// The formal charge in elementary charge units.
    pub formal_charge: i8,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a neutral atom at the given position.
    pub fn new(index: usize, element: &'static ElementData, position: Point3<f64>) -> Self {
        Self {
            index,
            element,
            formal_charge: 0,
            position,
        }
    }

    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number
    }

    pub fn symbol(&self) -> &'static str {
        self.element.symbol
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.atomic_number == 1
    }
}
