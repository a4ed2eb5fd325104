#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
}

impl BondOrder {
    /// Contribution of this bond to the valence of each of its atoms.
    pub fn valence_contribution(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::Aromatic => 1.5,
        }
    }

    /// Maps an MDL connection-table bond type to a bond order.
    pub fn from_ctfile(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Aromatic),
            _ => None,
        }
    }

    pub fn is_multiple(self) -> bool {
        !matches!(self, Self::Single)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_idx: usize,
    pub atom2_idx: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1_idx: usize, atom2_idx: usize, order: BondOrder) -> Self {
        Self {
            atom1_idx,
            atom2_idx,
            order,
        }
    }
}
