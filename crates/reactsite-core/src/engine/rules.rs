use super::record::AtomRecord;
use super::site::SiteType;

/// Charge magnitude beyond which an atom counts as strongly polarised.
pub const DEFAULT_POLARITY_THRESHOLD: f64 = 0.15;

/// The classification rule an atom matched, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteRule {
    /// Charge below the negative threshold.
    NucleophilicCentre,
    /// Charge above the positive threshold.
    ElectrophilicCentre,
    /// N, O or S with at most one bond beyond its hydrogens.
    LonePairDonor,
    /// B, Al or P carrying no negative charge.
    LewisAcid,
    Unclassified,
}

impl SiteRule {
    /// Returns the first rule that applies to an atom with the given charge.
    pub fn match_atom(record: &AtomRecord, charge: f64, polarity_threshold: f64) -> Self {
        match record.atomic_number {
            _ if charge < -polarity_threshold => Self::NucleophilicCentre,
            _ if charge > polarity_threshold => Self::ElectrophilicCentre,
            7 | 8 | 16 if record.total_valence <= record.implicit_valence.saturating_add(1) => {
                Self::LonePairDonor
            }
            5 | 13 | 15 if charge >= 0.0 => Self::LewisAcid,
            _ => Self::Unclassified,
        }
    }

    pub fn site_type(self) -> SiteType {
        match self {
            Self::NucleophilicCentre | Self::LonePairDonor => SiteType::Nucleophile,
            Self::ElectrophilicCentre | Self::LewisAcid => SiteType::Electrophile,
            Self::Unclassified => SiteType::Other,
        }
    }

    /// Label reported for the site; empty for unclassified atoms.
    pub fn label(self) -> &'static str {
        match self {
            Self::NucleophilicCentre => "Nucleophilic centre",
            Self::ElectrophilicCentre => "Electrophilic centre",
            Self::LonePairDonor => "Potential lone pair donor",
            Self::LewisAcid => "Lewis acidic centre",
            Self::Unclassified => "",
        }
    }

    /// Short role name that opens the site's reason string.
    pub fn role(self) -> &'static str {
        match self {
            Self::NucleophilicCentre => "Nucleophile",
            Self::ElectrophilicCentre => "Electrophile",
            Self::LonePairDonor => "Lone pair donor",
            Self::LewisAcid => "Lewis acid",
            Self::Unclassified => "Site",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::record;

    fn rule(z: u8, total: u8, implicit: u8, charge: f64) -> SiteRule {
        SiteRule::match_atom(&record(z, total, implicit), charge, DEFAULT_POLARITY_THRESHOLD)
    }

    #[test]
    fn charge_rules_take_precedence_over_element_rules() {
        assert_eq!(rule(8, 2, 1, -0.42), SiteRule::NucleophilicCentre);
        assert_eq!(rule(15, 3, 0, 0.3), SiteRule::ElectrophilicCentre);
        assert_eq!(rule(6, 4, 0, -0.2), SiteRule::NucleophilicCentre);
        assert_eq!(rule(6, 4, 0, 0.2), SiteRule::ElectrophilicCentre);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(rule(6, 4, 0, -0.15), SiteRule::Unclassified);
        assert_eq!(rule(6, 4, 0, 0.15), SiteRule::Unclassified);
    }

    #[test]
    fn lone_pair_donor_needs_few_heavy_bonds() {
        // Water-like O: total 2, implicit 2.
        assert_eq!(rule(8, 2, 2, -0.1), SiteRule::LonePairDonor);
        // Hydroxyl O: total 2, implicit 1.
        assert_eq!(rule(8, 2, 1, 0.0), SiteRule::LonePairDonor);
        // Ether O: total 2, implicit 0.
        assert_eq!(rule(8, 2, 0, -0.1), SiteRule::Unclassified);
        // Primary amine N: total 3, implicit 2.
        assert_eq!(rule(7, 3, 2, 0.0), SiteRule::LonePairDonor);
        assert_eq!(rule(16, 2, 1, 0.05), SiteRule::LonePairDonor);
    }

    #[test]
    fn lewis_acid_requires_non_negative_charge() {
        assert_eq!(rule(15, 3, 0, 0.0), SiteRule::LewisAcid);
        assert_eq!(rule(5, 3, 0, 0.1), SiteRule::LewisAcid);
        assert_eq!(rule(13, 3, 0, -0.01), SiteRule::Unclassified);
    }

    #[test]
    fn types_labels_and_roles() {
        assert_eq!(SiteRule::LonePairDonor.site_type(), SiteType::Nucleophile);
        assert_eq!(SiteRule::LewisAcid.site_type(), SiteType::Electrophile);
        assert_eq!(SiteRule::Unclassified.site_type(), SiteType::Other);
        assert_eq!(SiteRule::Unclassified.label(), "");
        assert_eq!(SiteRule::Unclassified.role(), "Site");
        assert_eq!(SiteRule::LewisAcid.label(), "Lewis acidic centre");
    }
}
