//! Three-dimensional coordinates for molecules read without them.

pub mod embed;

use crate::core::models::molecule::Molecule;
use embed::{ConformerConfig, EmbedError, EmbedReport};
use tracing::{debug, info};

/// Whether the molecule carries usable 3D coordinates.
///
/// Connection tables written without geometry place every atom at the origin;
/// a lone atom at the origin is still a valid conformer.
pub fn has_conformer(molecule: &Molecule) -> bool {
    if molecule.atom_count() <= 1 {
        return !molecule.is_empty();
    }
    molecule
        .atoms()
        .iter()
        .any(|a| a.position.coords.norm_squared() > 0.0)
}

/// Embeds coordinates when the molecule has none.
///
/// Returns the embedding report when coordinates were generated, `None` when the
/// existing conformer was kept.
pub fn ensure_conformer(
    molecule: &mut Molecule,
    config: &ConformerConfig,
) -> Result<Option<EmbedReport>, EmbedError> {
    if has_conformer(molecule) {
        debug!("Molecule already has 3D coordinates");
        return Ok(None);
    }
    let report = embed::embed(molecule, config)?;
    info!(
        iterations = report.iterations,
        converged = report.converged,
        "Generated 3D conformer from topology"
    );
    Ok(Some(report))
}
