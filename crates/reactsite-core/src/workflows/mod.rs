//! # Workflows Module
//!
//! End-to-end entry points: structure in, ranked reactive sites and descriptors out.
//!
//! - **Single analysis** ([`analyze`]) - One molfile record plus caller metadata through
//!   parsing, conformer preparation, charges, classification and descriptors
//! - **Batch analysis** ([`batch`]) - Every record of a multi-record SDF file, analysed
//!   independently and in parallel
//! - **Reports** ([`report`]) - The response records returned to callers and their
//!   JSON and CSV renderings

pub mod analyze;
pub mod batch;
pub mod report;
