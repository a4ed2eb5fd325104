//! # Core Module
//!
//! This module provides the structural building blocks the reactivity classifier is
//! fed from: the molecular models, file I/O and every per-atom or per-molecule property
//! derived from the connection table.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, molecules and the element table
//! - **File I/O** ([`io`]) - Reading and writing MDL molfile / SDF records
//! - **Perception** ([`perception`]) - Valence, implicit hydrogens, ring membership and hybridization
//! - **Partial Charges** ([`charges`]) - Gasteiger-Marsili electronegativity equalization
//! - **Geometry** ([`geometry`]) - Conformer detection and embedding from topology
//! - **Descriptors** ([`descriptors`]) - Best-effort whole-molecule scalar properties
//!
//! Everything in this layer is a pure function of its inputs; no state is kept between
//! molecules.

pub mod charges;
pub mod descriptors;
pub mod geometry;
pub mod io;
pub mod models;
pub mod perception;
