//! Provides input/output functionality for molecular file formats.
//!
//! Structures enter the library as MDL molfiles or SD files (V2000 connection tables).
//! The [`traits::MolecularFile`] trait gives every format the same read/write API, and
//! [`sdf`] implements it together with helpers for splitting multi-record SD files.

pub mod sdf;
pub mod traits;
