//! # Reactsite Core Library
//!
//! A library for ranking the nucleophilic and electrophilic reactive sites of small
//! molecules from their 3D structure, with whole-molecule descriptors reported alongside.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep the pure
//! classification logic separate from the stateful structure handling around it.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Atom`), the
//!   element table, molfile I/O, structure perception (valence, rings, hybridization),
//!   conformer embedding, Gasteiger partial charges and molecular descriptors.
//!
//! - **[`engine`]: The Logic Core.** The reactivity classifier: the per-atom scoring
//!   function, the ordered classification rules, ranking of the resulting sites and the
//!   advisory policy, together with its configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into complete
//!   request/response analyses of a single molecule or of a whole multi-record SDF file.

pub mod core;
pub mod engine;
pub mod workflows;
