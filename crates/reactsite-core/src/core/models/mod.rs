//! # Core Models Module
//!
//! Data structures representing a small molecule as read from a structure file.
//!
//! ## Key Components
//!
//! - [`element`] - Static periodic-table data (covalent radii, weights, valences)
//! - [`atom`] - Individual atoms with element, formal charge and position, plus [`atom::Hybridization`]
//! - [`topology`] - Bonds and bond orders
//! - [`molecule`] - The immutable atom/bond graph with adjacency queries
//! - [`builder`] - Incremental, validating construction of a [`molecule::Molecule`]
//!
//! ## Usage
//!
//! ```
//! use reactsite::core::models::builder::MoleculeBuilder;
//! use reactsite::core::models::topology::BondOrder;
//! use nalgebra::Point3;
//!
//! let mut builder = MoleculeBuilder::new("methanol");
//! let c = builder.add_atom("C", Point3::origin(), 0).unwrap();
//! let o = builder.add_atom("O", Point3::new(1.43, 0.0, 0.0), 0).unwrap();
//! builder.add_bond(c, o, BondOrder::Single);
//! let molecule = builder.build().unwrap();
//! assert_eq!(molecule.atom_count(), 2);
//! ```

pub mod atom;
pub mod builder;
pub mod element;
pub mod molecule;
pub mod topology;
