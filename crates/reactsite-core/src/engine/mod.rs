//! # Engine Module
//!
//! The reactivity classifier and everything it needs to run: the per-atom input
//! snapshot, the scoring function, the ordered classification rules, the ranked
//! output and the advisory policy.
//!
//! ## Architecture
//!
//! - **Inputs** ([`record`]) - Read-only [`record::AtomRecord`] snapshots built from a
//!   perceived molecule
//! - **Scoring** ([`scoring`]) - Electronegativity proxy and the heuristic site score
//! - **Rules** ([`rules`]) - First-match-wins classification into site roles
//! - **Outputs** ([`site`]) - Site entries, the ranked classification and its warnings
//! - **Classifier** ([`classifier`]) - The pure function tying the above together
//! - **Configuration** ([`config`]) - Analysis settings and their validating builder
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - The fatal failures an analysis can surface
//!
//! The classifier is pure and synchronous: it holds no state between calls and
//! depends only on the records and charges it is given.

pub mod classifier;
pub mod config;
pub mod error;
pub mod progress;
pub mod record;
pub mod rules;
pub mod scoring;
pub mod site;
