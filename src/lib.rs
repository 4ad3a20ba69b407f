//! Activation Engine: deterministic generation of mascot activation ideas.
//!
//! Produces event- and venue-tailored skit/stunt ideas from template
//! catalogs via a portable seeded sequence, and blocks any candidate that
//! is too similar to something performed within the last four years.

pub mod core;
pub mod schema;
