//! Tag generation for notes.
//!
//! Tags come from three fixed rule sets (area candidates, a keyword table
//! and a few vocabulary patterns, see [`rules`]) and are cleaned up by
//! [`TagNormalizer`] so generated and operator-edited tags share one format.

mod generator;
mod normalizer;
pub mod rules;

pub use generator::{DEFAULT_MAX_TAGS, TagGenerator};
pub use normalizer::TagNormalizer;
