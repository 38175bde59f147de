//! Filtering pipeline over flattened reflection-axis collections.
//!
//! - [`prune_by_threshold`] drops weak axes and, when the primary axis of a
//!   sibling group is weak, the whole group found inside that sub-image.
//! - [`deduplicate_axes`] removes the weaker of two axes with similar slope
//!   and nearby endpoints.
//!
//! Both operate on the depth-first order produced by
//! [`decompose`](crate::decompose::decompose) and track removals with a
//! keep-mask indexed by position, never by value.

mod dedup;
mod prune;

pub use dedup::{deduplicate_axes, AxisSimilarity};
pub use prune::{prune_by_threshold, ScoreThresholds};
