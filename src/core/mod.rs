//! Line items, VAT decomposition, VAT groups and document totals.
//!
//! This module provides the MwSt engine: per-position net/VAT derivation,
//! grouping by rate with a bucket for legacy positions, and the two-stage
//! rounded document totals.

mod aggregate;
mod builder;
mod document;
mod error;
mod resolver;
mod types;
mod validation;

pub use aggregate::*;
pub use builder::*;
pub use error::*;
pub use resolver::*;
pub use types::*;
pub use validation::*;
