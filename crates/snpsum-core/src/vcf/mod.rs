//! VCF variant file parsing.
//!
//! A single forward scan turns each data line into a [`VariantRecord`],
//! the tabular form the joiner works on.

mod parser;
mod types;

pub use parser::VcfScanner;
pub use types::{InfoValue, VariantRecord};
