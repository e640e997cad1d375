//! Reference source adapters.
//!
//! - `ReferenceDataset` - listings read from the reference CSV
//! - `DefaultReferenceSource` - fixed defaults when no dataset is available

mod csv;
mod dataset;
mod defaults;

pub use self::csv::read_reference_rows;
pub use dataset::{percentile_of_sorted, ReferenceDataset};
pub use defaults::DefaultReferenceSource;

#[cfg(test)]
pub(crate) use dataset::fixtures;
