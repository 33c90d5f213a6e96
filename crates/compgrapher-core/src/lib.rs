//! Dataset preparation for compensation comparisons.
//!
//! [`prepare_dataset`] is the entry point: it reads a table, pairs high and
//! low rows into positions, applies position selection, validates, and
//! aggregates. The result is an immutable [`PreparedDataset`].
//!
//! [`PreparedDataset`]: compgrapher_model::PreparedDataset

pub mod aggregate;
pub mod assemble;
pub mod error;
pub mod pipeline;
pub mod select;

pub use aggregate::{aggregate_position, aggregate_positions};
pub use assemble::{Assembly, RowPair, assemble_positions, pair_rows};
pub use error::{CoreError, InsufficientData, Result};
pub use pipeline::{prepare_dataset, prepare_extracted};
pub use select::{Selection, pay_level, select_positions};
