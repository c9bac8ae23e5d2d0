//! Result aggregation modules
//!
//! - Storage size estimates
//! - Comparison result types

pub mod result;
pub mod size;
