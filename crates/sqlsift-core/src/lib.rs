#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the sqlsift crates.
//!
//! Two layers:
//! - **Document layer**: immutable source text with a line index for
//!   offset <-> line/column mapping
//! - **Record layer**: the serialized shape of a discovered query literal

mod document;
mod record;


pub use document::{LineCol, SourceDocument};
pub use record::CandidateRecord;
