//! Report output module.
//!
//! This module turns a [`ValidationReport`](crate::types::ValidationReport)
//! into its two presentation forms:
//! - A human-readable text summary ([`ReportAssembler`])
//! - A JSON file next to the cleaned table ([`ReportWriter`])
//!
//! # Example
//!
//! ```rust,ignore
//! use refine_processing::reporting::{ReportAssembler, ReportEnvelope, ReportWriter};
//!
//! println!("{}", ReportAssembler.render(&report));
//!
//! let writer = ReportWriter::new("output");
//! writer.write_json(&ReportEnvelope::new("data/people.csv", report), "people")?;
//! ```

mod assembler;
mod writer;

pub use assembler::{NO_INTERPOLATION_LINE, ReportAssembler};
pub use writer::{ReportEnvelope, ReportWriter};
