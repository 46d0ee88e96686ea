//! Pipeline module.
//!
//! This module provides the refinement pipeline, the missing value
//! coordinator it drives, and progress reporting.

mod builder;
mod coordinator;
pub mod progress;

pub use builder::{RefineOutcome, Refiner, RefinerBuilder};
pub use coordinator::MissingValueCoordinator;
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, RefineStage};
