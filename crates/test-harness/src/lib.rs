//! Test harness for scripting and verifying frame builds.
//!
//! Provides programmatic tools for building frames end to end, checking
//! them at every step, and generating diagnostic output.
//!
//! # Key Components
//!
//! - [`FrameBuilder`]: Fluent API for building and verifying frames
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Structured text frame descriptions
//! - [`helpers`]: Error type, sample configurations, profile outlines
//! - [`assertions`]: Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::FrameReport;
pub use workflow::FrameBuilder;
