//! Application-level configuration.
//!
//! [`OrchestrationParams`] covers the history window, fan-out width and tool
//! loop limits.

pub mod orchestration_params;

pub use orchestration_params::OrchestrationParams;
