//! Orchestration domain
//!
//! Records produced by each node, supporting-node selection, and the
//! deterministic aggregation of a request's outputs.

pub mod aggregate;
pub mod entities;
pub mod selection;
pub mod value_objects;
