//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation models a node can be invoked with
//! - [`node::NodeId`]: the fixed set of node identities
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod node;
pub mod string;
