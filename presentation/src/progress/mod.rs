//! Progress reporters implementing the orchestration progress port

pub mod reporter;
