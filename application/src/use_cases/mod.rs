//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod audit;
pub mod invoke_node;
pub mod leader;
pub mod run_orchestration;
pub mod run_session_turn;
pub mod supporting;

#[cfg(test)]
pub(crate) mod test_support;
