//! Prompt domain
//!
//! Instructions and user-content templates for every node invocation.

mod template;

pub use template::NodePromptTemplate;
