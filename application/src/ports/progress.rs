//! Progress notification port
//!
//! Defines the interface for reporting progress during an orchestration request.

use council_domain::{NodeId, Phase};

/// Callback for progress updates during orchestration
///
/// Implementations live in the presentation layer.
pub trait OrchestrationProgress: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a node finishes within a phase
    fn on_node_complete(&self, phase: &Phase, node: NodeId, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl OrchestrationProgress for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_node_complete(&self, _phase: &Phase, _node: NodeId, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
