//! Progress reporting for orchestration runs

use colored::Colorize;
use council_application::ports::progress::OrchestrationProgress;
use council_domain::{NodeId, Phase};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut bar) = self.phase_bar.lock() {
            f(&mut bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn node_status(node: NodeId, success: bool) -> String {
    if success {
        format!("{} {}", "v".green(), node)
    } else {
        format!("{} {} (failed)", "x".red(), node)
    }
}

impl OrchestrationProgress for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Starting...");
        self.with_bar(|bar| *bar = Some(pb));
    }

    fn on_node_complete(&self, _phase: &Phase, node: NodeId, success: bool) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.as_ref() {
                pb.set_message(node_status(node, success));
                pb.inc(1);
            }
        });
    }

    fn on_phase_complete(&self, phase: &Phase) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.take() {
                pb.finish_with_message(format!("{} complete", phase.display_name().green()));
            }
        });
    }
}

/// Plain line-per-event progress, for terminals without bars
pub struct SimpleProgress;

impl OrchestrationProgress for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_node_complete(&self, _phase: &Phase, node: NodeId, success: bool) {
        eprintln!("  {}", node_status(node, success));
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}
