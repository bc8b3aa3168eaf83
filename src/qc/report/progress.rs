use tracing::{info, warn};

/// Coarse pipeline stages reported to the status collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ProcessingInput,
    Merging,
    ComputingTierFlags,
    Complete,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::ProcessingInput => "Processing Input",
            Stage::Merging => "Merging",
            Stage::ComputingTierFlags => "Computing Tier Flags",
            Stage::Complete => "Tiers computed",
        }
    }
}

/// Receives purely informational progress signals. Implementations must not
/// influence the pipeline result.
pub trait ProgressSink {
    /// Called after each Input sheet has been processed. `index` is 1-based.
    fn sheet_read(&mut self, index: usize, total: usize, sheet: &str);

    fn stage(&mut self, stage: Stage);

    /// Non-fatal condition the analyst should know about.
    fn warning(&mut self, message: &str);
}

/// Discards every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn sheet_read(&mut self, _index: usize, _total: usize, _sheet: &str) {}

    fn stage(&mut self, _stage: Stage) {}

    fn warning(&mut self, _message: &str) {}
}

/// Forwards signals to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn sheet_read(&mut self, index: usize, total: usize, sheet: &str) {
        info!(index, total, sheet, "reading sheet {index}/{total}: {sheet}");
    }

    fn stage(&mut self, stage: Stage) {
        info!(stage = stage.label(), "stage");
    }

    fn warning(&mut self, message: &str) {
        warn!("{message}");
    }
}
