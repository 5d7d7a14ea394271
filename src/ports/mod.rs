// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::ConvertResult;

/// Port for stream metadata probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// List the streams of one kind, sorted ascending by index
    async fn probe_streams(
        &self,
        input: &Path,
        kind: MediaKind,
    ) -> ConvertResult<Vec<StreamDescriptor>>;
}

/// Port for running an assembled command
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run the plan to completion
    async fn execute(&self, plan: &CommandPlan) -> ConvertResult<()>;
}

/// Answer to a stream selection question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChoice {
    /// Blank answer; the selector applies the per-kind default
    Default,
    /// Explicit indexes in the order given; empty means none
    Indexes(Vec<u32>),
}

/// Port for interactive stream selection
///
/// Calls block until an answer is available.
pub trait SelectionPort {
    /// Pick streams out of the offered list
    fn choose(&mut self, kind: MediaKind, streams: &[StreamDescriptor])
        -> ConvertResult<StreamChoice>;

    /// Pick one value; blank answers yield `default`
    fn choose_one(&mut self, prompt: &str, options: &[&str], default: &str)
        -> ConvertResult<String>;
}
