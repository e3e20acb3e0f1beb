//! Error type for the offload sequence.
//!
//! Every failure is the same kind of error, tagged with the [`Step`] that
//! reported a non-success status.

use std::fmt;

/// A step of the offload sequence that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    InputValidation,
    SourceLoad,
    DeviceEnumeration,
    ContextCreation,
    QueueCreation,
    ProgramCreation,
    ProgramCompilation,
    KernelCreation,
    BufferCreation,
    BufferWrite,
    WorkGroupQuery,
    KernelDispatch,
    QueueFinish,
    BufferRead,
    ResultValidation,
}

impl Step {
    /// Human-readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InputValidation => "input validation",
            Self::SourceLoad => "kernel source load",
            Self::DeviceEnumeration => "device enumeration",
            Self::ContextCreation => "context creation",
            Self::QueueCreation => "command queue creation",
            Self::ProgramCreation => "program creation",
            Self::ProgramCompilation => "program compilation",
            Self::KernelCreation => "kernel creation",
            Self::BufferCreation => "buffer creation",
            Self::BufferWrite => "buffer write",
            Self::WorkGroupQuery => "work-group size query",
            Self::KernelDispatch => "kernel dispatch",
            Self::QueueFinish => "queue finish",
            Self::BufferRead => "buffer read",
            Self::ResultValidation => "result validation",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure of one offload step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{step} failed{}", detail_suffix(.detail))]
pub struct OffloadError {
    step: Step,
    detail: String,
}

fn detail_suffix(detail: &str) -> String {
    if detail.is_empty() { String::new() } else { format!(": {detail}") }
}

impl OffloadError {
    /// Failure of `step`, with a free-form detail such as an OpenCL status.
    pub fn new(step: Step, detail: impl Into<String>) -> Self {
        Self { step, detail: detail.into() }
    }

    /// Failure of `step` with no further detail.
    pub fn bare(step: Step) -> Self {
        Self { step, detail: String::new() }
    }

    /// The step that failed.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Additional context reported with the failure.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Result alias for offload operations.
pub type Result<T> = std::result::Result<T, OffloadError>;
