//! Compute backends.
//!
//! [`ComputeBackend`] splits the offload sequence at the points where the
//! driver needs control back: between compilation and transfer, and around
//! the dispatch so the stopwatch brackets only the kernel run. Acquisition of
//! device, context and queue is the backend's constructor; release is `Drop`.

use crate::error::Result;

#[cfg(feature = "opencl")]
pub mod opencl;

#[cfg(feature = "opencl")]
pub use opencl::OpenClBackend;

/// A device able to run the `add` kernel.
pub trait ComputeBackend {
    /// Compiled program together with its extracted kernel.
    type Program;
    /// Device-side output and input buffers.
    type Buffers;

    /// Short description of the acquired device, for logging.
    fn description(&self) -> String;

    /// Create a program from `source`, build it, and extract `entry_point`.
    fn compile(&self, source: &str, entry_point: &str) -> Result<Self::Program>;

    /// Allocate the three device buffers and copy both inputs over (blocking).
    fn upload(&self, a: &[i32], b: &[i32]) -> Result<Self::Buffers>;

    /// Maximum work-group size of the compiled kernel on this device.
    fn work_group_size(&self, program: &Self::Program) -> Result<usize>;

    /// Bind `(output, a, b)` and enqueue a one-dimensional dispatch of
    /// `global` work items in groups of `local`.
    fn enqueue(
        &self,
        program: &Self::Program,
        buffers: &Self::Buffers,
        global: usize,
        local: usize,
    ) -> Result<()>;

    /// Block until every enqueued command has completed.
    fn finish(&self) -> Result<()>;

    /// Copy the output buffer into `out` (blocking).
    fn download(&self, buffers: &Self::Buffers, out: &mut [i32]) -> Result<()>;
}
