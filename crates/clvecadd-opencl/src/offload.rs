//! The vector-addition offload sequence.

use crate::backend::ComputeBackend;
use crate::device::DeviceClass;
use crate::error::{OffloadError, Result, Step};
use crate::kernel::KERNEL_ENTRY_POINT;
use crate::workgroup;
use clvecadd_stopwatch::Stopwatch;
use tracing::{debug, info};

/// Tuning knobs for a single dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Upper bound on the local work size; `None` uses the device maximum.
    pub max_work_group_size: Option<usize>,
}

/// Compute `c[i] = a[i] + b[i]` on the first OpenCL device of `class`.
///
/// Returns the wall-clock seconds spent in the kernel dispatch and the wait
/// for its completion. Compilation, transfers and validation are not timed.
///
/// # Errors
///
/// Any failing step aborts the sequence with an [`OffloadError`] naming it.
#[cfg(feature = "opencl")]
pub fn add_opencl(
    class: DeviceClass,
    source: &str,
    c: &mut [i32],
    a: &[i32],
    b: &[i32],
    options: DispatchOptions,
) -> Result<f64> {
    let backend = crate::backend::OpenClBackend::acquire(class)?;
    add_with_backend(&backend, source, c, a, b, options)
}

/// Without the `opencl` feature there is no device to enumerate.
#[cfg(not(feature = "opencl"))]
pub fn add_opencl(
    class: DeviceClass,
    _source: &str,
    _c: &mut [i32],
    _a: &[i32],
    _b: &[i32],
    _options: DispatchOptions,
) -> Result<f64> {
    Err(OffloadError::new(
        Step::DeviceEnumeration,
        format!("cannot look up a {class} device: OpenCL support not compiled in (enable the `opencl` feature)"),
    ))
}

/// Run the offload sequence on an already acquired backend.
///
/// An empty input still compiles the program, so source errors surface, but
/// creates no buffers and dispatches nothing; the reported time is `0.0`.
pub fn add_with_backend<B: ComputeBackend>(
    backend: &B,
    source: &str,
    c: &mut [i32],
    a: &[i32],
    b: &[i32],
    options: DispatchOptions,
) -> Result<f64> {
    check_lengths(c, a, b)?;
    let len = a.len();
    debug!("Offloading {} element sum to {}", len, backend.description());

    let program = backend.compile(source, KERNEL_ENTRY_POINT)?;

    let mut watch = Stopwatch::new();
    if len == 0 {
        debug!("Empty input, skipping transfer and dispatch");
        return Ok(watch.elapsed());
    }

    let buffers = backend.upload(a, b)?;

    let device_max = backend.work_group_size(&program)?;
    let local = workgroup::local_work_size(
        len,
        workgroup::effective_max(device_max, options.max_work_group_size),
    );
    debug!("Dispatch: global={} local={} (device max {})", len, local, device_max);

    watch.start();
    backend.enqueue(&program, &buffers, len, local)?;
    backend.finish()?;
    watch.stop();

    backend.download(&buffers, c)?;
    validate_sum(c, a, b)?;

    info!("Kernel executed in {:.6}s on {}", watch.elapsed(), backend.description());
    Ok(watch.elapsed())
}

fn check_lengths(c: &[i32], a: &[i32], b: &[i32]) -> Result<()> {
    if a.len() == b.len() && a.len() == c.len() {
        return Ok(());
    }
    Err(OffloadError::new(
        Step::InputValidation,
        format!("length mismatch: output={} a={} b={}", c.len(), a.len(), b.len()),
    ))
}

/// Check every `c[i]` equals `a[i] + b[i]`, with device (wrapping) overflow.
pub fn validate_sum(c: &[i32], a: &[i32], b: &[i32]) -> Result<()> {
    check_lengths(c, a, b)?;
    let mismatch = c.iter().zip(a.iter().zip(b)).position(|(&c, (&a, &b))| c != a.wrapping_add(b));
    match mismatch {
        None => Ok(()),
        Some(i) => Err(OffloadError::new(
            Step::ResultValidation,
            format!("element {i}: {} + {} != {}", a[i], b[i], c[i]),
        )),
    }
}
