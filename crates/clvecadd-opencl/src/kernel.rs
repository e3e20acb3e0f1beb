//! Kernel source text.
//!
//! The default `add` kernel ships with this crate and is embedded at compile
//! time. An external source file can be used instead; it is read as opaque
//! text and handed to the device compiler unchanged.

use crate::error::{OffloadError, Result, Step};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Name of the entry point every kernel source must define.
///
/// Signature: `add(__global int* c, __global const int* a, __global const int* b)`.
pub const KERNEL_ENTRY_POINT: &str = "add";

/// OpenCL C source of the default `add` kernel.
pub const ADD_KERNEL_SOURCE: &str = include_str!("../kernels/add.cl");

/// Load kernel source from `path`, or the embedded default when `None`.
pub fn load_kernel_source(path: Option<&Path>) -> Result<Cow<'static, str>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(ADD_KERNEL_SOURCE));
    };

    let source = std::fs::read_to_string(path)
        .map_err(|e| OffloadError::new(Step::SourceLoad, format!("{}: {e}", path.display())))?;
    debug!("loaded kernel source from {} ({} bytes)", path.display(), source.len());
    Ok(Cow::Owned(source))
}
