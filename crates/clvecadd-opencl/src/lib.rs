//! OpenCL offload of element-wise integer vector addition.
//!
//! The crate provides:
//! - [`add_opencl`]: acquire a CPU or GPU OpenCL device, run the `add` kernel
//!   over two input vectors, validate the result, and report the kernel time
//! - [`add_with_backend`]: the same sequence over any [`ComputeBackend`]
//! - [`OffloadError`]: the single failure kind, tagged with the failed [`Step`]
//!
//! The real backend needs the `opencl` feature, which links the OpenCL ICD
//! loader.

pub mod backend;
pub mod device;
pub mod error;
pub mod kernel;
pub mod offload;
pub mod workgroup;

pub use backend::ComputeBackend;
#[cfg(feature = "opencl")]
pub use backend::OpenClBackend;
pub use device::DeviceClass;
pub use error::{OffloadError, Result, Step};
pub use kernel::{ADD_KERNEL_SOURCE, KERNEL_ENTRY_POINT, load_kernel_source};
pub use offload::{DispatchOptions, add_opencl, add_with_backend, validate_sum};
