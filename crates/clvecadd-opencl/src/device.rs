//! Device class selection.

use std::fmt;

/// Class of compute device the kernel is dispatched to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    #[default]
    Cpu,
    Gpu,
}

impl DeviceClass {
    /// `Gpu` when `use_gpu` is set, `Cpu` otherwise.
    pub const fn from_use_gpu(use_gpu: bool) -> Self {
        if use_gpu { Self::Gpu } else { Self::Cpu }
    }

    /// The matching `CL_DEVICE_TYPE_*` bitfield.
    #[cfg(feature = "opencl")]
    pub(crate) const fn cl_device_type(self) -> opencl3::types::cl_device_type {
        match self {
            Self::Cpu => opencl3::device::CL_DEVICE_TYPE_CPU,
            Self::Gpu => opencl3::device::CL_DEVICE_TYPE_GPU,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Gpu => write!(f, "gpu"),
        }
    }
}
