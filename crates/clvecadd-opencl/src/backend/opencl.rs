//! `opencl3` implementation of [`ComputeBackend`].
//!
//! Every handle is an owned `opencl3` value, so device resources are released
//! on drop whichever step fails.

use super::ComputeBackend;
use crate::device::DeviceClass;
use crate::error::{OffloadError, Result, Step};
use opencl3::command_queue::CommandQueue;
use opencl3::context::Context;
use opencl3::device::Device;
use opencl3::kernel::{ExecuteKernel, Kernel};
use opencl3::memory::{Buffer, CL_MEM_READ_ONLY, CL_MEM_WRITE_ONLY, ClMem};
use opencl3::platform::get_platforms;
use opencl3::program::Program;
use opencl3::types::{CL_BLOCKING, cl_int};
use std::ptr;
use tracing::{debug, info, warn};

/// OpenCL device, context and in-order command queue.
pub struct OpenClBackend {
    // Field order is release order.
    queue: CommandQueue,
    context: Context,
    device: Device,
    device_name: String,
    class: DeviceClass,
}

/// Built program and its `add` kernel.
pub struct OpenClProgram {
    kernel: Kernel,
    _program: Program,
}

/// Output buffer followed by the two read-only inputs.
pub struct OpenClBuffers {
    output: Buffer<cl_int>,
    lhs: Buffer<cl_int>,
    rhs: Buffer<cl_int>,
    len: usize,
}

impl std::fmt::Debug for OpenClBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenClBackend")
            .field("device_name", &self.device_name)
            .field("class", &self.class)
            .finish()
    }
}

impl OpenClBackend {
    /// Acquire the first device of `class`, a context on it, and a queue.
    pub fn acquire(class: DeviceClass) -> Result<Self> {
        let device = first_device(class)?;
        let device_name = device.name().unwrap_or_default();
        info!("Selected OpenCL {} device: {}", class, device_name);

        let context = Context::from_device(&device)
            .map_err(|e| OffloadError::new(Step::ContextCreation, e.to_string()))?;

        // clCreateCommandQueueWithProperties, OpenCL 2.0 platforms only.
        let queue = CommandQueue::create_default_with_properties(&context, 0, 0)
            .map_err(|e| OffloadError::new(Step::QueueCreation, e.to_string()))?;

        Ok(Self { queue, context, device, device_name, class })
    }

    /// Name reported by the device.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }
}

fn first_device(class: DeviceClass) -> Result<Device> {
    let platforms =
        get_platforms().map_err(|e| OffloadError::new(Step::DeviceEnumeration, e.to_string()))?;

    if platforms.is_empty() {
        return Err(OffloadError::new(Step::DeviceEnumeration, "no OpenCL platforms found"));
    }

    for platform in &platforms {
        debug!("Scanning OpenCL platform: {}", platform.name().unwrap_or_default());
        let device_ids = platform.get_devices(class.cl_device_type()).unwrap_or_default();
        if let Some(&device_id) = device_ids.first() {
            return Ok(Device::new(device_id));
        }
    }

    Err(OffloadError::new(Step::DeviceEnumeration, format!("no OpenCL {class} device found")))
}

impl ComputeBackend for OpenClBackend {
    type Program = OpenClProgram;
    type Buffers = OpenClBuffers;

    fn description(&self) -> String {
        format!("{} ({})", self.device_name, self.class)
    }

    fn compile(&self, source: &str, entry_point: &str) -> Result<OpenClProgram> {
        let mut program = Program::create_from_source(&self.context, source)
            .map_err(|e| OffloadError::new(Step::ProgramCreation, e.to_string()))?;

        if let Err(e) = program.build(self.context.devices(), "") {
            let log = program.get_build_log(self.device.id()).unwrap_or_default();
            warn!("OpenCL build log:\n{}", log);
            let detail = if log.trim().is_empty() { e.to_string() } else { format!("{e}\n{log}") };
            return Err(OffloadError::new(Step::ProgramCompilation, detail));
        }

        let kernel = Kernel::create(&program, entry_point)
            .map_err(|e| OffloadError::new(Step::KernelCreation, format!("{entry_point}: {e}")))?;
        debug!("Built kernel '{}'", entry_point);

        Ok(OpenClProgram { kernel, _program: program })
    }

    fn upload(&self, a: &[i32], b: &[i32]) -> Result<OpenClBuffers> {
        let len = a.len();
        let create = |flags| {
            // SAFETY: no host pointer is passed, the driver owns the allocation.
            let buffer =
                unsafe { Buffer::<cl_int>::create(&self.context, flags, len, ptr::null_mut()) };
            buffer.map_err(|e| {
                OffloadError::new(
                    Step::BufferCreation,
                    format!("{} bytes: {e}", len * size_of::<cl_int>()),
                )
            })
        };

        let mut lhs = create(CL_MEM_READ_ONLY)?;
        let mut rhs = create(CL_MEM_READ_ONLY)?;
        let output = create(CL_MEM_WRITE_ONLY)?;
        debug!("Allocated 3 device buffers of {} elements", len);

        // SAFETY: blocking writes, the host slices outlive the calls.
        unsafe {
            self.queue
                .enqueue_write_buffer(&mut lhs, CL_BLOCKING, 0, a, &[])
                .map_err(|e| OffloadError::new(Step::BufferWrite, format!("input a: {e}")))?;
            self.queue
                .enqueue_write_buffer(&mut rhs, CL_BLOCKING, 0, b, &[])
                .map_err(|e| OffloadError::new(Step::BufferWrite, format!("input b: {e}")))?;
        }

        Ok(OpenClBuffers { output, lhs, rhs, len })
    }

    fn work_group_size(&self, program: &OpenClProgram) -> Result<usize> {
        program
            .kernel
            .get_work_group_size(self.device.id())
            .map_err(|e| OffloadError::new(Step::WorkGroupQuery, e.to_string()))
    }

    fn enqueue(
        &self,
        program: &OpenClProgram,
        buffers: &OpenClBuffers,
        global: usize,
        local: usize,
    ) -> Result<()> {
        // SAFETY: argument order and types match the `add` signature.
        let event = unsafe {
            ExecuteKernel::new(&program.kernel)
                .set_arg(&buffers.output.get())
                .set_arg(&buffers.lhs.get())
                .set_arg(&buffers.rhs.get())
                .set_global_work_sizes(&[global])
                .set_local_work_sizes(&[local])
                .enqueue_nd_range(&self.queue)
        };
        event.map(drop).map_err(|e| OffloadError::new(Step::KernelDispatch, e.to_string()))
    }

    fn finish(&self) -> Result<()> {
        self.queue.finish().map_err(|e| OffloadError::new(Step::QueueFinish, e.to_string()))
    }

    fn download(&self, buffers: &OpenClBuffers, out: &mut [i32]) -> Result<()> {
        if out.len() != buffers.len {
            return Err(OffloadError::new(
                Step::BufferRead,
                format!("host buffer holds {} elements, device buffer {}", out.len(), buffers.len),
            ));
        }
        // SAFETY: blocking read into a slice of the buffer's length.
        let event =
            unsafe { self.queue.enqueue_read_buffer(&buffers.output, CL_BLOCKING, 0, out, &[]) };
        event.map(drop).map_err(|e| OffloadError::new(Step::BufferRead, e.to_string()))
    }
}
