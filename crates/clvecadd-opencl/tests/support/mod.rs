//! Recording host-side backend for driving the offload sequence in tests.

#![allow(dead_code)]

use clvecadd_opencl::{ComputeBackend, OffloadError, Result, Step};
use std::cell::RefCell;

/// Host stand-in for a device: "compiles" by looking for the entry point and
/// computes the sum on the host when the output is downloaded.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: RefCell<Vec<&'static str>>,
    pub dispatch: RefCell<Option<(usize, usize)>>,
    pub fail_at: Option<Step>,
    pub max_work_group_size: usize,
    /// Added to every output element, to simulate a faulty device.
    pub corrupt_by: i32,
}

pub struct HostBuffers {
    a: Vec<i32>,
    b: Vec<i32>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self { max_work_group_size: 256, ..Default::default() }
    }

    pub fn failing_at(step: Step) -> Self {
        Self { fail_at: Some(step), ..Self::new() }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str, step: Step) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.fail_at == Some(step) {
            return Err(OffloadError::new(step, "injected"));
        }
        Ok(())
    }
}

impl ComputeBackend for RecordingBackend {
    type Program = ();
    type Buffers = HostBuffers;

    fn description(&self) -> String {
        "recording host backend".to_string()
    }

    fn compile(&self, source: &str, entry_point: &str) -> Result<()> {
        self.record("compile", Step::ProgramCompilation)?;
        if !source.contains(&format!("__kernel void {entry_point}(")) {
            return Err(OffloadError::new(Step::ProgramCompilation, "entry point not found"));
        }
        Ok(())
    }

    fn upload(&self, a: &[i32], b: &[i32]) -> Result<HostBuffers> {
        self.record("upload", Step::BufferWrite)?;
        Ok(HostBuffers { a: a.to_vec(), b: b.to_vec() })
    }

    fn work_group_size(&self, _program: &()) -> Result<usize> {
        self.record("work_group_size", Step::WorkGroupQuery)?;
        Ok(self.max_work_group_size)
    }

    fn enqueue(
        &self,
        _program: &(),
        _buffers: &HostBuffers,
        global: usize,
        local: usize,
    ) -> Result<()> {
        self.record("enqueue", Step::KernelDispatch)?;
        *self.dispatch.borrow_mut() = Some((global, local));
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        self.record("finish", Step::QueueFinish)
    }

    fn download(&self, buffers: &HostBuffers, out: &mut [i32]) -> Result<()> {
        self.record("download", Step::BufferRead)?;
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = buffers.a[i].wrapping_add(buffers.b[i]).wrapping_add(self.corrupt_by);
        }
        Ok(())
    }
}
