//! Execution engine: interpreter loop, syscall hosts and tracing.

mod error;
mod syscall;
mod trace;
mod vm;

#[cfg(test)]
mod syscall_tests;
#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use syscall::{Console, Recorder, Syscalls};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vm::{FuelLimits, Halted, VM, VMBuilder};
