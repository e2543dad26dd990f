//! Reference virtual machine for NanoForth images.
//!
//! Runs a flat image of 32-bit cells with a data stack, a return stack and a
//! small word-addressed memory, stopping at the first `stop`.

pub mod engine;

pub use engine::{
    Console, FuelLimits, Halted, NoopTracer, PrintTracer, Recorder, RuntimeError, Syscalls,
    Tracer, VM, Verbosity,
};
