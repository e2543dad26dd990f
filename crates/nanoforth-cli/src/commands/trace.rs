//! Trace execution for debugging.

use std::io::{self, Write};
use std::path::PathBuf;

use nanoforth_core::Colors;
use nanoforth_vm::{Console, FuelLimits, PrintTracer, VM, Verbosity};

use super::CommandError;
use super::build::write_out;
use super::exec::format_stacks;
use super::loader::load_program;

pub struct TraceArgs {
    pub input: PathBuf,
    pub image: bool,
    pub verbosity: Verbosity,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: TraceArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let program = load_program(&args.input, args.image, args.color)?;
    let colors = Colors::new(args.color);

    let vm = VM::builder()
        .limits(FuelLimits::new().exec_fuel(args.fuel))
        .build();
    let mut tracer = PrintTracer::new(
        program.image.len(),
        &program.symbols,
        args.verbosity,
        colors,
    );
    // Program output goes to stderr so it does not interleave with the trace.
    let mut console = Console::new(io::stderr(), io::stderr());
    let result = vm.execute_with(&program.image, &mut console, &mut tracer);

    for line in tracer.lines() {
        write_out(out, &format!("{line}\n"))?;
    }

    let halted = result?;
    write_out(out, &format!("{}---{}\n", colors.dim, colors.reset))?;
    write_out(out, &format_stacks(&halted, colors))
}
