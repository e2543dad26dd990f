//! Run a program on the reference VM.

use std::io::{self, Write};
use std::path::PathBuf;

use nanoforth_core::Colors;
use nanoforth_vm::{Console, FuelLimits, Halted, VM};

use super::CommandError;
use super::build::write_out;
use super::loader::load_program;

pub struct ExecArgs {
    pub input: PathBuf,
    pub image: bool,
    pub json: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: ExecArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let program = load_program(&args.input, args.image, args.color)?;

    let vm = VM::builder()
        .limits(FuelLimits::new().exec_fuel(args.fuel))
        .build();
    let mut console = Console::new(&mut *out, io::stderr());
    let halted = vm.execute(&program.image, &mut console)?;
    drop(console);

    if args.json {
        let json = serde_json::to_string(&halted)
            .map_err(|e| CommandError::Io(format!("JSON serialization failed: {}", e)))?;
        return write_out(out, &format!("{json}\n"));
    }

    write_out(out, &format_stacks(&halted, Colors::new(args.color)))
}

/// Final stacks, bottom first. Empty stacks are omitted.
pub fn format_stacks(halted: &Halted, colors: Colors) -> String {
    let mut text = String::new();
    for (title, values) in [
        ("stack", &halted.stack),
        ("return stack", &halted.return_stack),
    ] {
        if values.is_empty() {
            continue;
        }
        text.push_str(&format!("{}:\n", colors.paint(colors.blue, title)));
        for v in values {
            text.push_str(&format!("  {}\n", colors.paint(colors.green, v)));
        }
    }
    text
}
