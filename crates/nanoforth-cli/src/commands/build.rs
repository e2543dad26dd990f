//! Compile a source file to an image.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use nanoforth_core::Colors;

use super::CommandError;
use super::loader::{compile_source, print_warnings, read_source};

pub struct BuildArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub disasm: bool,
    pub color: bool,
}

/// Nothing is written unless compilation succeeds.
pub fn run(args: BuildArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let source = read_source(&args.input)?;
    let compiled = compile_source(&source, &args.input, args.color)?;
    print_warnings(&compiled.warnings, &source, &args.input, args.color);

    fs::write(&args.output, compiled.image.to_bytes()).map_err(|e| {
        CommandError::Io(format!(
            "failed to write '{}': {}",
            args.output.display(),
            e
        ))
    })?;

    if args.disasm {
        write_out(out, &compiled.listing(Colors::new(args.color)))?;
    }
    Ok(())
}

pub(super) fn write_out(out: &mut impl Write, text: &str) -> Result<(), CommandError> {
    out.write_all(text.as_bytes())
        .map_err(|e| CommandError::Io(format!("failed to write output: {}", e)))
}
