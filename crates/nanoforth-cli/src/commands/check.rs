//! Report diagnostics without producing output.

use std::path::PathBuf;

use super::CommandError;
use super::loader::{compile_source, read_source, render_diagnostics};

pub struct CheckArgs {
    pub input: PathBuf,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) -> Result<(), CommandError> {
    let source = read_source(&args.input)?;
    let compiled = compile_source(&source, &args.input, args.color)?;

    if !compiled.warnings.has_warnings() {
        // Silent on success (like cargo check)
        return Ok(());
    }

    let rendered = render_diagnostics(&compiled.warnings, &source, &args.input, args.color);
    if args.strict {
        return Err(CommandError::Compile { rendered });
    }
    eprint!("{rendered}");
    Ok(())
}
