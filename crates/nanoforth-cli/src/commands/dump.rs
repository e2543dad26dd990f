//! Show the listing of a source file or image, or the syntax tree of a source file.

use std::io::Write;
use std::path::PathBuf;

use nanoforth_bytecode::{Symbols, listing};
use nanoforth_compiler::ProgramBuilder;
use nanoforth_core::Colors;

use super::CommandError;
use super::build::write_out;
use super::loader::{compile_error, compile_source, read_image, read_source};

pub struct DumpArgs {
    pub input: PathBuf,
    pub image: bool,
    pub cst: bool,
    /// With `cst`: keep trivia and spans.
    pub raw: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let colors = Colors::new(args.color);

    if args.image {
        // Foreign images carry no labels.
        let image = read_image(&args.input)?;
        return write_out(out, &listing(&image.decode(), &Symbols::new(), colors));
    }

    let source = read_source(&args.input)?;
    if args.cst {
        let parsed = ProgramBuilder::new(&source)
            .parse()
            .map_err(|err| compile_error(err, &source, &args.input, args.color))?;
        let tree = if args.raw {
            parsed.dump_cst_full()
        } else {
            parsed.dump_cst()
        };
        return write_out(out, &tree);
    }

    let compiled = compile_source(&source, &args.input, args.color)?;
    write_out(out, &compiled.listing(colors))
}
