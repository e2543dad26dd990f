//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("nanoforth")
        .about("Compiler and reference VM for a tiny Forth dialect")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(exec_command())
        .subcommand(trace_command())
}

/// Compile a source file to an image.
pub fn build_command() -> Command {
    Command::new("build")
        .about("Compile a source file to a bytecode image")
        .after_help(
            r#"EXAMPLES:
  nanoforth build -i prog.fs -o prog.bin       # write the image
  nanoforth build -i prog.fs -o prog.bin -s    # and print the listing"#,
        )
        .arg(input_flag_arg())
        .arg(output_file_arg())
        .arg(disasm_arg())
        .arg(color_arg())
}

/// Report diagnostics without writing anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a source file")
        .after_help(
            r#"EXAMPLES:
  nanoforth check prog.fs             # silent on success
  nanoforth check prog.fs --strict    # fail on warnings too"#,
        )
        .arg(input_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show the listing of a source file or image.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the disassembly listing")
        .after_help(
            r#"EXAMPLES:
  nanoforth dump prog.fs              # listing with label names
  nanoforth dump prog.fs --cst        # syntax tree
  nanoforth dump prog.fs --cst --raw  # with trivia and spans
  nanoforth dump prog.bin --image     # decode a compiled image"#,
        )
        .arg(input_arg())
        .arg(image_arg())
        .arg(cst_arg())
        .arg(raw_arg())
        .arg(color_arg())
}

/// Run on the reference VM.
pub fn exec_command() -> Command {
    Command::new("exec")
        .about("Run a program on the reference VM")
        .after_help(
            r#"EXAMPLES:
  nanoforth exec prog.fs              # compile and run
  nanoforth exec prog.bin --image     # run a compiled image
  nanoforth exec prog.fs --json       # final state as JSON"#,
        )
        .arg(input_arg())
        .arg(image_arg())
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Run on the reference VM with an instruction trace.
pub fn trace_command() -> Command {
    Command::new("trace")
        .about("Trace execution on the reference VM")
        .after_help(
            r#"EXAMPLES:
  nanoforth trace prog.fs             # one line per instruction
  nanoforth trace prog.fs -v          # with data stack
  nanoforth trace prog.fs -vv         # with return stack"#,
        )
        .arg(input_arg())
        .arg(image_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}
