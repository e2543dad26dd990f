//! Host side of the `syscallN` opcodes.

use std::io::{self, Stderr, Stdout, Write};

use super::error::RuntimeError;

/// Receives every syscall the program makes.
///
/// `args` holds the arguments in push order (`arg0` first).
pub trait Syscalls {
    fn syscall(&mut self, number: i32, args: &[i32]) -> Result<(), RuntimeError>;
}

/// Terminal host: `0` prints a newline, `1` prints `arg0`.
///
/// Other numbers are reported on the error stream and otherwise ignored.
pub struct Console<W: Write, E: Write> {
    out: W,
    err: E,
}

impl Console<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> Console<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write(&mut self, number: i32, args: &[i32]) -> io::Result<()> {
        match (number, args.first()) {
            (0, _) => writeln!(self.out),
            (1, Some(arg0)) => write!(self.out, "{arg0}"),
            (1, None) => writeln!(self.err, "syscall 1 called without an argument"),
            _ => writeln!(self.err, "unsupported syscall {number}"),
        }
    }
}

impl<W: Write, E: Write> Syscalls for Console<W, E> {
    fn syscall(&mut self, number: i32, args: &[i32]) -> Result<(), RuntimeError> {
        self.write(number, args)
            .and_then(|()| self.out.flush())
            .map_err(|e| RuntimeError::Syscall {
                number,
                message: e.to_string(),
            })
    }
}

/// Records every call, for tests and dry runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recorder {
    calls: Vec<(i32, Vec<i32>)>,
}

impl Recorder {
    pub fn calls(&self) -> &[(i32, Vec<i32>)] {
        &self.calls
    }
}

impl Syscalls for Recorder {
    fn syscall(&mut self, number: i32, args: &[i32]) -> Result<(), RuntimeError> {
        self.calls.push((number, args.to_vec()));
        Ok(())
    }
}
