pub mod build;
pub mod check;
pub mod dump;
pub mod exec;
pub mod loader;
pub mod trace;


use nanoforth_bytecode::ImageError;
use nanoforth_vm::RuntimeError;

/// Why a command failed. Decides the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Reading or writing a file failed.
    #[error("{0}")]
    Io(String),

    /// Compilation failed; the diagnostics are already rendered.
    #[error("{rendered}")]
    Compile { rendered: String },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Runtime(_) => 2,
            CommandError::Io(_) | CommandError::Compile { .. } | CommandError::Image(_) => 1,
        }
    }

    /// Print to stderr the way the terminal expects it.
    pub fn report(&self) {
        match self {
            CommandError::Compile { rendered } => eprint!("{rendered}"),
            CommandError::Runtime(e) => eprintln!("runtime error: {e}"),
            CommandError::Io(_) | CommandError::Image(_) => eprintln!("error: {self}"),
        }
    }
}
