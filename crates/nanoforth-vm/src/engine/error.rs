//! Errors that can occur while running an image.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("data stack underflow at {ip}")]
    StackUnderflow { ip: usize },

    #[error("data stack overflow at {ip}")]
    StackOverflow { ip: usize },

    #[error("return stack underflow at {ip}")]
    ReturnStackUnderflow { ip: usize },

    #[error("return stack overflow at {ip}")]
    ReturnStackOverflow { ip: usize },

    /// Control reached an address outside the image.
    #[error("instruction pointer {target} is outside the image")]
    IpOutOfBounds { target: i64 },

    #[error("invalid opcode {value:#04x} at {ip}")]
    InvalidOpcode { ip: usize, value: i32 },

    #[error("memory address {addr} out of range at {ip}")]
    MemoryOutOfBounds { ip: usize, addr: i32 },

    #[error("division by zero at {ip}")]
    DivisionByZero { ip: usize },

    /// Execution fuel exhausted (too many steps).
    #[error("runtime execution limit of {0} steps exceeded")]
    ExecFuelExhausted(u32),

    #[error("syscall {number} failed: {message}")]
    Syscall { number: i32, message: String },
}
