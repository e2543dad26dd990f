//! The opcode table.
//!
//! Numeric values are a contract with every VM that loads our images and
//! must never be renumbered. Stack effects are written `( in -- out )`,
//! left-to-right = bottom-to-top; `R:` is the return (auxiliary) stack.

use std::fmt;

/// Primitive VM operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Opcode {
    // vm control
    /// ( -- )
    Nop = 0x00,
    /// ( -- ) halts execution
    Stop = 0x01,

    // data stack
    /// ( -- n ) pushes the following cell
    Lit = 0x02,
    /// ( n -- n n )
    Dup = 0x03,
    /// ( n -- )
    Drop = 0x04,
    /// ( a b -- b a )
    Swap = 0x05,

    // return stack
    /// ( n -- ) R:( -- n )
    ToR = 0x06,
    /// ( -- n ) R:( n -- )
    FromR = 0x07,

    // flow control
    /// ( addr -- )
    Jmp = 0x08,
    /// ( cond addr -- ) jumps when cond is non-zero
    CJmp = 0x09,
    /// ( addr -- ) R:( -- ret )
    Call = 0x0a,
    /// ( cond addr -- ) R:( -- ret ) calls when cond is non-zero
    CCall = 0x0b,
    /// ( -- ) R:( ret -- )
    Return = 0x0c,

    // memory
    /// ( addr -- n )
    Fetch = 0x0d,
    /// ( value addr -- )
    Store = 0x0e,

    // integer ops
    /// ( a b -- a+b )
    Add = 0x0f,
    /// ( a b -- a-b )
    Sub = 0x10,
    /// ( a b -- a*b )
    Mul = 0x11,
    /// ( a b -- a/b a%b )
    DivMod = 0x12,
    /// ( a b -- a==b )
    Eq = 0x13,
    /// ( a b -- a!=b )
    Ne = 0x14,
    /// ( a b -- a<b )
    Lt = 0x15,
    /// ( a b -- a>b )
    Gt = 0x16,

    // binary ops
    /// ( a b -- a&b )
    And = 0x17,
    /// ( a b -- a|b )
    Or = 0x18,
    /// ( a b -- a^b )
    Xor = 0x19,
    /// ( a b -- a<<b ), or a>>abs(b) when b is negative
    Shift = 0x1a,

    // io
    /// ( n -- )
    Syscall0 = 0x1b,
    /// ( arg0 n -- )
    Syscall1 = 0x1c,
    /// ( arg0 arg1 n -- )
    Syscall2 = 0x1d,
    /// ( arg0 arg1 arg2 n -- )
    Syscall3 = 0x1e,
    /// ( arg0 arg1 arg2 arg3 n -- )
    Syscall4 = 0x1f,
}

/// Declared stack effect of an opcode.
///
/// `pops`/`pushes` count data-stack cells, `rpops`/`rpushes` return-stack
/// cells. Conditional ops (`__cjmp`, `__ccall`) report their taken path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackEffect {
    pub pops: u8,
    pub pushes: u8,
    pub rpops: u8,
    pub rpushes: u8,
}

impl StackEffect {
    const fn data(pops: u8, pushes: u8) -> Self {
        Self {
            pops,
            pushes,
            rpops: 0,
            rpushes: 0,
        }
    }

    const fn with_return(self, rpops: u8, rpushes: u8) -> Self {
        Self {
            rpops,
            rpushes,
            ..self
        }
    }

    /// Net change of the data stack height.
    pub fn net(&self) -> i32 {
        self.pushes as i32 - self.pops as i32
    }

    /// Net change of the return stack height.
    pub fn net_return(&self) -> i32 {
        self.rpushes as i32 - self.rpops as i32
    }
}

/// Raised when a word does not name any opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode {0:#04x}")]
pub struct OpcodeError(pub i32);

impl Opcode {
    /// Every opcode, in numeric order.
    pub const ALL: [Opcode; 32] = [
        Opcode::Nop,
        Opcode::Stop,
        Opcode::Lit,
        Opcode::Dup,
        Opcode::Drop,
        Opcode::Swap,
        Opcode::ToR,
        Opcode::FromR,
        Opcode::Jmp,
        Opcode::CJmp,
        Opcode::Call,
        Opcode::CCall,
        Opcode::Return,
        Opcode::Fetch,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::DivMod,
        Opcode::Eq,
        Opcode::Ne,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shift,
        Opcode::Syscall0,
        Opcode::Syscall1,
        Opcode::Syscall2,
        Opcode::Syscall3,
        Opcode::Syscall4,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Source spelling of the opcode. A source word equal to a mnemonic
    /// compiles to the bare instruction instead of a call.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Stop => "stop",
            Opcode::Lit => "__lit",
            Opcode::Dup => "dup",
            Opcode::Drop => "drop",
            Opcode::Swap => "swap",
            Opcode::ToR => ">r",
            Opcode::FromR => "r>",
            Opcode::Jmp => "__jmp",
            Opcode::CJmp => "__cjmp",
            Opcode::Call => "__call",
            Opcode::CCall => "__ccall",
            Opcode::Return => "__return",
            Opcode::Fetch => "@",
            Opcode::Store => "!",
            Opcode::Add => "+",
            Opcode::Sub => "-",
            Opcode::Mul => "*",
            Opcode::DivMod => "/%",
            Opcode::Eq => "==",
            Opcode::Ne => "!=",
            Opcode::Lt => "<",
            Opcode::Gt => ">",
            Opcode::And => "&",
            Opcode::Or => "|",
            Opcode::Xor => "^",
            Opcode::Shift => "<<",
            Opcode::Syscall0 => "syscall0",
            Opcode::Syscall1 => "syscall1",
            Opcode::Syscall2 => "syscall2",
            Opcode::Syscall3 => "syscall3",
            Opcode::Syscall4 => "syscall4",
        }
    }

    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == name)
    }

    pub fn stack_effect(self) -> StackEffect {
        match self {
            Opcode::Nop | Opcode::Stop => StackEffect::data(0, 0),
            Opcode::Lit => StackEffect::data(0, 1),
            Opcode::Dup => StackEffect::data(1, 2),
            Opcode::Drop => StackEffect::data(1, 0),
            Opcode::Swap => StackEffect::data(2, 2),
            Opcode::ToR => StackEffect::data(1, 0).with_return(0, 1),
            Opcode::FromR => StackEffect::data(0, 1).with_return(1, 0),
            Opcode::Jmp => StackEffect::data(1, 0),
            Opcode::CJmp => StackEffect::data(2, 0),
            Opcode::Call => StackEffect::data(1, 0).with_return(0, 1),
            Opcode::CCall => StackEffect::data(2, 0).with_return(0, 1),
            Opcode::Return => StackEffect::data(0, 0).with_return(1, 0),
            Opcode::Fetch => StackEffect::data(1, 1),
            Opcode::Store => StackEffect::data(2, 0),
            Opcode::DivMod => StackEffect::data(2, 2),
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Eq
            | Opcode::Ne
            | Opcode::Lt
            | Opcode::Gt
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Shift => StackEffect::data(2, 1),
            Opcode::Syscall0 => StackEffect::data(1, 0),
            Opcode::Syscall1 => StackEffect::data(2, 0),
            Opcode::Syscall2 => StackEffect::data(3, 0),
            Opcode::Syscall3 => StackEffect::data(4, 0),
            Opcode::Syscall4 => StackEffect::data(5, 0),
        }
    }

    /// Whether the cell after this opcode is an immediate operand.
    #[inline]
    pub fn has_operand(self) -> bool {
        self == Opcode::Lit
    }

    /// Number of arguments (excluding the syscall number) for syscall ops.
    pub fn syscall_arity(self) -> Option<usize> {
        match self {
            Opcode::Syscall0 => Some(0),
            Opcode::Syscall1 => Some(1),
            Opcode::Syscall2 => Some(2),
            Opcode::Syscall3 => Some(3),
            Opcode::Syscall4 => Some(4),
            _ => None,
        }
    }
}

impl TryFrom<i32> for Opcode {
    type Error = OpcodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(OpcodeError(value))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
