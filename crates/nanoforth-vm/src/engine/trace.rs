//! Tracing infrastructure for debugging VM execution.
//!
//! The tracer is a zero-cost abstraction: with `NoopTracer` every hook is an
//! empty `#[inline(always)]` function and the calls disappear. `PrintTracer`
//! collects one line per executed instruction, plus sub-lines depending on
//! the verbosity.

use std::fmt::Write as _;

use nanoforth_bytecode::{Opcode, Symbols, width_for_count};
use nanoforth_core::Colors;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Default: instructions, label headers, syscalls.
    #[default]
    Default,
    /// Verbose (-v): adds the data stack after each step, calls and returns.
    Verbose,
    /// Very verbose (-vv): adds the return stack too.
    VeryVerbose,
}

/// Hooks called by the VM while it runs.
///
/// - `trace_instruction` - before executing an instruction
/// - `trace_stacks` - after an instruction that did not halt
/// - `trace_call` / `trace_return` - on control transfers through the return stack
/// - `trace_syscall` - before handing a syscall to the host
/// - `trace_halt` - when `stop` executes
pub trait Tracer {
    fn trace_instruction(&mut self, ip: usize, op: Opcode, operand: Option<i32>);

    fn trace_stacks(&mut self, stack: &[i32], return_stack: &[i32]);

    fn trace_call(&mut self, target: i32);

    fn trace_return(&mut self, target: i32);

    fn trace_syscall(&mut self, number: i32, args: &[i32]);

    fn trace_halt(&mut self, steps: u32);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _ip: usize, _op: Opcode, _operand: Option<i32>) {}

    #[inline(always)]
    fn trace_stacks(&mut self, _stack: &[i32], _return_stack: &[i32]) {}

    #[inline(always)]
    fn trace_call(&mut self, _target: i32) {}

    #[inline(always)]
    fn trace_return(&mut self, _target: i32) {}

    #[inline(always)]
    fn trace_syscall(&mut self, _number: i32, _args: &[i32]) {}

    #[inline(always)]
    fn trace_halt(&mut self, _steps: u32) {}
}

/// Tracer that collects an execution trace for display.
pub struct PrintTracer<'s> {
    symbols: &'s Symbols,
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// Address column width.
    addr_width: usize,
}

impl<'s> PrintTracer<'s> {
    /// `image_len` sizes the address column; `symbols` may be empty.
    pub fn new(image_len: usize, symbols: &'s Symbols, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            symbols,
            verbosity,
            colors,
            lines: Vec::new(),
            addr_width: width_for_count(image_len),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn names_at(&self, addr: i32) -> Option<String> {
        let addr = u32::try_from(addr).ok()?;
        let names: Vec<_> = self.symbols.names_at(addr).collect();
        (!names.is_empty()).then(|| names.join(", "))
    }

    /// Sub-lines are indented past the address column.
    fn sub_line(&mut self, content: String) {
        let indent = " ".repeat(self.addr_width + 4);
        self.lines.push(format!("{indent}{content}"));
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_instruction(&mut self, ip: usize, op: Opcode, operand: Option<i32>) {
        let c = self.colors;
        if let Some(names) = self.names_at(ip as i32) {
            self.lines.push(format!("{}:", c.paint(c.blue, names)));
        }

        let mut line = format!(
            "  {}{ip:0w$}{}  {}",
            c.dim,
            c.reset,
            op.mnemonic(),
            w = self.addr_width
        );
        if let Some(value) = operand {
            let _ = write!(line, " {}", c.paint(c.green, value));
            if let Some(names) = self.names_at(value) {
                let _ = write!(line, " {}", c.paint(c.dim, format!("(> {names})")));
            }
        }
        self.lines.push(line);
    }

    fn trace_stacks(&mut self, stack: &[i32], return_stack: &[i32]) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        self.sub_line(format!("{} {stack:?}", c.paint(c.dim, "stack")));
        if self.verbosity >= Verbosity::VeryVerbose {
            self.sub_line(format!("{} {return_stack:?}", c.paint(c.dim, "rstack")));
        }
    }

    fn trace_call(&mut self, target: i32) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let name = self.names_at(target).unwrap_or_else(|| target.to_string());
        self.sub_line(format!("-> {name}"));
    }

    fn trace_return(&mut self, target: i32) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        self.sub_line(format!("<- {target}"));
    }

    fn trace_syscall(&mut self, number: i32, args: &[i32]) {
        self.sub_line(format!("syscall {number} {args:?}"));
    }

    fn trace_halt(&mut self, steps: u32) {
        let c = self.colors;
        self.lines
            .push(c.paint(c.dim, format!("  halted after {steps} steps")));
    }
}
