//! Interpreter loop for linked images.

use nanoforth_bytecode::{Image, Opcode};
use serde::Serialize;

use super::error::RuntimeError;
use super::syscall::Syscalls;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for execution.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum total steps (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Data stack capacity (default: 64).
    pub(crate) data_stack_depth: usize,
    /// Return stack capacity (default: 64).
    pub(crate) return_stack_depth: usize,
    /// Addressable memory in words (default: 1,024).
    pub(crate) memory_words: usize,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            data_stack_depth: 64,
            return_stack_depth: 64,
            memory_words: 1024,
        }
    }
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn data_stack_depth(mut self, depth: usize) -> Self {
        self.data_stack_depth = depth;
        self
    }

    pub fn return_stack_depth(mut self, depth: usize) -> Self {
        self.return_stack_depth = depth;
        self
    }

    pub fn memory_words(mut self, words: usize) -> Self {
        self.memory_words = words;
        self
    }
}

/// Machine state at the moment `stop` executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Halted {
    /// Data stack, bottom first.
    pub stack: Vec<i32>,
    pub return_stack: Vec<i32>,
    pub steps: u32,
}

/// Virtual machine state.
pub struct VM {
    stack: Vec<i32>,
    return_stack: Vec<i32>,
    memory: Vec<i32>,
    /// Address of the next cell to fetch.
    ip: usize,
    /// Address of the instruction being executed, for error reports.
    current: usize,
    exec_fuel: u32,
    steps: u32,
    limits: FuelLimits,
}

/// Builder for VM instances.
#[derive(Default)]
pub struct VMBuilder {
    limits: FuelLimits,
}

impl VMBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    pub fn build(self) -> VM {
        VM {
            stack: Vec::with_capacity(self.limits.data_stack_depth),
            return_stack: Vec::with_capacity(self.limits.return_stack_depth),
            memory: vec![0; self.limits.memory_words],
            ip: 0,
            current: 0,
            exec_fuel: self.limits.exec_fuel,
            steps: 0,
            limits: self.limits,
        }
    }
}

enum Flow {
    Continue,
    Halt,
}

impl VM {
    pub fn builder() -> VMBuilder {
        VMBuilder::new()
    }

    /// Run `image` from address 0 until `stop`.
    ///
    /// Uses `NoopTracer`, which compiles away.
    pub fn execute<S: Syscalls>(self, image: &Image, host: &mut S) -> Result<Halted, RuntimeError> {
        self.execute_with(image, host, &mut NoopTracer)
    }

    pub fn execute_with<S: Syscalls, T: Tracer>(
        mut self,
        image: &Image,
        host: &mut S,
        tracer: &mut T,
    ) -> Result<Halted, RuntimeError> {
        loop {
            if self.exec_fuel == 0 {
                return Err(RuntimeError::ExecFuelExhausted(self.limits.exec_fuel));
            }
            self.exec_fuel -= 1;

            let (op, operand) = self.fetch(image)?;
            self.steps += 1;
            tracer.trace_instruction(self.current, op, operand);

            match self.step(op, operand, host, tracer)? {
                Flow::Continue => tracer.trace_stacks(&self.stack, &self.return_stack),
                Flow::Halt => {
                    tracer.trace_halt(self.steps);
                    return Ok(Halted {
                        stack: self.stack,
                        return_stack: self.return_stack,
                        steps: self.steps,
                    });
                }
            }
        }
    }

    fn fetch(&mut self, image: &Image) -> Result<(Opcode, Option<i32>), RuntimeError> {
        self.current = self.ip;
        let word = self.next_word(image)?;
        let op = Opcode::try_from(word).map_err(|e| RuntimeError::InvalidOpcode {
            ip: self.current,
            value: e.0,
        })?;
        let operand = if op.has_operand() {
            Some(self.next_word(image)?)
        } else {
            None
        };
        Ok((op, operand))
    }

    fn next_word(&mut self, image: &Image) -> Result<i32, RuntimeError> {
        let word = image.get(self.ip).ok_or(RuntimeError::IpOutOfBounds {
            target: self.ip as i64,
        })?;
        self.ip += 1;
        Ok(word)
    }

    fn step<S: Syscalls, T: Tracer>(
        &mut self,
        op: Opcode,
        operand: Option<i32>,
        host: &mut S,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        match op {
            Opcode::Nop => {}
            Opcode::Stop => return Ok(Flow::Halt),
            Opcode::Lit => self.push(operand.unwrap_or_default())?,
            Opcode::Dup => {
                let a = self.pop()?;
                self.push(a)?;
                self.push(a)?;
            }
            Opcode::Drop => {
                self.pop()?;
            }
            Opcode::Swap => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.push(b)?;
                self.push(a)?;
            }
            Opcode::ToR => {
                let n = self.pop()?;
                self.rpush(n)?;
            }
            Opcode::FromR => {
                let n = self.rpop()?;
                self.push(n)?;
            }
            Opcode::Jmp => {
                let addr = self.pop()?;
                self.jump(addr)?;
            }
            Opcode::CJmp => {
                let addr = self.pop()?;
                if self.pop()? != 0 {
                    self.jump(addr)?;
                }
            }
            Opcode::Call => {
                let addr = self.pop()?;
                self.call(addr, tracer)?;
            }
            Opcode::CCall => {
                let addr = self.pop()?;
                if self.pop()? != 0 {
                    self.call(addr, tracer)?;
                }
            }
            Opcode::Return => {
                let addr = self.rpop()?;
                tracer.trace_return(addr);
                self.jump(addr)?;
            }
            Opcode::Fetch => {
                let addr = self.pop()?;
                let slot = self.memory_slot(addr)?;
                self.push(self.memory[slot])?;
            }
            Opcode::Store => {
                let addr = self.pop()?;
                let value = self.pop()?;
                let slot = self.memory_slot(addr)?;
                self.memory[slot] = value;
            }
            Opcode::Add => self.binary(i32::wrapping_add)?,
            Opcode::Sub => self.binary(i32::wrapping_sub)?,
            Opcode::Mul => self.binary(i32::wrapping_mul)?,
            Opcode::DivMod => {
                let b = self.pop()?;
                let a = self.pop()?;
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { ip: self.current });
                }
                self.push(a.wrapping_div(b))?;
                self.push(a.wrapping_rem(b))?;
            }
            Opcode::Eq => self.binary(|a, b| i32::from(a == b))?,
            Opcode::Ne => self.binary(|a, b| i32::from(a != b))?,
            Opcode::Lt => self.binary(|a, b| i32::from(a < b))?,
            Opcode::Gt => self.binary(|a, b| i32::from(a > b))?,
            Opcode::And => self.binary(|a, b| a & b)?,
            Opcode::Or => self.binary(|a, b| a | b)?,
            Opcode::Xor => self.binary(|a, b| a ^ b)?,
            Opcode::Shift => self.binary(shift)?,
            Opcode::Syscall0
            | Opcode::Syscall1
            | Opcode::Syscall2
            | Opcode::Syscall3
            | Opcode::Syscall4 => {
                let arity = op.syscall_arity().unwrap_or_default();
                self.syscall(arity, host, tracer)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn push(&mut self, value: i32) -> Result<(), RuntimeError> {
        if self.stack.len() >= self.limits.data_stack_depth {
            return Err(RuntimeError::StackOverflow { ip: self.current });
        }
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<i32, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { ip: self.current })
    }

    fn rpush(&mut self, value: i32) -> Result<(), RuntimeError> {
        if self.return_stack.len() >= self.limits.return_stack_depth {
            return Err(RuntimeError::ReturnStackOverflow { ip: self.current });
        }
        self.return_stack.push(value);
        Ok(())
    }

    fn rpop(&mut self) -> Result<i32, RuntimeError> {
        self.return_stack
            .pop()
            .ok_or(RuntimeError::ReturnStackUnderflow { ip: self.current })
    }

    fn binary(&mut self, f: impl FnOnce(i32, i32) -> i32) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(f(a, b))
    }

    /// Negative targets fail here; targets past the end fail on the next fetch.
    fn jump(&mut self, addr: i32) -> Result<(), RuntimeError> {
        self.ip = usize::try_from(addr).map_err(|_| RuntimeError::IpOutOfBounds {
            target: i64::from(addr),
        })?;
        Ok(())
    }

    fn call<T: Tracer>(&mut self, addr: i32, tracer: &mut T) -> Result<(), RuntimeError> {
        // Return addresses are image indices, which always fit a cell.
        self.rpush(self.ip as i32)?;
        tracer.trace_call(addr);
        self.jump(addr)
    }

    fn memory_slot(&self, addr: i32) -> Result<usize, RuntimeError> {
        usize::try_from(addr)
            .ok()
            .filter(|&slot| slot < self.memory.len())
            .ok_or(RuntimeError::MemoryOutOfBounds {
                ip: self.current,
                addr,
            })
    }

    fn syscall<S: Syscalls, T: Tracer>(
        &mut self,
        arity: usize,
        host: &mut S,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let number = self.pop()?;
        let mut args = Vec::with_capacity(arity);
        for _ in 0..arity {
            args.push(self.pop()?);
        }
        args.reverse();
        tracer.trace_syscall(number, &args);
        host.syscall(number, &args)
    }
}

/// `a << b`, or an arithmetic `a >> |b|` when `b` is negative.
fn shift(a: i32, b: i32) -> i32 {
    let n = b.unsigned_abs();
    if b >= 0 {
        a.checked_shl(n).unwrap_or(0)
    } else {
        a.checked_shr(n).unwrap_or(if a < 0 { -1 } else { 0 })
    }
}
