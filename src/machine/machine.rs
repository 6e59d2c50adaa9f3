use tracing::{debug, instrument, trace};

use crate::compiler::isa::{BranchCondition, Instruction, Register, REGISTER_COUNT};

use super::{
    assembly::{assemble, Assembly},
    error::{MachineError, MachineResult},
};

pub const MEMORY_SIZE: usize = 256;
pub const CALL_STACK_DEPTH: usize = 16;
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Register file, data memory, flags and call stack of one BatPU-2.
///
/// Memory-mapped I/O is not modelled: addresses 240..=255 behave as plain
/// memory.
#[derive(Debug, Clone)]
pub struct Machine {
    registers: [u8; REGISTER_COUNT],
    memory: [u8; MEMORY_SIZE],
    zero: bool,
    carry: bool,
    pc: usize,
    call_stack: Vec<usize>,
    steps: usize,
    step_limit: usize,
    halted: bool,
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Machine::with_step_limit(DEFAULT_STEP_LIMIT)
    }

    pub fn with_step_limit(step_limit: usize) -> Self {
        Machine {
            registers: [0; REGISTER_COUNT],
            memory: [0; MEMORY_SIZE],
            zero: false,
            carry: false,
            pc: 0,
            call_stack: Vec::with_capacity(CALL_STACK_DEPTH),
            steps: 0,
            step_limit,
            halted: false,
        }
    }

    pub fn register(&self, register: Register) -> u8 {
        self.registers[register.0 as usize]
    }

    /// Writes to `r0` are discarded.
    pub fn set_register(&mut self, register: Register, value: u8) {
        if register != Register::ZERO {
            self.registers[register.0 as usize] = value;
        }
    }

    pub fn memory(&self, address: u8) -> u8 {
        self.memory[address as usize]
    }

    pub fn set_memory(&mut self, address: u8, value: u8) {
        self.memory[address as usize] = value;
    }

    /// `(zero, carry)`
    pub fn flags(&self) -> (bool, bool) {
        (self.zero, self.carry)
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Starts execution at `label` instead of the first instruction.
    pub fn jump_to(&mut self, assembly: &Assembly, label: &str) -> MachineResult<()> {
        self.pc = assembly.label_address(label)?;
        self.halted = false;
        Ok(())
    }

    fn add_with_flags(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let sum = a as u16 + b as u16 + carry_in as u16;
        let result = sum as u8;
        self.carry = sum > 0xFF;
        self.zero = result == 0;
        result
    }

    // a - b as a + !b + 1, so carry means no borrow
    fn sub_with_flags(&mut self, a: u8, b: u8) -> u8 {
        self.add_with_flags(a, !b, true)
    }

    fn condition_holds(&self, condition: BranchCondition) -> bool {
        match condition {
            BranchCondition::Eq => self.zero,
            BranchCondition::Ne => !self.zero,
            BranchCondition::Ge => self.carry,
            BranchCondition::Lt => !self.carry,
        }
    }

    /// Executes one instruction. Returns `false` once the machine has halted.
    pub fn step(&mut self, assembly: &Assembly) -> MachineResult<bool> {
        if self.halted {
            return Ok(false);
        }
        if self.steps >= self.step_limit {
            return Err(MachineError::StepLimitExceeded(self.step_limit));
        }

        let instruction = assembly
            .instructions
            .get(self.pc)
            .ok_or(MachineError::PCOutOfBounds(self.pc))?;
        trace!(pc = self.pc, %instruction, "step");

        self.steps += 1;
        let mut next = self.pc + 1;

        match instruction {
            Instruction::Hlt => {
                self.halted = true;
                return Ok(false);
            }
            Instruction::Add(a, b, c) => {
                let result = self.add_with_flags(self.register(*a), self.register(*b), false);
                self.set_register(*c, result);
            }
            Instruction::Sub(a, b, c) => {
                let result = self.sub_with_flags(self.register(*a), self.register(*b));
                self.set_register(*c, result);
            }
            Instruction::Ldi(a, value) => self.set_register(*a, *value),
            Instruction::Adi(a, value) => {
                let result = self.add_with_flags(self.register(*a), *value, false);
                self.set_register(*a, result);
            }
            Instruction::Lod(a, b, offset) => {
                let address = self.register(*a).wrapping_add_signed(*offset);
                let value = self.memory(address);
                self.set_register(*b, value);
            }
            Instruction::Str(a, b, offset) => {
                let address = self.register(*a).wrapping_add_signed(*offset);
                self.set_memory(address, self.register(*b));
            }
            Instruction::Cmp(a, b) => {
                self.sub_with_flags(self.register(*a), self.register(*b));
            }
            // `mov` is `add a r0 c` and sets flags the same way
            Instruction::Mov(a, c) => {
                let result = self.add_with_flags(self.register(*a), 0, false);
                self.set_register(*c, result);
            }
            Instruction::Jmp(label) => next = assembly.label_address(label)?,
            Instruction::Brh(condition, label) => {
                if self.condition_holds(*condition) {
                    next = assembly.label_address(label)?;
                }
            }
            Instruction::Cal(label) => {
                if self.call_stack.len() >= CALL_STACK_DEPTH {
                    return Err(MachineError::CallStackOverflow(self.pc));
                }
                self.call_stack.push(next);
                next = assembly.label_address(label)?;
            }
            Instruction::Ret => {
                next = self
                    .call_stack
                    .pop()
                    .ok_or(MachineError::CallStackUnderflow(self.pc))?;
            }
        }

        self.pc = next;
        Ok(true)
    }

    /// Runs until `hlt`.
    #[instrument(skip_all, fields(instructions = assembly.len()))]
    pub fn run(&mut self, assembly: &Assembly) -> MachineResult<()> {
        while self.step(assembly)? {}

        debug!(steps = self.steps, "halted");
        Ok(())
    }
}

/// Assembles `text` and runs it from the first instruction on a fresh machine.
pub fn run_text(text: &str) -> MachineResult<Machine> {
    let assembly = assemble(text)?;
    let mut machine = Machine::new();
    machine.run(&assembly)?;

    Ok(machine)
}
