//! BatPU-2 instruction model.
//!
//! Generation builds `Line`s and only turns them into text at the very end;
//! the reference machine parses that text back into the same types.

use std::fmt::Display;

/// Number of general purpose registers, `r0` included.
pub const REGISTER_COUNT: usize = 16;

/// Registers `r1..=r8` carry call arguments.
pub const MAX_ARGUMENTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(pub u8);

impl Register {
    /// Always reads zero.
    pub const ZERO: Register = Register(0);
    /// Return value, also the first argument.
    pub const RESULT: Register = Register(1);
    pub const ACCUMULATOR: Register = Register(9);
    pub const OPERAND: Register = Register(10);
    pub const SUB_LEFT: Register = Register(11);
    pub const SUB_RIGHT: Register = Register(12);
    pub const SUB_RESULT: Register = Register(13);
    pub const SCRATCH: Register = Register(14);

    /// Register holding argument `index` (0-based) of a call.
    pub fn argument(index: usize) -> Register {
        Register(index as u8 + 1)
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Flag test of `brh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchCondition {
    /// zero set
    Eq,
    /// zero clear
    Ne,
    /// carry set, unsigned `>=` after `cmp`
    Ge,
    /// carry clear, unsigned `<` after `cmp`
    Lt,
}

impl BranchCondition {
    pub fn from_name(name: &str) -> Option<BranchCondition> {
        match name {
            "eq" | "zero" | "=" | "z" => Some(BranchCondition::Eq),
            "ne" | "notzero" | "!=" | "nz" => Some(BranchCondition::Ne),
            "ge" | "carry" | ">=" | "c" => Some(BranchCondition::Ge),
            "lt" | "notcarry" | "<" | "nc" => Some(BranchCondition::Lt),
            _ => None,
        }
    }
}

impl Display for BranchCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BranchCondition::Eq => "eq",
            BranchCondition::Ne => "ne",
            BranchCondition::Ge => "ge",
            BranchCondition::Lt => "lt",
        };
        write!(f, "{}", name)
    }
}

/// One machine instruction. Label operands are stored without the leading `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Hlt,
    /// `c = a + b`
    Add(Register, Register, Register),
    /// `c = a - b`
    Sub(Register, Register, Register),
    Ldi(Register, u8),
    Adi(Register, u8),
    /// `b = mem[a + offset]`
    Lod(Register, Register, i8),
    /// `mem[a + offset] = b`
    Str(Register, Register, i8),
    Cmp(Register, Register),
    /// `c = a`
    Mov(Register, Register),
    Jmp(String),
    Brh(BranchCondition, String),
    Cal(String),
    Ret,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Hlt => write!(f, "hlt"),
            Instruction::Add(a, b, c) => write!(f, "add {} {} {}", a, b, c),
            Instruction::Sub(a, b, c) => write!(f, "sub {} {} {}", a, b, c),
            Instruction::Ldi(a, imm) => write!(f, "ldi {} {}", a, imm),
            Instruction::Adi(a, imm) => write!(f, "adi {} {}", a, imm),
            Instruction::Lod(a, b, offset) => write!(f, "lod {} {} {}", a, b, offset),
            Instruction::Str(a, b, offset) => write!(f, "str {} {} {}", a, b, offset),
            Instruction::Cmp(a, b) => write!(f, "cmp {} {}", a, b),
            Instruction::Mov(a, c) => write!(f, "mov {} {}", a, c),
            Instruction::Jmp(label) => write!(f, "jmp .{}", label),
            Instruction::Brh(cond, label) => write!(f, "brh {} .{}", cond, label),
            Instruction::Cal(label) => write!(f, "cal .{}", label),
            Instruction::Ret => write!(f, "ret"),
        }
    }
}

/// A line of assembly: a label definition or an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Label(String),
    Op(Instruction),
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Label(name) => write!(f, ".{}", name),
            Line::Op(instruction) => write!(f, "{}", instruction),
        }
    }
}

/// Joins lines into assembly text, one per line, newline terminated.
pub fn render(lines: &[Line]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(&line.to_string());
        text.push('\n');
    }
    text
}
