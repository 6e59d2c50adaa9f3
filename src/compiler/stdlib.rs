//! Arithmetic subroutines for the operations the ISA lacks.
//!
//! Each routine reads its operands from `r11` (left) and `r12` (right),
//! leaves the result in `r13` and may clobber `r14`. They are appended once
//! per program, after every method body, and only when something calls them.

use crate::ast::expressions::BinaryOperator;

use super::isa::{BranchCondition, Instruction, Line, Register};

const LEFT: Register = Register::SUB_LEFT;
const RIGHT: Register = Register::SUB_RIGHT;
const RESULT: Register = Register::SUB_RESULT;
const SCRATCH: Register = Register::SCRATCH;

/// Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subroutine {
    Mul,
    Div,
    Mod,
}

impl Subroutine {
    pub const ALL: [Subroutine; 3] = [Subroutine::Mul, Subroutine::Div, Subroutine::Mod];

    pub fn for_operator(operator: BinaryOperator) -> Option<Subroutine> {
        match operator {
            BinaryOperator::Multiply => Some(Subroutine::Mul),
            BinaryOperator::Divide => Some(Subroutine::Div),
            BinaryOperator::Modulo => Some(Subroutine::Mod),
            BinaryOperator::Add | BinaryOperator::Subtract => None,
        }
    }

    /// Entry label.
    pub fn label(&self) -> &'static str {
        match self {
            Subroutine::Mul => "MUL",
            Subroutine::Div => "DIV",
            Subroutine::Mod => "MOD",
        }
    }

    /// Every label the routine defines. User methods may not take these names.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Subroutine::Mul => &["MUL", "MUL_LOOP", "MUL_END"],
            Subroutine::Div => &["DIV", "DIV_LOOP", "DIV_ZERO", "DIV_END"],
            Subroutine::Mod => &["MOD", "MOD_LOOP", "MOD_END"],
        }
    }

    pub fn is_reserved_label(name: &str) -> bool {
        Subroutine::ALL
            .iter()
            .any(|subroutine| subroutine.labels().contains(&name))
    }

    pub fn body(&self) -> Vec<Line> {
        match self {
            Subroutine::Mul => mul_body(),
            Subroutine::Div => div_body(),
            Subroutine::Mod => mod_body(),
        }
    }
}

fn label(name: &str) -> Line {
    Line::Label(name.to_string())
}

fn op(instruction: Instruction) -> Line {
    Line::Op(instruction)
}

// r13 = r11 * r12, adding r11 once per count of r12
fn mul_body() -> Vec<Line> {
    vec![
        label("MUL"),
        op(Instruction::Ldi(RESULT, 0)),
        label("MUL_LOOP"),
        op(Instruction::Cmp(RIGHT, Register::ZERO)),
        op(Instruction::Brh(BranchCondition::Eq, "MUL_END".into())),
        op(Instruction::Add(RESULT, LEFT, RESULT)),
        op(Instruction::Adi(RIGHT, 255)),
        op(Instruction::Jmp("MUL_LOOP".into())),
        label("MUL_END"),
        op(Instruction::Ret),
    ]
}

// r13 = r11 / r12 by repeated subtraction; a zero divisor yields 255
fn div_body() -> Vec<Line> {
    vec![
        label("DIV"),
        op(Instruction::Ldi(RESULT, 0)),
        op(Instruction::Cmp(RIGHT, Register::ZERO)),
        op(Instruction::Brh(BranchCondition::Eq, "DIV_ZERO".into())),
        op(Instruction::Mov(LEFT, SCRATCH)),
        label("DIV_LOOP"),
        op(Instruction::Cmp(SCRATCH, RIGHT)),
        op(Instruction::Brh(BranchCondition::Lt, "DIV_END".into())),
        op(Instruction::Sub(SCRATCH, RIGHT, SCRATCH)),
        op(Instruction::Adi(RESULT, 1)),
        op(Instruction::Jmp("DIV_LOOP".into())),
        label("DIV_ZERO"),
        op(Instruction::Ldi(RESULT, 255)),
        label("DIV_END"),
        op(Instruction::Ret),
    ]
}

// r13 = r11 % r12 by repeated subtraction; a zero divisor yields r11
fn mod_body() -> Vec<Line> {
    vec![
        label("MOD"),
        op(Instruction::Mov(LEFT, RESULT)),
        op(Instruction::Cmp(RIGHT, Register::ZERO)),
        op(Instruction::Brh(BranchCondition::Eq, "MOD_END".into())),
        label("MOD_LOOP"),
        op(Instruction::Cmp(RESULT, RIGHT)),
        op(Instruction::Brh(BranchCondition::Lt, "MOD_END".into())),
        op(Instruction::Sub(RESULT, RIGHT, RESULT)),
        op(Instruction::Jmp("MOD_LOOP".into())),
        label("MOD_END"),
        op(Instruction::Ret),
    ]
}
