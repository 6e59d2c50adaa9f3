//! Expression and condition lowering.
//!
//! An expression is lowered into a destination register picked by the
//! caller. Lowering only ever clobbers the destination and `r10..=r14`, so
//! arguments already placed in `r1..=r8` survive the next argument.

use crate::{
    ast::expressions::{BinaryExpr, BinaryOperator, ComparisonOperator, Condition, Expression, Operand},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::Compiler,
    isa::{BranchCondition, Instruction, Register},
    stdlib::Subroutine,
};

/// Loads a literal as an immediate, or a variable through its address.
pub fn load_operand(compiler: &mut Compiler, operand: &Operand, dest: Register) -> Result<(), Error> {
    match operand {
        Operand::Number(_) | Operand::Character(_) => {
            let value = operand.literal_value().unwrap_or_default();
            compiler.emit(Instruction::Ldi(dest, value));
        }
        Operand::Symbol(symbol) => {
            let address = compiler.resolve_variable(&symbol.value, &symbol.span.start)?;
            compiler.emit(Instruction::Ldi(dest, address));
            compiler.emit(Instruction::Lod(dest, dest, 0));
        }
    }

    Ok(())
}

pub fn gen_expression(compiler: &mut Compiler, expr: &Expression, dest: Register) -> Result<(), Error> {
    match expr {
        Expression::Operand(operand) => load_operand(compiler, operand, dest),
        Expression::Binary(binary) => gen_binary_expression(compiler, binary, dest),
    }
}

fn gen_binary_expression(compiler: &mut Compiler, binary: &BinaryExpr, dest: Register) -> Result<(), Error> {
    match binary.operator {
        BinaryOperator::Add | BinaryOperator::Subtract => {
            load_operand(compiler, &binary.left, dest)?;

            let is_add = binary.operator == BinaryOperator::Add;
            match binary.right.literal_value() {
                // No subtract-immediate: add the two's complement instead
                Some(value) if is_add => compiler.emit(Instruction::Adi(dest, value)),
                Some(value) => compiler.emit(Instruction::Adi(dest, value.wrapping_neg())),
                None => {
                    load_operand(compiler, &binary.right, Register::OPERAND)?;
                    if is_add {
                        compiler.emit(Instruction::Add(dest, Register::OPERAND, dest));
                    } else {
                        compiler.emit(Instruction::Sub(dest, Register::OPERAND, dest));
                    }
                }
            }
        }
        operator => {
            if matches!(operator, BinaryOperator::Divide | BinaryOperator::Modulo)
                && binary.right.literal_value() == Some(0)
            {
                return Err(Error::new(
                    ErrorImpl::DivisionByZero,
                    binary.right.get_span().start.clone(),
                ));
            }

            let subroutine = Subroutine::for_operator(operator).ok_or_else(|| {
                Error::new(
                    ErrorImpl::NotImplementedError {
                        feature: format!("operator `{}`", operator),
                    },
                    binary.span.start.clone(),
                )
            })?;

            load_operand(compiler, &binary.left, Register::SUB_LEFT)?;
            load_operand(compiler, &binary.right, Register::SUB_RIGHT)?;

            let label = compiler.use_subroutine(subroutine);
            compiler.emit(Instruction::Cal(label));
            compiler.emit(Instruction::Mov(Register::SUB_RESULT, dest));
        }
    }

    Ok(())
}

/// Lowers `condition` into a compare and a branch to `skip_label` taken
/// exactly when the condition is false.
pub fn gen_condition(compiler: &mut Compiler, condition: &Condition, skip_label: &str) -> Result<(), Error> {
    let address = compiler.resolve_variable(&condition.left.value, &condition.left.span.start)?;
    compiler.emit(Instruction::Ldi(Register::ACCUMULATOR, address));
    compiler.emit(Instruction::Lod(Register::ACCUMULATOR, Register::ACCUMULATOR, 0));
    load_operand(compiler, &condition.right, Register::OPERAND)?;

    let (swapped, branch) = skip_branch(condition.operator);
    if swapped {
        compiler.emit(Instruction::Cmp(Register::OPERAND, Register::ACCUMULATOR));
    } else {
        compiler.emit(Instruction::Cmp(Register::ACCUMULATOR, Register::OPERAND));
    }
    compiler.emit(Instruction::Brh(branch, skip_label.to_string()));

    Ok(())
}

/// Branch that tests the inverse of `operator`, and whether the compare
/// operands have to be swapped for it. `>` and `<=` have no flag test of
/// their own, so `a <= b` becomes `b >= a` and `a > b` becomes `b < a`.
pub fn skip_branch(operator: ComparisonOperator) -> (bool, BranchCondition) {
    match operator.inverse() {
        ComparisonOperator::Equals => (false, BranchCondition::Eq),
        ComparisonOperator::NotEquals => (false, BranchCondition::Ne),
        ComparisonOperator::GreaterEquals => (false, BranchCondition::Ge),
        ComparisonOperator::Less => (false, BranchCondition::Lt),
        ComparisonOperator::LessEquals => (true, BranchCondition::Ge),
        ComparisonOperator::Greater => (true, BranchCondition::Lt),
    }
}
