use crate::{
    ast::statements::{CallStmt, IfStmt, ReturnStmt, Statement, VarDeclStmt, WhileStmt},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::Compiler,
    expr::{gen_condition, gen_expression},
    isa::{Instruction, Register, MAX_ARGUMENTS},
};

pub fn gen_statement(compiler: &mut Compiler, statement: &Statement) -> Result<(), Error> {
    match statement {
        Statement::VarDecl(stmt) => gen_var_decl(compiler, stmt),
        Statement::If(stmt) => gen_if(compiler, stmt),
        Statement::While(stmt) => gen_while(compiler, stmt),
        Statement::Call(stmt) => gen_call(compiler, stmt),
        Statement::Return(stmt) => gen_return(compiler, stmt),
    }
}

fn gen_block(compiler: &mut Compiler, body: &[Statement]) -> Result<(), Error> {
    for statement in body {
        gen_statement(compiler, statement)?;
    }
    Ok(())
}

// The value is lowered before the target is allocated, so `x = x + 1;`
// needs an earlier `x`.
fn gen_var_decl(compiler: &mut Compiler, stmt: &VarDeclStmt) -> Result<(), Error> {
    gen_expression(compiler, &stmt.value, Register::ACCUMULATOR)?;

    let address = compiler
        .storage
        .resolve_or_allocate(&stmt.identifier, &stmt.span.start)?;
    compiler.emit(Instruction::Ldi(Register::SCRATCH, address));
    compiler.emit(Instruction::Str(Register::SCRATCH, Register::ACCUMULATOR, 0));

    Ok(())
}

fn gen_if(compiler: &mut Compiler, stmt: &IfStmt) -> Result<(), Error> {
    let end = compiler.new_label("if_end");

    gen_condition(compiler, &stmt.condition, &end)?;
    gen_block(compiler, &stmt.body)?;
    compiler.define_label(&end, &stmt.span.end)
}

fn gen_while(compiler: &mut Compiler, stmt: &WhileStmt) -> Result<(), Error> {
    let start = compiler.new_label("while_start");
    let end = compiler.new_label("while_end");

    compiler.define_label(&start, &stmt.span.start)?;
    gen_condition(compiler, &stmt.condition, &end)?;
    gen_block(compiler, &stmt.body)?;
    compiler.emit(Instruction::Jmp(start));
    compiler.define_label(&end, &stmt.span.end)
}

fn gen_call(compiler: &mut Compiler, stmt: &CallStmt) -> Result<(), Error> {
    if stmt.arguments.len() > MAX_ARGUMENTS {
        return Err(Error::new(
            ErrorImpl::TooManyArguments {
                limit: MAX_ARGUMENTS,
                received: stmt.arguments.len(),
            },
            stmt.span.start.clone(),
        ));
    }

    for (index, argument) in stmt.arguments.iter().enumerate() {
        gen_expression(compiler, argument, Register::argument(index))?;
    }

    let class = stmt
        .class
        .clone()
        .unwrap_or_else(|| compiler.current_class.clone());
    let label = compiler.method_label(&class, &stmt.identifier);
    compiler.emit(Instruction::Cal(label));

    Ok(())
}

fn gen_return(compiler: &mut Compiler, stmt: &ReturnStmt) -> Result<(), Error> {
    if let Some(value) = &stmt.value {
        gen_expression(compiler, value, Register::RESULT)?;
    }
    compiler.emit(Instruction::Ret);

    Ok(())
}
