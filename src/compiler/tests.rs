//! Unit tests for code generation.
//!
//! Most tests compare exact assembly: the output text is the contract with
//! the assembler, so instruction order and operand order matter.

use crate::{
    compile,
    config::{CompileOptions, Dialect},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    expr::skip_branch,
    isa::{BranchCondition, Instruction, Line, Register},
    stdlib::Subroutine,
    storage::{Storage, STORAGE_LIMIT},
};
use crate::ast::expressions::ComparisonOperator;

fn compile_cs(source: &str) -> Result<String, Error> {
    compile(source, Some("test.cs".to_string()), &CompileOptions::default())
}

fn asm(source: &str) -> String {
    compile_cs(source).unwrap()
}

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn test_minimal_program_layout() {
    let output = asm("void Main() { }");

    assert_eq!(lines(&output), vec!["cal .Main", "hlt", ".Main", "ret", "hlt"]);
}

#[test]
fn test_variable_declaration_and_reuse() {
    let output = asm("void Main() { int x = 7; x = 3; int y = x; }");

    assert_eq!(
        lines(&output)[2..],
        [
            ".Main",
            "ldi r9 7",
            "ldi r14 0",
            "str r14 r9 0",
            "ldi r9 3",
            "ldi r14 0",
            "str r14 r9 0",
            "ldi r9 0",
            "lod r9 r9 0",
            "ldi r14 1",
            "str r14 r9 0",
            "ret",
            "hlt",
        ]
    );
}

#[test]
fn test_add_and_subtract_immediate() {
    let output = asm("void Main() { int a = 10; a = a + 5; a = a - 3; }");

    assert!(output.contains("lod r9 r9 0\nadi r9 5\n"));
    // 256 - 3
    assert!(output.contains("lod r9 r9 0\nadi r9 253\n"));
}

#[test]
fn test_add_and_subtract_registers() {
    let output = asm("void Main() { int a = 10; int b = 4; int c = a + b; c = a - b; }");

    assert!(output.contains("ldi r9 0\nlod r9 r9 0\nldi r10 1\nlod r10 r10 0\nadd r9 r10 r9\n"));
    assert!(output.contains("sub r9 r10 r9\n"));
}

#[test]
fn test_multiply_calls_subroutine() {
    let output = asm("void Main() { int a = 3; int b = 4; int z = a * b; }");

    assert!(output.contains(
        "ldi r11 0\nlod r11 r11 0\nldi r12 1\nlod r12 r12 0\ncal .MUL\nmov r13 r9\nldi r14 2\nstr r14 r9 0\n"
    ));
    assert!(output.contains("\n.MUL\n"));
    assert!(!output.contains(".DIV"));
    assert!(!output.contains(".MOD"));
    assert!(output.ends_with("ret\nhlt\n"));
}

#[test]
fn test_subroutines_emitted_once_in_fixed_order() {
    let output = asm(
        "void Main() { int a = 9; int b = a % 4; int c = a / 2; int d = a * 2; int e = b * c; }",
    );

    let labels: Vec<&str> = lines(&output)
        .into_iter()
        .filter(|line| matches!(*line, ".MUL" | ".DIV" | ".MOD"))
        .collect();
    assert_eq!(labels, vec![".MUL", ".DIV", ".MOD"]);
}

#[test]
fn test_if_greater_branches_on_less_equal() {
    let output = asm("void Main() { int x = 6; int y = 0; if (x > 5) { y = 1; } }");

    assert!(output.contains(
        "ldi r9 0\nlod r9 r9 0\nldi r10 5\ncmp r10 r9\nbrh ge .if_end_0\nldi r9 1\nldi r14 1\nstr r14 r9 0\n.if_end_0\n"
    ));
}

#[test]
fn test_while_loop_shape() {
    let output = asm("void Main() { int x = 0; while (x < 10) { x = x + 1; } }");

    assert!(output.contains(
        ".while_start_0\nldi r9 0\nlod r9 r9 0\nldi r10 10\ncmp r9 r10\nbrh ge .while_end_1\n"
    ));
    assert!(output.contains("adi r9 1\nldi r14 0\nstr r14 r9 0\njmp .while_start_0\n.while_end_1\n"));
}

#[test]
fn test_nested_labels_are_unique() {
    let output = asm(
        "void Main() {
            int x = 0;
            while (x < 3) {
                if (x == 1) { x = 2; }
                if (x != 1) { x = x + 1; }
            }
        }",
    );

    let mut defined: Vec<&str> = lines(&output)
        .into_iter()
        .filter(|line| line.starts_with('.'))
        .collect();
    let count = defined.len();
    defined.sort();
    defined.dedup();
    assert_eq!(defined.len(), count);
    assert!(output.contains("brh ne .if_end_2"));
    assert!(output.contains("brh eq .if_end_3"));
}

#[test]
fn test_call_marshals_arguments_in_order() {
    let output = asm("void foo(int a, int b) { } void Main() { int x = 9; foo(5, x); }");

    assert!(output.contains("ldi r1 5\nldi r2 2\nlod r2 r2 0\ncal .foo\n"));
}

#[test]
fn test_method_prologue_stores_parameters() {
    let output = asm("void foo(int a, int b) { return a; } void Main() { }");

    assert!(output.contains(".foo\nldi r14 0\nstr r14 r1 0\nldi r14 1\nstr r14 r2 0\nldi r1 0\nlod r1 r1 0\nret\nret\n"));
}

#[test]
fn test_binary_call_argument_goes_straight_to_register() {
    let output = asm("void foo(int a, int b) { } void Main() { int x = 2; foo(x + 1, x * 3); }");

    assert!(output.contains("ldi r1 2\nlod r1 r1 0\nadi r1 1\n"));
    assert!(output.contains("cal .MUL\nmov r13 r2\ncal .foo\n"));
}

#[test]
fn test_return_without_value() {
    let output = asm("void Main() { return; }");

    assert_eq!(lines(&output), vec!["cal .Main", "hlt", ".Main", "ret", "ret", "hlt"]);
}

#[test]
fn test_statements_after_return_are_kept() {
    let output = asm("void Main() { return 1; int x = 2; }");

    assert!(output.contains("ldi r1 1\nret\nldi r9 2\n"));
}

#[test]
fn test_char_literal_is_ordinal() {
    let output = asm("void Main() { int c = 'A'; }");

    assert!(output.contains("ldi r9 65\n"));
}

#[test]
fn test_vortex_labels_are_qualified() {
    let source = "public class Main {
        public static void main() { helper(1); Math.square(2); }
        static void helper(byte v) { }
    }";
    let options = CompileOptions::new(Dialect::VortexScript);
    let output = compile(source, Some("main.vsc".to_string()), &options).unwrap();

    assert!(output.starts_with("cal .Main_main\nhlt\n.Main_main\n"));
    assert!(output.contains("cal .Main_helper\n"));
    assert!(output.contains("cal .Math_square\n"));
    assert!(output.contains("\n.Main_helper\n"));
}

#[test]
fn test_entry_point_need_not_be_first() {
    let output = asm("void helper() { } void main() { helper(); }");

    assert!(output.starts_with("cal .main\nhlt\n.helper\n"));
}

#[test]
fn test_undeclared_variable() {
    let error = compile_cs("void Main() { int a = b + 1; }").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::VariableNotDeclared { variable: "b".to_string() });
}

#[test]
fn test_self_assignment_needs_declaration() {
    let error = compile_cs("void Main() { x = x + 1; }").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::VariableNotDeclared { variable: "x".to_string() });
}

#[test]
fn test_undeclared_condition_operand() {
    let error = compile_cs("void Main() { int a = 1; if (a < limit) { } }").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::VariableNotDeclared { variable: "limit".to_string() });
}

#[test]
fn test_literal_division_by_zero() {
    let error = compile_cs("void Main() { int a = 1; int b = a / 0; }").unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::DivisionByZero);

    let error = compile_cs("void Main() { int a = 1; int b = a % 0; }").unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::DivisionByZero);
}

#[test]
fn test_missing_entry_point() {
    let error = compile_cs("void helper() { }").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::MissingEntryPoint);
}

#[test]
fn test_duplicate_method() {
    let error = compile_cs("void Main() { } void Main() { }").unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::FunctionAlreadyDeclared { function: "Main".to_string() }
    );
}

#[test]
fn test_method_named_like_subroutine() {
    let error = compile_cs("void MUL() { } void Main() { }").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::FunctionAlreadyDeclared { function: "MUL".to_string() });
}

#[test]
fn test_too_many_arguments() {
    let error = compile_cs("void Main() { f(1, 2, 3, 4, 5, 6, 7, 8, 9); }").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::TooManyArguments { limit: 8, received: 9 });
}

#[test]
fn test_too_many_parameters() {
    let error = compile_cs(
        "void f(int a, int b, int c, int d, int e, int g, int h, int i, int j) { } void Main() { }",
    )
    .unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::TooManyArguments { limit: 8, received: 9 });
}

#[test]
fn test_fresh_state_per_compilation() {
    let source = "void Main() { int a = 1; if (a == 1) { a = 2; } }";

    assert_eq!(asm(source), asm(source));
}

#[test]
fn test_storage_identity_and_limit() {
    let position = Position::null();
    let mut storage = Storage::new();

    let first = storage.resolve_or_allocate("a", &position).unwrap();
    let second = storage.resolve_or_allocate("b", &position).unwrap();
    assert_eq!((first, second), (0, 1));
    assert_eq!(storage.resolve_or_allocate("a", &position).unwrap(), 0);

    for index in storage.len()..STORAGE_LIMIT {
        storage.resolve_or_allocate(&format!("v{}", index), &position).unwrap();
    }
    assert_eq!(storage.len(), STORAGE_LIMIT);

    let error = storage.resolve_or_allocate("overflow", &position).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::StorageExhausted { limit: STORAGE_LIMIT });
}

#[test]
fn test_skip_branches() {
    assert_eq!(skip_branch(ComparisonOperator::Equals), (false, BranchCondition::Ne));
    assert_eq!(skip_branch(ComparisonOperator::NotEquals), (false, BranchCondition::Eq));
    assert_eq!(skip_branch(ComparisonOperator::Less), (false, BranchCondition::Ge));
    assert_eq!(skip_branch(ComparisonOperator::GreaterEquals), (false, BranchCondition::Lt));
    assert_eq!(skip_branch(ComparisonOperator::Greater), (true, BranchCondition::Ge));
    assert_eq!(skip_branch(ComparisonOperator::LessEquals), (true, BranchCondition::Lt));
}

#[test]
fn test_instruction_text() {
    let line = Line::Op(Instruction::Brh(BranchCondition::Lt, "DIV_END".to_string()));
    assert_eq!(line.to_string(), "brh lt .DIV_END");

    let line = Line::Op(Instruction::Str(Register::SCRATCH, Register::ACCUMULATOR, 0));
    assert_eq!(line.to_string(), "str r14 r9 0");

    assert_eq!(Line::Label("Main".to_string()).to_string(), ".Main");
}

#[test]
fn test_subroutine_labels_are_reserved() {
    assert!(Subroutine::is_reserved_label("DIV_ZERO"));
    assert!(!Subroutine::is_reserved_label("Main"));
    assert_eq!(Subroutine::Mod.body()[0], Line::Label("MOD".to_string()));
}
