//! End-to-end tests: compile source text and run the emitted assembly on
//! the reference machine.

use vortexc::{
    compile,
    compiler::isa::Register,
    config::{CompileOptions, Dialect},
    errors::errors::ErrorImpl,
    format_error,
    machine::machine::{run_text, Machine},
};

fn compile_cs(source: &str) -> String {
    compile(source, Some("test.cs".to_string()), &CompileOptions::default()).unwrap()
}

fn run_cs(source: &str) -> Machine {
    let assembly = compile_cs(source);
    run_text(&assembly).unwrap()
}

fn run_vsc(source: &str) -> Machine {
    let options = CompileOptions::new(Dialect::VortexScript);
    let assembly = compile(source, Some("test.vsc".to_string()), &options).unwrap();
    run_text(&assembly).unwrap()
}

#[test]
fn test_if_body_runs_only_when_condition_holds() {
    let taken = run_cs("void Main() { int x = 6; int y = 0; if (x > 5) { y = 1; } }");
    assert_eq!(taken.memory(1), 1);

    let skipped = run_cs("void Main() { int x = 5; int y = 0; if (x > 5) { y = 1; } }");
    assert_eq!(skipped.memory(1), 0);
}

#[test]
fn test_while_loop_counts_up() {
    let machine = run_cs("void Main() { int x = 0; while (x < 10) { x = x + 1; } }");

    assert_eq!(machine.memory(0), 10);
}

#[test]
fn test_while_loop_runs_zero_times() {
    let machine = run_cs("void Main() { int x = 10; int n = 0; while (x < 10) { x = x + 1; n = n + 1; } }");

    assert_eq!(machine.memory(0), 10);
    assert_eq!(machine.memory(1), 0);
}

#[test]
fn test_multiply() {
    let machine = run_cs("void Main() { int a = 3; int b = 4; int z = a * b; }");
    assert_eq!(machine.memory(2), 12);

    let machine = run_cs("void Main() { int a = 3; int b = 0; int z = a * b; }");
    assert_eq!(machine.memory(2), 0);
}

#[test]
fn test_divide_and_modulo() {
    let machine = run_cs("void Main() { int a = 17; int q = a / 5; int r = a % 5; int s = 3 % a; }");

    assert_eq!(machine.memory(1), 3);
    assert_eq!(machine.memory(2), 2);
    assert_eq!(machine.memory(3), 3);
}

#[test]
fn test_runtime_division_by_zero_is_defined() {
    let machine = run_cs("void Main() { int a = 17; int zero = 0; int q = a / zero; int r = a % zero; }");

    assert_eq!(machine.memory(2), 255);
    assert_eq!(machine.memory(3), 17);
}

#[test]
fn test_subtraction_wraps() {
    let machine = run_cs("void Main() { int a = 3; int b = 5; int c = a - b; int d = a - 5; int e = 250 + 10; }");

    assert_eq!(machine.memory(2), 254);
    assert_eq!(machine.memory(3), 254);
    assert_eq!(machine.memory(4), 4);
}

#[test]
fn test_call_passes_arguments() {
    let machine = run_cs(
        "void foo(int p, int q) { int s = p + q; }
         void Main() { int x = 9; foo(5, x); }",
    );

    // p, q and s are allocated while generating foo, x afterwards
    assert_eq!(machine.memory(0), 5);
    assert_eq!(machine.memory(1), 9);
    assert_eq!(machine.memory(2), 14);
    assert_eq!(machine.memory(3), 9);
}

#[test]
fn test_binary_arguments() {
    let machine = run_cs(
        "void foo(int p, int q) { }
         void Main() { int x = 4; foo(x - 1, x * x); }",
    );

    assert_eq!(machine.memory(0), 3);
    assert_eq!(machine.memory(1), 16);
}

#[test]
fn test_return_value_lands_in_r1() {
    let machine = run_cs("int Main() { int a = 6; return a * 7; }");

    assert_eq!(machine.register(Register::RESULT), 42);
    assert!(machine.is_halted());
}

#[test]
fn test_every_comparison_operator() {
    let operators = ["==", "!=", "<", ">", "<=", ">="];
    let pairs = [(3u8, 7u8), (7, 3), (5, 5), (0, 255)];

    for operator in operators {
        for (left, right) in pairs {
            let source = format!(
                "void Main() {{ int a = {}; int b = {}; int hit = 0; if (a {} b) {{ hit = 1; }} }}",
                left, right, operator
            );
            let expected = match operator {
                "==" => left == right,
                "!=" => left != right,
                "<" => left < right,
                ">" => left > right,
                "<=" => left <= right,
                _ => left >= right,
            };

            let machine = run_cs(&source);
            assert_eq!(machine.memory(2), u8::from(expected), "{} {} {}", left, operator, right);
        }
    }
}

#[test]
fn test_nested_loops() {
    let machine = run_cs(
        "void Main() {
            int i = 0;
            int total = 0;
            while (i < 4) {
                int j = 0;
                while (j < 3) {
                    total = total + 1;
                    j = j + 1;
                }
                i = i + 1;
            }
        }",
    );

    assert_eq!(machine.memory(1), 12);
}

#[test]
fn test_vortex_program_with_classes() {
    let machine = run_vsc(
        "import \"math.vsc\";
         public class Main {
             public static byte main() {
                 byte n = 0b110;
                 Math.double(n);
                 return n;
             }
         }
         public class Math {
             public static byte double(byte value) {
                 byte result = value + value;
                 return result;
             }
         }",
    );

    assert_eq!(machine.memory(2), 12);
    assert_eq!(machine.register(Register::RESULT), 6);
}

#[test]
fn test_sample_programs() {
    let machine = run_cs(include_str!("../programs/functions.cs"));
    assert_eq!(machine.memory(1), 55);
    assert_eq!(machine.memory(3), 9);
    assert_eq!(machine.register(Register::RESULT), 15);

    let machine = run_vsc(include_str!("../programs/counter.vsc"));
    assert_eq!(machine.memory(1), 5);
    assert_eq!(machine.memory(3), 25);
    assert_eq!(machine.register(Register::RESULT), 5);
}

#[test]
fn test_output_ends_with_halt() {
    for source in [
        "void Main() { }",
        "void Main() { int a = 1; int b = a * 2; }",
        "void helper() { } int main() { return 3; }",
    ] {
        let assembly = compile_cs(source);
        assert!(!assembly.is_empty());
        assert_eq!(assembly.lines().last(), Some("hlt"));
    }
}

#[test]
fn test_compilation_is_deterministic() {
    let source = include_str!("../programs/functions.cs");

    assert_eq!(compile_cs(source), compile_cs(source));
}

#[test]
fn test_error_report_points_at_source() {
    let source = "void Main() {\n    int a = 1;\n    int b = c;\n}\n";
    let error = compile(source, Some("bad.cs".to_string()), &CompileOptions::default()).unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::VariableNotDeclared { variable: "c".to_string() });

    let report = format_error(&error, source);
    assert!(report.starts_with("Error: VariableNotDeclared"));
    assert!(report.contains("-> bad.cs"));
    assert!(report.contains("3 | int b = c;"));
    assert!(report.ends_with("  | --------^"));
}

#[test]
fn test_unrecognised_character_is_reported() {
    let error = compile("void Main() { int a = 1 @ 2; }", None, &CompileOptions::default()).unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnrecognisedToken { token: "@".to_string() });
    assert_eq!(error.get_position().0, 24);
}
