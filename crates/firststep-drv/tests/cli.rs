//! End-to-end tests driving the built `firststep` binary (spec.md §8's
//! concrete scenarios plus the CLI surface itself, spec.md §6).

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp source file");
    write!(f, "{contents}").unwrap();
    f
}

fn firststep() -> Command {
    Command::cargo_bin("firststep").expect("binary must build")
}

#[test]
fn s1_minimal_main_returns_its_constant() {
    let f = source_file("main() { return 42 }");
    firststep().arg(f.path()).assert().code(42);
}

#[test]
fn s2_function_call_with_arguments() {
    let f = source_file("add(a,b) { return a + b }\nmain() { return add(2,3) }");
    firststep().arg(f.path()).assert().code(5);
}

#[test]
fn s3_if_else_picks_the_false_branch() {
    let f = source_file("main() { x := 10  if x < 5 { return 1 } else { return 2 } }");
    firststep().arg(f.path()).assert().code(2);
}

#[test]
fn s4_recursive_fibonacci() {
    let f = source_file(
        "fib(n) { if n <= 1 { return n } return fib(n-1) + fib(n-2) }\nmain() { return fib(10) }",
    );
    firststep().arg(f.path()).assert().code(55);
}

#[test]
fn s5_assignment_is_not_an_expression_so_this_is_a_syntax_error() {
    let f = source_file("main() { x := 0  if 0 || (1 && (x = 7)) {} return x }");
    firststep()
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error(parser)"));
}

#[test]
fn s6_arithmetic_with_multiple_locals() {
    let f = source_file("main() { a := 3  b := 4  return a*a + b*b }");
    firststep().arg(f.path()).assert().code(25);
}

#[test]
fn missing_input_argument_exits_with_status_one() {
    firststep().assert().failure().code(1);
}

#[test]
fn nonexistent_source_file_exits_with_status_one() {
    firststep()
        .arg("/no/such/file.fs")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn compile_path_emits_riscv_assembly_to_stdout() {
    let f = source_file("main() { return 1 + 2 }");
    firststep()
        .arg(f.path())
        .arg("-c")
        .assert()
        .success()
        .stdout(predicate::str::contains(".globl main"));
}

#[test]
fn compile_path_writes_to_the_requested_output_file() {
    let src = source_file("main() { return 0 }");
    let out = NamedTempFile::new().unwrap();
    firststep()
        .arg(src.path())
        .arg("-c")
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();
    let asm = std::fs::read_to_string(out.path()).unwrap();
    assert!(asm.contains(".globl main"));
}

#[test]
fn output_flag_without_compile_is_rejected_by_clap() {
    let f = source_file("main() { return 0 }");
    firststep()
        .arg(f.path())
        .arg("-o")
        .arg("out.s")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn interpret_path_reports_total_errors_as_exit_status_on_failure() {
    // Two redefinitions of `f` are two independent interpreter-stage
    // errors; with errors present, `main` never runs at all.
    let f = source_file("f() { return 0 }\nf() { return 1 }\nf() { return 2 }\nmain() { return f() }");
    firststep().arg(f.path()).assert().code(2);
}
