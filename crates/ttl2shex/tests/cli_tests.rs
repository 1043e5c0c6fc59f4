//! CLI integration tests.
//!
//! These tests invoke the `ttl2shex` binary via `std::process::Command`
//! against files written to a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the built binary (set by cargo test).
fn binary_path() -> PathBuf {
    // `cargo test` places the test binary next to the main binary
    let mut path = std::env::current_exe()
        .expect("current_exe")
        .parent()
        .expect("parent")
        .parent()
        .expect("grandparent")
        .to_path_buf();
    path.push("ttl2shex");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("failed to execute binary")
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path.to_str().expect("utf-8 path").to_string()
}

const LOAN_TTL: &str = "@prefix ex: <http://ex.org/> .\n\
                        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
                        ex:a a ex:Loan ; ex:rate \"5.0\"^^xsd:decimal ; ex:label \"car\" .\n";

#[test]
fn synth_writes_shape_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "loan.ttl", LOAN_TTL);

    let output = run(&["synth", &input, "-q"]);
    assert!(
        output.status.success(),
        "ttl2shex failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert!(stdout.contains("<#LoanShape> {\n"));
    assert!(stdout.contains("\tex:rate xsd:decimal ;\n\tex:label xsd:string\n}"));
}

#[test]
fn synth_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "loan.ttl", LOAN_TTL);
    let out = dir.path().join("loan.shex");

    let output = run(&["synth", &input, "-o", out.to_str().unwrap(), "-q"]);
    assert!(output.status.success());

    let shape = fs::read_to_string(&out).unwrap();
    assert!(shape.starts_with("PREFIX ex: <http://ex.org/>\n"));
}

#[test]
fn synth_without_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "untyped.ttl",
        "@prefix ex: <http://ex.org/> .\nex:a ex:rate 5 .\n",
    );

    let output = run(&["synth", &input, "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no rdf:type triple"));
}

#[test]
fn parse_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "loan.shex",
        "PREFIX ex: <http://ex.org/>\n<#LoanShape> { a [ex:Loan] ; ex:rate . }\n",
    );

    let output = run(&["parse", &input]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["shapes"][0]["id"], "#LoanShape");
    assert_eq!(json["shapes"][0]["typeValues"][0], "http://ex.org/Loan");
    assert_eq!(
        json["shapes"][0]["propertyExpressions"][0]["predicate"],
        "http://ex.org/rate"
    );
}

#[test]
fn parse_error_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bad.shex", "<#S> {\n  ex:p IRI\n}\n");

    let output = run(&["parse", &input, "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2, column 3"));
}

#[test]
fn compare_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(
        dir.path(),
        "a.shex",
        "PREFIX ex: <http://ex.org/>\n<#S> { ex:p IRI ; ex:q IRI }\n",
    );
    let b = write(
        dir.path(),
        "b.shex",
        "PREFIX ex: <http://ex.org/>\n<#S> { ex:q LITERAL ; ex:p IRI }\n",
    );
    let c = write(
        dir.path(),
        "c.shex",
        "PREFIX ex: <http://ex.org/>\n<#S> { ex:p IRI }\n<#T> { ex:p IRI }\n",
    );

    let same = run(&["compare", &a, &b, "-q"]);
    assert_eq!(same.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&same.stdout).contains("\"matched\""));

    let different = run(&["compare", &c, &a, "-q"]);
    assert_eq!(different.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&different.stdout).contains("\"countMismatch\""));
}

#[test]
fn match_needs_a_registry() {
    let dir = tempfile::tempdir().unwrap();
    let shape = write(dir.path(), "loan.shex", "<#S> { }\n");
    let config = write(dir.path(), "pod.json", r#"{"auth_token":"secret"}"#);

    let output = run(&["match", &shape, "--config", &config, "-q"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing setting"));
    assert!(!stderr.contains("secret"));
}

#[test]
fn unreadable_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "pod.json", "{ not json");

    let output = run(&["tree", "--config", &config, "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("JSON parse error"));
}
