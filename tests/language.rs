use std::{fs, io};

use funke::{
    error::{ParseError, RuntimeError},
    interpreter::{
        host::{BufferedHost, Host},
        value::core::{Value, MAX_STRING_LEN},
    },
    parse, run, Error,
};
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "fk"))
    {
        let path = entry.path();
        let code =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut host = BufferedHost::new(1);
        if let Err(e) = run(&code, &mut host) {
            panic!("Demo {path:?} failed:\n{}", e.render(&code));
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn readme_examples_work() {
    let content = fs::read_to_string("README.md").expect("README.md is readable");
    let blocks = extract_funke_blocks(&content);
    assert!(!blocks.is_empty(), "No funke examples found in README.md");

    for (i, code) in blocks.iter().enumerate() {
        let mut host = BufferedHost::new(1);
        if let Err(e) = run(code, &mut host) {
            panic!("README example {} failed:\n{}\n{}", i + 1, code, e.render(code));
        }
    }
}

fn extract_funke_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```funke") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn run_with_input(src: &str, input: &[&str]) -> (Result<Option<Value>, Error>, Vec<String>) {
    let mut host = BufferedHost::new(42).with_input(input.iter().copied());
    let result = run(src, &mut host);
    (result, host.output().to_vec())
}

fn assert_success(src: &str) -> Option<Value> {
    match run_with_input(src, &[]).0 {
        Ok(value) => value,
        Err(e) => panic!("Script failed:\n{}", e.render(src)),
    }
}

fn assert_failure(src: &str) -> Error {
    match run_with_input(src, &[]).0 {
        Ok(value) => panic!("Script succeeded with {value:?} but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_value(src: &str, expected: Value) {
    assert_eq!(assert_success(src), Some(expected), "script: {src}");
}

fn assert_output(src: &str, expected: &[&str]) {
    let (result, output) = run_with_input(src, &[]);
    if let Err(e) = result {
        panic!("Script failed:\n{}", e.render(src));
    }
    assert_eq!(output, expected, "script: {src}");
}

fn runtime_error(src: &str) -> RuntimeError {
    match assert_failure(src) {
        Error::Runtime { error, .. } => error,
        other => panic!("Expected a runtime error, got {other:?}"),
    }
}

fn syntax_error(src: &str) -> ParseError {
    match assert_failure(src) {
        Error::Syntax { error, .. } => error,
        other => panic!("Expected a syntax error, got {other:?}"),
    }
}

/// Canonical text of `src`, after one parse.
fn canonical(src: &str) -> String {
    parse(src).unwrap_or_else(|e| panic!("Parse failed:\n{}", e.render(src)))
              .to_string()
}

#[test]
fn definitions_and_calls() {
    let src = "add(a, b) = +(a, b)\nprint(n) = $(n)\nprint(add(3, 4))";
    let (result, output) = run_with_input(src, &[]);

    assert_eq!(result, Ok(Some(Value::Int(7))));
    assert_eq!(output, ["7"]);
}

#[test]
fn whitespace_is_insignificant() {
    assert_value("add(a,b)=+(a,b)add(3,4)", Value::Int(7));
    assert_value("  add ( a , b )\n\t=\n+ ( a , b )\n\n add ( 3 , 4 ) ", Value::Int(7));
}

#[test]
fn integer_arithmetic() {
    assert_value("+(1, 2)", Value::Int(3));
    assert_value("-(1, 5)", Value::Int(-4));
    assert_value("*(6, 7)", Value::Int(42));
    assert_value("/(7, 2)", Value::Int(3));
    assert_value("/(-(0, 7), 2)", Value::Int(-4));
    assert_value("%(-(0, 7), 3)", Value::Int(2));
    assert_value("%(7, -(0, 3))", Value::Int(-2));
    assert_value("1_000_000", Value::Int(1_000_000));
}

#[test]
fn float_arithmetic() {
    assert_value("+(0.5, 0.25)", Value::Float(0.75));
    assert_value("/(7.0, 2.0)", Value::Float(3.5));
    assert_value("%(-(0.0, 1.5), 1.0)", Value::Float(0.5));
    assert_value("1_0.5", Value::Float(10.5));
    assert_value("2.", Value::Float(2.0));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    assert_eq!(runtime_error("/(1, 0)"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("/(1.0, 0.0)"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("%(1, 0)"), RuntimeError::ModuloByZero);
    assert_eq!(runtime_error("%(1.5, 0.0)"), RuntimeError::ModuloByZero);
}

#[test]
fn integer_overflow_is_a_runtime_error() {
    assert_eq!(runtime_error("+(9223372036854775807, 1)"), RuntimeError::Overflow);
    assert_eq!(runtime_error("*(9223372036854775807, 2)"), RuntimeError::Overflow);
    assert_eq!(runtime_error("-(-(0, 9223372036854775807), 2)"), RuntimeError::Overflow);
}

#[test]
fn mixed_operand_types_are_unsupported() {
    assert_eq!(runtime_error("+(1, 1.0)"),
               RuntimeError::UnsupportedOperation { operation: "Addition",
                                                    left:      "Int",
                                                    right:     "Float", });
    assert_eq!(runtime_error(r#"-("a", "b")"#),
               RuntimeError::UnsupportedOperation { operation: "Subtraction",
                                                    left:      "String",
                                                    right:     "String", });
    assert_eq!(runtime_error(r#"*(3, "ab")"#),
               RuntimeError::UnsupportedOperation { operation: "Multiplication",
                                                    left:      "Int",
                                                    right:     "String", });
}

#[test]
fn string_operations() {
    assert_value(r#"+("ab", "cd")"#, Value::from("abcd"));
    assert_value(r#"*("ab", 3)"#, Value::from("ababab"));
    assert_value(r#"*("ab", -(0, 1))"#, Value::from(""));
    assert_value(r#""a\tb\x41\q""#, Value::from("a\tbAq"));
    assert_value(r#""\xZZ""#, Value::from("?ZZ"));
    assert_value(r#""say \"hi\"""#, Value::from("say \"hi\""));
}

#[test]
fn huge_string_repetition_is_a_runtime_error() {
    let too_long = RuntimeError::StringTooLong { limit: MAX_STRING_LEN };

    assert_eq!(runtime_error(r#"*("abc", 9223372036854775807)"#), too_long);
    assert_eq!(runtime_error(r#"*("a", 1000000000000)"#), too_long);
    assert_eq!(assert_success(r#"*("ab", 1000)"#).map(|v| v.to_string().len()),
               Some(2000));
}

#[test]
fn guard_runs_body_when_comparison_holds() {
    let (result, output) = run_with_input("=(1, 1, $(9))", &[]);
    assert_eq!(result, Ok(Some(Value::Int(9))));
    assert_eq!(output, ["9"]);

    let (result, output) = run_with_input("=(1, 2, $(9))", &[]);
    assert_eq!(result, Ok(None));
    assert!(output.is_empty());
}

#[test]
fn guard_comparisons() {
    assert_value("<(1, 2, 10, 20)", Value::Int(20));
    assert_value(">(2.5, 1.5, 1)", Value::Int(1));
    assert_value(r#">("b", "a", 1)"#, Value::Int(1));
    assert_value("!=(1, 1.0, 5)", Value::Int(5));
    assert_eq!(assert_success("<(1, 2.0, 5)"), None);
    assert_eq!(assert_success("=(1, 1.0, 5)"), None);
}

#[test]
fn guard_body_may_assign() {
    assert_value("f(x) = =(x, 1, y = 5), y\nf(1)", Value::Int(5));
    assert_eq!(runtime_error("f(x) = =(x, 1, y = 5), y\nf(2)"),
               RuntimeError::UnknownVariable { name: "y".to_string() });
}

#[test]
fn function_result_is_last_produced_value() {
    assert_value("f(x) = x, =(x, 0, 99)\nf(1)", Value::Int(1));
    assert_value("f(x) = x, =(x, 1, 99)\nf(1)", Value::Int(99));
    assert_eq!(assert_success("f() = =(1, 2, 3)\nf()"), None);
}

#[test]
fn functions_are_values() {
    let value = assert_success("f(a, b) = a\nf").expect("a function value");
    assert_eq!(value.type_name(), "Function");
    assert_eq!(value.to_string(), "<function(a, b)>");
}

#[test]
fn call_errors() {
    assert_eq!(runtime_error("f(a) = a\nf(1, 2)"),
               RuntimeError::ArgumentCountMismatch { expected: 1,
                                                     found:    2, });
    assert_eq!(runtime_error("g(1)"),
               RuntimeError::UnknownFunction { name: "g".to_string() });
    assert_eq!(runtime_error("f(x) = x(1)\nf(2)"),
               RuntimeError::NotCallable { kind: "Int" });
    assert_eq!(runtime_error("x"), RuntimeError::UnknownVariable { name: "x".to_string() });
}

#[test]
fn calls_share_the_callers_environment() {
    // Parameters are bound where the call happens, so they outlive the call.
    assert_value("f(x) = x\n+(f(4), x)", Value::Int(8));
    assert_value("f(x) = x\ng(x) = +(f(1), x)\ng(5)", Value::Int(2));
}

#[test]
fn callee_overwrites_the_callers_own_parameter() {
    // `f` binds its `x` over the `x` that `g` is still using.
    assert_value("f(x) = x\ng(x, y) = f(y), x\ng(1, 2)", Value::Int(2));
    assert_value("f(x) = x\ng(x, y) = f(y), +(x, y)\ng(1, 2)", Value::Int(4));
}

#[test]
fn recursion() {
    assert_value("fact(n) = <(n, 2, 1), >(n, 1, *(n, fact(-(n, 1))))\nfact(5)", Value::Int(120));
}

#[test]
fn unbounded_recursion_is_reported() {
    assert_eq!(runtime_error("loop(n) = loop(n)\nloop(1)"),
               RuntimeError::CallDepthExceeded { limit: 256 });
}

#[test]
fn missing_values() {
    assert_eq!(runtime_error("$(=(1, 2, 3))"), RuntimeError::MissingValue);
    assert_eq!(runtime_error("+(=(1, 2, 3), 1)"), RuntimeError::MissingValue);
    assert_eq!(runtime_error("f(x) = x\nf(=(1, 2, 3))"), RuntimeError::MissingValue);
}

#[test]
fn print_writes_display_form() {
    assert_output("$(+(1, 2))", &["3"]);
    assert_output("$(2.0)", &["2.0"]);
    assert_output("$(/(1.0, 4.0))", &["0.25"]);
    assert_output(r#"$("plain text")"#, &["plain text"]);
    assert_output("f(a) = a\n$(f)", &["<function(a)>"]);
    assert_value("$(5)", Value::Int(5));
}

#[test]
fn random_integers() {
    assert_value("@(1, 1)", Value::Int(1));

    for _ in 0..20 {
        match assert_success("@(1, 6)") {
            Some(Value::Int(n)) => assert!((1..=6).contains(&n), "{n} out of range"),
            other => panic!("expected an Int, got {other:?}"),
        }
    }

    let first = run_with_input("$(@(0, 1000000))", &[]).1;
    let second = run_with_input("$(@(0, 1000000))", &[]).1;
    assert_eq!(first, second);
}

#[test]
fn invalid_random_bounds() {
    assert!(matches!(runtime_error("@(5, 1)"), RuntimeError::InvalidRandomBounds { .. }));
    assert!(matches!(runtime_error("@(1.0, 2)"), RuntimeError::InvalidRandomBounds { .. }));
}

#[test]
fn input_is_classified() {
    let input_value = |line: &str| run_with_input("#", &[line]).0;

    assert_eq!(input_value("42"), Ok(Some(Value::Int(42))));
    assert_eq!(input_value("007"), Ok(Some(Value::Int(7))));
    assert_eq!(input_value("4.5"), Ok(Some(Value::Float(4.5))));
    assert_eq!(input_value(".5"), Ok(Some(Value::Float(0.5))));
    assert_eq!(input_value("12\n"), Ok(Some(Value::Int(12))));
    assert_eq!(input_value("1.2.3"), Ok(Some(Value::from("1.2.3"))));
    assert_eq!(input_value("hello"), Ok(Some(Value::from("hello"))));
    assert_eq!(input_value(""), Ok(Some(Value::from(""))));
}

#[test]
fn input_lines_are_consumed_in_order() {
    let (result, output) = run_with_input("echo(x) = $(x)\n+(echo(#), echo(#))", &["1", "2"]);
    assert_eq!(result, Ok(Some(Value::Int(3))));
    assert_eq!(output, ["1", "2"]);

    let (result, _) = run_with_input("#", &[]);
    assert!(matches!(result,
                     Err(Error::Runtime { error: RuntimeError::InputExhausted,
                                          .. })));
}

/// A host whose input source always fails.
struct BrokenInput;

impl Host for BrokenInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
    }

    fn write_line(&mut self, _text: &str) {}

    fn random_int(&mut self, low: i64, _high: i64) -> i64 {
        low
    }
}

#[test]
fn input_failures_are_reported() {
    let result = run("#", &mut BrokenInput);
    assert_eq!(result,
               Err(Error::Runtime { error: RuntimeError::InputFailed { details: "stdin closed".to_string() },
                                    span:  parse("#").expect("parses").span(), }));
}

#[test]
fn output_before_a_failure_is_kept() {
    let (result, output) = run_with_input("f(x) = $(x), /(x, 0)\nf(3)", &[]);
    assert!(result.is_err());
    assert_eq!(output, ["3"]);
}

#[test]
fn illegal_characters() {
    match assert_failure("&") {
        Error::IllegalCharacter { character, span } => {
            assert_eq!(character, '&');
            assert_eq!((span.start.line, span.start.column), (0, 0));
            assert_eq!((span.end.line, span.end.column), (0, 1));
        },
        other => panic!("Expected an illegal character, got {other:?}"),
    }

    match assert_failure("f(x) = x\n  +(1, ~)") {
        Error::IllegalCharacter { character, span } => {
            assert_eq!(character, '~');
            assert_eq!((span.start.line, span.start.column), (1, 7));
        },
        other => panic!("Expected an illegal character, got {other:?}"),
    }

    assert!(matches!(assert_failure("1.2.3"),
                     Error::IllegalCharacter { character: '.', .. }));
    assert!(matches!(assert_failure("!(1, 2)"),
                     Error::IllegalCharacter { character: '!', .. }));
}

#[test]
fn syntax_error_codes() {
    let code = |src: &str| syntax_error(src).code();

    assert_eq!(code("+(1 2)"), 4);
    assert_eq!(code("$ 1"), 2);
    assert_eq!(code("+(1, 2"), 3);
    assert_eq!(code(")"), 6);
    assert_eq!(code(""), 7);
    assert_eq!(code("f(x) = "), 7);
    assert_eq!(code("1 2"), 8);
    assert_eq!(code(r#""abc"#), 9);
    assert_eq!(code("99999999999999999999"), 10);
    assert_eq!(code("f(1 2)"), 11);
    assert_eq!(code(&format!("{}.0", "9".repeat(400))), 12);
    assert_eq!(code(&format!("{}1{}", "$(".repeat(20_000), ")".repeat(20_000))), 13);
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    let src = format!("{}1{}", "$(".repeat(200), ")".repeat(200));
    let (result, output) = run_with_input(&src, &[]);

    assert_eq!(result, Ok(Some(Value::Int(1))));
    assert_eq!(output.len(), 200);
}

#[test]
fn definition_head_mismatch_falls_back_to_expression() {
    // Not a definition: the program is the call itself.
    assert_eq!(syntax_error("f(x) 1"),
               ParseError::ExpectedEndOfInput { found: "integer 1".to_string() });
    assert_eq!(runtime_error("f(x)"),
               RuntimeError::UnknownFunction { name: "f".to_string() });
}

#[test]
fn rendered_reports() {
    let src = "f(x) = x\n/(1, 0)";
    let err = assert_failure(src);
    assert_eq!(err.render(src),
               "Runtime Error: Division by zero\nLine 2\n\n/(1, 0)\n  ^^^^\n");

    let src = "+(1 2)";
    let err = assert_failure(src);
    assert_eq!(err.render(src),
               "Invalid Syntax (E04): Expected ',', found integer 2\nLine 1\n\n+(1 2)\n    ^\n");
}

#[test]
fn canonical_form_is_stable() {
    let sources = ["add(a,b)=+(a,b)\nadd(3,4)",
                   "f() = x = 1.5, y = \"q\\\"uote\\n\", <(x, 2.0, $(y), x)\nf()",
                   "g(n) = !=(n, 0, @(0, n)), =(n, 0, #)\n$(g(%(10, 3)))",
                   "h(a, b, c) = >(a, b, -(a, b), *(c, /(a, b)))\nh(1_000, 7, 2)"];

    for src in sources {
        let once = canonical(src);
        assert_eq!(canonical(&once), once, "source: {src}");
    }

    assert_eq!(canonical("add(a,b)=+(a,b)\nadd(3,4)"), "add(a, b) = +(a, b)\nadd(3, 4)");
}
