#![allow(missing_docs)]
#![allow(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use jsonpda::{ValidatorOptions, validate_with};

fn render_errors(inputs: &[&str], options: ValidatorOptions) -> String {
    let mut out = String::new();
    for input in inputs {
        match validate_with(input, options) {
            Ok(()) => writeln!(out, "{input:?} => ok").unwrap(),
            Err(err) => writeln!(out, "{input:?} => {err} (token {:?})", err.token_index).unwrap(),
        }
    }
    out
}

#[test]
fn snapshot_default_errors() {
    let inputs = [
        "",
        "[1, 2",
        r#"{"a": tru}"#,
        r#"{"a" : 1 "b"}"#,
        "[1]x",
        r#""\u00e9"#,
        r#"{"a":1}}"#,
        "[true\n,\n]",
        r#"{"k":[}"#,
        ":",
    ];

    insta::assert_snapshot!(render_errors(&inputs, ValidatorOptions::default()), @r#"
    "" => unexpected end of input, expected a value at 1:1 (token None)
    "[1, 2" => unexpected end of input, expected ',' or ']' at 1:6 (token None)
    "{\"a\": tru}" => lexical error: unknown keyword 'tru' at 1:10 (token None)
    "{\"a\" : 1 \"b\"}" => syntax error: unexpected string, expected ',' or '}' at 1:12 (token Some(4))
    "[1]x" => lexical error: invalid character 'x' at 1:4 (token None)
    "\"\\u00e9" => lexical error: unterminated string at 1:8 (token None)
    "{\"a\":1}}" => syntax error: unexpected '}' after end of document at 1:8 (token Some(5))
    "[true\n,\n]" => syntax error: unexpected ']', expected a value at 3:1 (token Some(3))
    "{\"k\":[}" => syntax error: '}' does not close the open array at 1:7 (token Some(4))
    ":" => syntax error: unexpected ':', expected a value at 1:1 (token Some(0))
    "#);
}

#[test]
fn snapshot_option_errors() {
    let lenient = ValidatorOptions {
        lenient_lexing: true,
        ..Default::default()
    };
    let inputs = ["[1]x", "[x1]", r#"{"a": tru}"#, "[1 2]"];
    insta::assert_snapshot!(render_errors(&inputs, lenient), @r#"
    "[1]x" => ok
    "[x1]" => ok
    "{\"a\": tru}" => syntax error: unexpected '}', expected a value at 1:10 (token Some(3))
    "[1 2]" => syntax error: unexpected number, expected ',' or ']' at 1:5 (token Some(2))
    "#);

    let shallow = ValidatorOptions {
        max_depth: Some(1),
        allow_multiple_json_values: true,
        ..Default::default()
    };
    let inputs = ["[1] {}", "[[1]]", "{\"a\": {}}"];
    insta::assert_snapshot!(render_errors(&inputs, shallow), @r#"
    "[1] {}" => ok
    "[[1]]" => syntax error: nesting depth exceeds limit of 1 at 1:2 (token Some(1))
    "{\"a\": {}}" => syntax error: nesting depth exceeds limit of 1 at 1:7 (token Some(3))
    "#);
}
