//! Demonstrates rejecting a malformed tool-call response from an LLM **while
//! it is still streaming**, instead of waiting for the whole payload.
//!
//! The assistant was asked for a JSON object describing a code snippet. The
//! response arrives in small, irregular chunks, the way `chat.completions`
//! (and similar) APIs deliver partial tokens. Every chunk goes straight into a
//! [`Validator`]:
//!
//! 1. A structural mistake (here, a trailing comma) is reported by the chunk
//!    that contains it, so the caller can cancel the request early.
//! 2. After the last chunk, [`Validator::is_complete`] tells whether the model
//!    actually closed every object and array.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonpda --example llm_tool_call
//! ```

#![allow(clippy::needless_raw_string_hashes)]
#![allow(clippy::doc_markdown)]

use jsonpda::{Validator, ValidatorOptions};

fn stream(name: &str, chunks: &[&str]) {
    println!("== {name}");
    let mut validator = Validator::new(ValidatorOptions {
        max_depth: Some(64),
        ..ValidatorOptions::default()
    });

    for (i, chunk) in chunks.iter().enumerate() {
        if let Err(err) = validator.feed(chunk) {
            println!("chunk {i}: rejected ({err}), cancelling the request");
            return;
        }
        println!(
            "chunk {i}: ok, depth {}, {} tokens so far",
            validator.depth(),
            validator.tokens_accepted()
        );
    }

    match validator.finish() {
        Ok(()) => println!("complete tool call"),
        Err(err) => println!("stream ended early: {err}"),
    }
}

fn main() {
    stream(
        "well formed",
        &[
            r#"{"moderation":{"decision":"al"#,
            r#"low","reason":null},"#,
            r#""filename":"example.rs","#,
            r#""language":"rust","#,
            r#""code":"fn main() {\n    println!(\"hi\");\n}\n"}"#,
        ],
    );

    stream(
        "trailing comma",
        &[
            r#"{"moderation":{"decision":"allow","#,
            r#""reason":null,},"#,
            r#""filename":"example.rs"}"#,
        ],
    );

    stream(
        "truncated",
        &[r#"{"filename":"example.rs","code":"fn main"#],
    );
}
