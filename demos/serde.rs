//! Example demonstrating AST serialization with the `serde` feature.
//!
//! Run with: `cargo run --example serde --features serde`

use posix_shell_ast::{parse, ParserOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = "echo 'Hello, World!' && ls -la\n";
    let options = ParserOptions::builder().loc(true).call();

    let program = parse(input, &options)?;

    let json = serde_json::to_string_pretty(&program)?;
    println!("Parsed AST:");
    println!("{json}");

    Ok(())
}
