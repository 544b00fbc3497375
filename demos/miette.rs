//! Simple example of miette usage

use miette::{miette, IntoDiagnostic};
use posix_shell_ast::ParserOptions;

fn main() -> miette::Result<()> {
    let f = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("Please provide a file name"))?;

    let source = std::fs::read_to_string(&f).into_diagnostic()?;

    let ast = posix_shell_ast::parse(&source, &ParserOptions::default())
        .map_err(|e| e.to_pretty_error(&source))?;

    println!("{ast:#?}");

    Ok(())
}
