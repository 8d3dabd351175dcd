mod parser;

pub use parser::{Assignment, Command, Field, parser};

use chumsky::Parser;

/// Parse a single console line into a [`Command`]
pub fn parse(input: &str) -> Result<Command, String> {
    parser().parse(input).into_result().map_err(|errs| {
        errs.iter()
            .map(|e| format!("{} (at column {})", e, column(input, e.span().start)))
            .collect::<Vec<_>>()
            .join("; ")
    })
}

/// 1-based character column of byte `offset` in `input`
fn column(input: &str, offset: usize) -> usize {
    input.get(..offset).map_or(offset, |prefix| prefix.chars().count()) + 1
}
