//! Shared chumsky parser utilities
//!
//! Common combinators used by the declaration grammar. Everything here is
//! strictly single-line: the grammar never consumes newlines, statement
//! separation is the processor's job.

use chumsky::prelude::*;

/// Optional inline whitespace (spaces and tabs only).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Required inline whitespace (at least one space or tab).
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// The non-empty inner text of a double-quoted region.
pub fn quoted_inner<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    just('"')
        .ignore_then(none_of('"').repeated().at_least(1).to_slice())
        .then_ignore(just('"'))
}

/// Capture raw text up to (not including) a terminator sequence.
///
/// The capture may be empty; the terminator itself is not consumed.
pub fn raw_until<'src>(terminator: &'static str) -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .and_is(just(terminator).not())
        .repeated()
        .to_slice()
}
