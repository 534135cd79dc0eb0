//! Matching command strings against a [`CommandDef`].
//!
//! Two matchers share one semantics: [`match_command`] interprets the AST on
//! every call, while [`compile`] builds a [`CommandMatcher`] with alternatives
//! sorted, messages rendered and resolvers captured ahead of time. For any
//! grammar, resolver table, context and input both return the same result.
//!
//! [`CommandDef`]: crate::grammar::CommandDef

mod alternatives;
pub mod compiler;
mod cursor;
mod error;
pub mod interpreter;
mod params;
pub mod resolver;

pub use compiler::{CommandMatcher, compile};
pub use cursor::Cursor;
pub use error::{MatchError, ParseError};
pub use interpreter::match_command;
pub use params::Params;
pub use resolver::{FnResolver, Resolved, ResolverTable, TypeResolver};

/// Consume the single space that must precede every node after the first.
fn expect_delimiter(cursor: &mut Cursor, token_level: usize) -> Result<(), ParseError> {
    match cursor.peek(0) {
        Some(' ') => {
            cursor.consume(0);
            Ok(())
        }
        Some(found) => Err(ParseError::expected_delimiter(token_level, found)),
        None => Err(ParseError::unexpected_end(token_level)),
    }
}
