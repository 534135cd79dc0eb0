//! Command grammar matching.
//!
//! Parse a grammar such as `reminder/rm add <duration: word> <text: string>`
//! with [`grammar::parse_grammar`], then match command strings against it
//! with [`matcher::match_command`] or a [`matcher::CommandMatcher`] built by
//! [`matcher::compile`].

pub mod cli;
pub mod command_set;
pub mod config;
pub mod grammar;
pub mod matcher;
