//! Command grammar notation and its AST.
//!
//! A grammar such as `reminder/rm add [emote: "uwu" | "owo"] <duration: word>`
//! is parsed into a [`CommandDef`]: an ordered list of [`Node`]s that the
//! matchers in [`crate::matcher`] walk from left to right.

mod error;
pub mod lexer;
mod parser;
mod render;


use serde::Serialize;

pub use error::GrammarError;
pub use parser::parse_grammar;
pub use render::render_grammar;

/// Parsed command grammar. Node order is the match order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandDef {
    nodes: Vec<Node>,
}

impl CommandDef {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Type names referenced by `Typename` params, in node order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Param(Param {
                ptype: ParamType::Typename { value },
                ..
            }) => Some(value.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a CommandDef {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// One item of a command grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Mandatory path segment (e.g. "reminder/rm" -> ["reminder", "rm"])
    StringLiteral { values: Vec<String> },
    /// Named capture (e.g. "<duration: word>", "[emote: \"uwu\" | \"owo\"]")
    Param(Param),
}

impl Node {
    /// Whether running out of input before this node is an error.
    pub fn is_mandatory(&self) -> bool {
        match self {
            Node::StringLiteral { .. } => true,
            Node::Param(param) => !param.optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub optional: bool,
    pub ptype: ParamType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamType {
    /// Delegates to the type resolver registered under `value`
    Typename { value: String },
    /// Enumerated choice; the matched alternative is the captured value
    StringOr { values: Vec<String> },
}
