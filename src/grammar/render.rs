use super::{CommandDef, Node, Param, ParamType};

/// Render a command definition as a human-readable usage string.
///
/// Literals render as `a/b`, typed params as `<NAME>` (required) or
/// `[NAME]` (optional), and choice params as `<a/b>` or `[a/b]`.
/// The output is informational and is not accepted by [`super::parse_grammar`].
pub fn render_grammar(def: &CommandDef) -> String {
    def.iter()
        .map(render_node)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_node(node: &Node) -> String {
    match node {
        Node::StringLiteral { values } => values.join("/"),
        Node::Param(Param {
            name,
            optional,
            ptype,
        }) => {
            let inner = match ptype {
                ParamType::Typename { .. } => name.to_uppercase(),
                ParamType::StringOr { values } => values.join("/"),
            };
            if *optional {
                format!("[{inner}]")
            } else {
                format!("<{inner}>")
            }
        }
    }
}
