//! Named collections of compiled commands.

use serde::Serialize;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::grammar::{CommandDef, parse_grammar, render_grammar};
use crate::matcher::{CommandMatcher, MatchError, Params, ParseError, ResolverTable, compile};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no commands registered")]
    Empty,
    #[error("no command matched (closest: {command}): {error}")]
    NoMatch { command: String, error: ParseError },
    #[error("command '{command}': {source}")]
    Fatal {
        command: String,
        #[source]
        source: MatchError,
    },
}

/// Result of a successful [`CommandSet::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatched {
    pub command: String,
    pub params: Params,
}

struct Entry<C: Sync> {
    name: String,
    description: Option<String>,
    def: CommandDef,
    matcher: CommandMatcher<C>,
}

/// Ordered set of commands, each compiled once against a resolver table.
pub struct CommandSet<C: Sync> {
    entries: Vec<Entry<C>>,
}

impl<C: Sync> Default for CommandSet<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C: Sync> CommandSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from configured commands.
    ///
    /// Every grammar must parse and every type it names must have a
    /// resolver in `resolvers`; all problems are reported together.
    pub fn from_config(config: &Config, resolvers: &ResolverTable<C>) -> Result<Self, ConfigError> {
        let mut set = Self::new();
        let mut errors = Vec::new();

        for command in config.commands() {
            let def = match parse_grammar(&command.grammar) {
                Ok(def) => def,
                Err(e) => {
                    errors.push(format!("commands.{}: invalid grammar: {e}", command.name));
                    continue;
                }
            };
            for type_name in def.type_names().filter(|t| !resolvers.contains(t)) {
                errors.push(format!(
                    "commands.{}: unknown type '{type_name}' (available: {})",
                    command.name,
                    resolvers.names().join(", ")
                ));
            }
            set.insert(
                command.name.clone(),
                command.description.clone(),
                def,
                resolvers,
            );
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        Ok(set)
    }

    /// Compile `def` and append it under `name`.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        def: CommandDef,
        resolvers: &ResolverTable<C>,
    ) -> &mut Self {
        self.insert(name.into(), None, def, resolvers);
        self
    }

    fn insert(
        &mut self,
        name: String,
        description: Option<String>,
        def: CommandDef,
        resolvers: &ResolverTable<C>,
    ) {
        let matcher = compile(&def, resolvers);
        self.entries.push(Entry {
            name,
            description,
            def,
            matcher,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CommandDef> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.def)
    }

    /// `(name, usage, description)` for every command, in order.
    pub fn usage(&self) -> Vec<(&str, String, Option<&str>)> {
        self.entries
            .iter()
            .map(|entry| {
                let usage = render_grammar(&entry.def);
                (entry.name.as_str(), usage, entry.description.as_deref())
            })
            .collect()
    }

    /// Try each command in order and return the first match.
    ///
    /// When nothing matches, the error from the command that got furthest
    /// (highest token level, earliest on ties) is returned. Fatal errors stop
    /// the search immediately.
    pub async fn dispatch(&self, input: &str, context: &C) -> Result<Dispatched, DispatchError> {
        let mut closest: Option<(&str, ParseError)> = None;

        for entry in &self.entries {
            match entry.matcher.matches(input, context).await {
                Ok(params) => {
                    debug!(command = %entry.name, "command matched");
                    return Ok(Dispatched {
                        command: entry.name.clone(),
                        params,
                    });
                }
                Err(MatchError::Parse(error)) => {
                    debug!(
                        command = %entry.name,
                        token = error.token_level,
                        %error,
                        "command did not match"
                    );
                    if closest
                        .as_ref()
                        .is_none_or(|(_, best)| error.token_level > best.token_level)
                    {
                        closest = Some((entry.name.as_str(), error));
                    }
                }
                Err(source) => {
                    return Err(DispatchError::Fatal {
                        command: entry.name.clone(),
                        source,
                    });
                }
            }
        }

        match closest {
            Some((command, error)) => Err(DispatchError::NoMatch {
                command: command.to_string(),
                error,
            }),
            None => Err(DispatchError::Empty),
        }
    }
}
