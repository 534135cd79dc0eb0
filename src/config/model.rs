use std::collections::HashSet;

use serde::Deserialize;

use crate::grammar::parse_grammar;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    pub commands: Option<Vec<CommandEntry>>,
}

/// One named command grammar.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommandEntry {
    pub name: String,
    pub grammar: String,
    pub description: Option<String>,
}

impl Config {
    pub fn commands(&self) -> &[CommandEntry] {
        self.commands.as_deref().unwrap_or_default()
    }

    /// Check names and grammars, collecting every problem.
    ///
    /// Type names are not checked here; that needs a resolver table (see
    /// [`crate::command_set::CommandSet::from_config`]).
    pub fn validate(&self) -> Result<(), crate::config::ConfigError> {
        let mut errors = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for (i, command) in self.commands().iter().enumerate() {
            if command.name.trim().is_empty() {
                errors.push(format!("commands[{i}]: name must not be empty"));
                continue;
            }
            if !seen.insert(command.name.as_str()) {
                errors.push(format!("commands.{}: duplicate command name", command.name));
            }
            if let Err(e) = parse_grammar(&command.grammar) {
                errors.push(format!("commands.{}: invalid grammar: {e}", command.name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(crate::config::ConfigError::Validation(errors))
        }
    }

    /// Merge `other` over `self`: a command in `other` replaces the one with
    /// the same name in place; new names are appended.
    pub fn merge(self, other: Config) -> Config {
        Config {
            commands: Self::merge_commands(self.commands, other.commands),
        }
    }

    fn merge_commands(
        base: Option<Vec<CommandEntry>>,
        over: Option<Vec<CommandEntry>>,
    ) -> Option<Vec<CommandEntry>> {
        match (base, over) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(mut b), Some(o)) => {
                for entry in o {
                    let existing = b.iter_mut().find(|e| e.name == entry.name);
                    match existing {
                        Some(existing) => *existing = entry,
                        None => b.push(entry),
                    }
                }
                Some(b)
            }
        }
    }
}

/// Parse a YAML config string.
pub fn parse_config(yaml: &str) -> Result<Config, crate::config::ConfigError> {
    let config: Config = serde_saphyr::from_str(yaml)?;
    Ok(config)
}
