//! Type resolvers: caller-supplied parsers for `<name: type>` parameters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{Cursor, ParseError};

/// Output of a successful resolver call: the advanced cursor and the
/// captured value.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub cursor: Cursor,
    pub value: Value,
}

impl Resolved {
    pub fn new(cursor: Cursor, value: impl Into<Value>) -> Self {
        Self {
            cursor,
            value: value.into(),
        }
    }
}

/// Parses one parameter value from the input.
///
/// The cursor is positioned right after the parameter's delimiter and is
/// owned by the resolver; the matcher adopts the returned cursor only on
/// success. `context` is the caller's value, passed through unchanged.
#[async_trait]
pub trait TypeResolver<C: Sync>: Send + Sync {
    async fn resolve(&self, cursor: Cursor, context: &C) -> Result<Resolved, ParseError>;
}

/// Adapts a synchronous closure into a [`TypeResolver`].
pub struct FnResolver<F>(F);

impl<F> FnResolver<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<C, F> TypeResolver<C> for FnResolver<F>
where
    C: Sync,
    F: Fn(Cursor, &C) -> Result<Resolved, ParseError> + Send + Sync,
{
    async fn resolve(&self, cursor: Cursor, context: &C) -> Result<Resolved, ParseError> {
        (self.0)(cursor, context)
    }
}

/// Consumes a run of non-space characters (`word`).
pub struct WordResolver;

#[async_trait]
impl<C: Sync> TypeResolver<C> for WordResolver {
    async fn resolve(&self, mut cursor: Cursor, _context: &C) -> Result<Resolved, ParseError> {
        let word = cursor.consume_while(|c| c != ' ');
        if word.is_empty() {
            return Err(ParseError::new(
                cursor.token_index(),
                "Expected word, found end of command",
            ));
        }
        Ok(Resolved::new(cursor, word))
    }
}

/// Consumes everything up to the end of the command (`string`).
pub struct RestResolver;

#[async_trait]
impl<C: Sync> TypeResolver<C> for RestResolver {
    async fn resolve(&self, mut cursor: Cursor, _context: &C) -> Result<Resolved, ParseError> {
        let rest = cursor.consume_while(|_| true);
        if rest.is_empty() {
            return Err(ParseError::new(
                cursor.token_index(),
                "Expected string, found end of command",
            ));
        }
        Ok(Resolved::new(cursor, rest))
    }
}

/// Resolvers keyed by the type name used in grammars.
pub struct ResolverTable<C: Sync> {
    resolvers: HashMap<String, Arc<dyn TypeResolver<C>>>,
}

impl<C: Sync> Default for ResolverTable<C> {
    fn default() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }
}

impl<C: Sync> Clone for ResolverTable<C> {
    fn clone(&self) -> Self {
        Self {
            resolvers: self.resolvers.clone(),
        }
    }
}

impl<C: Sync> ResolverTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `word` ([`WordResolver`]) and `string` ([`RestResolver`]).
    pub fn with_builtins() -> Self {
        Self::new()
            .with("word", WordResolver)
            .with("string", RestResolver)
    }

    /// Register a resolver, replacing any previous one under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        resolver: impl TypeResolver<C> + 'static,
    ) -> &mut Self {
        self.resolvers.insert(name.into(), Arc::new(resolver));
        self
    }

    pub fn with(
        mut self,
        name: impl Into<String>,
        resolver: impl TypeResolver<C> + 'static,
    ) -> Self {
        self.register(name, resolver);
        self
    }

    pub fn with_fn<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Cursor, &C) -> Result<Resolved, ParseError> + Send + Sync + 'static,
    {
        self.with(name, FnResolver::new(f))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn TypeResolver<C>>> {
        self.resolvers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
