//! Handler registry
//!
//! Commands in a declaration are bound to application logic by name. The
//! registry is the external mapping from command name to callable, injected
//! into the [`Dispatcher`](crate::engine::Dispatcher) at construction time.

use std::collections::HashMap;

use crate::engine::resolve::ResolvedArgs;

/// A callable bound to a command name
///
/// Handlers receive the resolved argument mapping and return an opaque
/// result which the dispatcher propagates unchanged. Handlers must be
/// reentrant if the same dispatcher is shared across threads.
pub type Handler = Box<dyn Fn(&ResolvedArgs) -> anyhow::Result<()> + Send + Sync>;

/// Mapping from command name to handler
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a command name, replacing any existing one
    pub fn register<F>(&mut self, command: &str, handler: F)
    where
        F: Fn(&ResolvedArgs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers.insert(command.to_string(), Box::new(handler));
    }

    /// Look up the handler for a command name
    pub fn get(&self, command: &str) -> Option<&Handler> {
        self.handlers.get(command)
    }

    /// Whether a handler is registered for a command name
    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("commands", &names)
            .finish()
    }
}
