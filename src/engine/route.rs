//! Keyword routing and dispatch
//!
//! The dispatcher walks the command tree following keyword tokens, stops at
//! the first node whose children no longer match, resolves the remaining
//! tokens against that node's args, and invokes the handler bound to the
//! node's command.

use crate::decl::types::Node;
use crate::engine::help::render_help;
use crate::engine::registry::HandlerRegistry;
use crate::engine::resolve::{resolve_args, ResolvedArgs};
use crate::error::{DecliError, Result, RoutingError};

/// The routed-and-resolved form of an invocation, before any handler runs
///
/// Exposed so callers can render help or inspect what would be invoked
/// (dry runs) without executing anything.
#[derive(Debug)]
pub enum Plan<'a> {
    /// Help was requested during descent; no handler is invoked
    Help { node: &'a Node, text: String },
    /// A command was reached with fully resolved arguments
    Invoke {
        node: &'a Node,
        command: &'a str,
        args: ResolvedArgs,
    },
}

/// The result of a completed dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Generated help text was returned instead of invoking a handler
    Help(String),
    /// The named command's handler ran successfully
    Completed { command: String },
}

/// Routes invocation tokens through a command tree and invokes handlers
///
/// The tree is built once and immutable thereafter, so a single dispatcher
/// may serve concurrent invocations without locking provided the registered
/// handlers are themselves reentrant. No timeout or cancellation semantics
/// are applied to handler invocations.
pub struct Dispatcher {
    root: Node,
    registry: HandlerRegistry,
}

impl Dispatcher {
    /// Create a dispatcher for a built tree with an injected registry
    pub fn new(root: Node, registry: HandlerRegistry) -> Self {
        Dispatcher { root, registry }
    }

    /// The root of the command tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Route and resolve the given tokens without invoking any handler
    ///
    /// Keyword descent is attempted first; when the next token matches no
    /// child keyword the current node's own command and args take over.
    pub fn plan(&self, tokens: &[String]) -> Result<Plan<'_>> {
        let (node, consumed, show_help) = descend(&self.root, tokens);

        if show_help {
            return Ok(Plan::Help {
                node,
                text: render_help(node),
            });
        }

        let command = match &node.command {
            Some(command) => command.as_str(),
            None => {
                return Err(RoutingError::NoCommand {
                    path: node.path.clone(),
                    suggestions: node.child_keywords(),
                }
                .into())
            }
        };

        let args = resolve_args(node, &tokens[consumed..])?;
        Ok(Plan::Invoke {
            node,
            command,
            args,
        })
    }

    /// Route the tokens and invoke the bound handler
    ///
    /// Handler errors are propagated outward unchanged.
    pub fn dispatch(&self, tokens: &[String]) -> Result<Outcome> {
        match self.plan(tokens)? {
            Plan::Help { text, .. } => Ok(Outcome::Help(text)),
            Plan::Invoke { command, args, .. } => {
                let handler = self.registry.get(command).ok_or_else(|| {
                    RoutingError::UnregisteredCommand {
                        command: command.to_string(),
                    }
                })?;
                handler(&args).map_err(DecliError::Handler)?;
                Ok(Outcome::Completed {
                    command: command.to_string(),
                })
            }
        }
    }
}

/// Walk the tree consuming keyword tokens
///
/// `-h`/`--help` encountered during descent is consumed and enacted on the
/// node the descent finally reaches. Returns the reached node, the number
/// of tokens consumed and whether help was requested.
fn descend<'a>(root: &'a Node, tokens: &[String]) -> (&'a Node, usize, bool) {
    let mut node = root;
    let mut consumed = 0;
    let mut show_help = false;

    while consumed < tokens.len() {
        let token = tokens[consumed].as_str();
        if token == "-h" || token == "--help" {
            show_help = true;
            consumed += 1;
            continue;
        }
        match node.child(token) {
            Some(child) => {
                node = child;
                consumed += 1;
            }
            None => break,
        }
    }

    (node, consumed, show_help)
}
