//! Argument resolution
//!
//! Given a node and the raw tokens addressed to it (after keyword routing
//! has consumed the preceding tokens), this module matches named and
//! positional tokens against the node's declared arguments, coerces types,
//! applies defaults and enforces enum membership.

use crate::decl::types::{Arg, ArgType, ArgValue, Node};
use crate::error::{ResolutionError, ResolutionResult};

/// The resolved arguments for one node
///
/// Values are kept in declaration order, with every declared argument
/// present; untouched optional arguments carry the explicit
/// [`ArgValue::Absent`] marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgs {
    values: Vec<(String, ArgValue)>,
    consumed: usize,
}

impl ResolvedArgs {
    /// Look up a resolved value by argument name
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate over `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of declared arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the node declared no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of raw tokens consumed during resolution
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Resolve the raw tokens addressed to a node into typed argument values
pub fn resolve_args(node: &Node, tokens: &[String]) -> ResolutionResult<ResolvedArgs> {
    // One slot per declared arg, filled as tokens are matched.
    let mut slots: Vec<Option<ArgValue>> = vec![None; node.args.len()];
    let mut free: Vec<&str> = Vec::new();

    // Partition into named and free tokens. A bare `--` disables all
    // further named interpretation; trailing tokens pass through verbatim.
    let mut escaped = false;
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        i += 1;

        if !escaped && token == "--" {
            escaped = true;
            continue;
        }
        if escaped || !is_named(token) {
            free.push(token);
            continue;
        }

        let body = &token[2..];
        let (name, inline) = match body.split_once('=') {
            Some((n, v)) => (n, Some(v)),
            None => (body, None),
        };
        let index = node
            .args
            .iter()
            .position(|a| a.name == name && !a.positional)
            .ok_or_else(|| ResolutionError::UnknownOption {
                path: node.path.clone(),
                name: name.to_string(),
            })?;
        let arg = &node.args[index];

        if arg.is_flag() {
            if inline.is_some() {
                return Err(ResolutionError::FlagWithValue {
                    name: name.to_string(),
                });
            }
            slots[index] = Some(ArgValue::Bool(true));
            continue;
        }

        let raw = match inline {
            Some(v) => v,
            None => {
                let next = tokens.get(i).ok_or_else(|| ResolutionError::MissingValue {
                    name: name.to_string(),
                })?;
                i += 1;
                next.as_str()
            }
        };
        slots[index] = Some(coerce(arg, raw)?);
    }

    // Assign free tokens to positional args in declaration order. A text
    // positional absorbs all remaining free tokens.
    let mut cursor = 0;
    for (index, arg) in node.args.iter().enumerate() {
        if !arg.positional || slots[index].is_some() {
            continue;
        }
        if arg.arg_type == ArgType::Text {
            if cursor < free.len() {
                slots[index] = Some(ArgValue::Str(free[cursor..].join(" ")));
                cursor = free.len();
            }
        } else if cursor < free.len() {
            slots[index] = Some(coerce(arg, free[cursor])?);
            cursor += 1;
        }
    }
    if cursor < free.len() {
        return Err(ResolutionError::UnexpectedArgument {
            path: node.path.clone(),
            token: free[cursor].to_string(),
        });
    }

    // Defaults and absence markers for anything still unresolved.
    let mut values = Vec::with_capacity(node.args.len());
    for (index, arg) in node.args.iter().enumerate() {
        let value = match slots[index].take() {
            Some(v) => v,
            None => match &arg.default {
                Some(default) => default.clone(),
                None if arg.is_flag() => ArgValue::Bool(false),
                // Text positionals are pass-through lists, inherently
                // optional when no tokens remain.
                None if arg.positional && arg.arg_type != ArgType::Text => {
                    return Err(ResolutionError::MissingArgument {
                        path: node.path.clone(),
                        name: arg.name.clone(),
                    })
                }
                None => ArgValue::Absent,
            },
        };
        values.push((arg.name.clone(), value));
    }

    Ok(ResolvedArgs {
        values,
        consumed: tokens.len(),
    })
}

/// Whether a token is in named `--<name>` form (a bare `--` is not)
fn is_named(token: &str) -> bool {
    token.starts_with("--") && token.len() > 2
}

/// Coerce a raw token to the arg's declared type, enforcing enum membership
fn coerce(arg: &Arg, raw: &str) -> ResolutionResult<ArgValue> {
    if let Some(choices) = &arg.choices {
        if !choices.iter().any(|c| c == raw) {
            return Err(ResolutionError::InvalidChoice {
                name: arg.name.clone(),
                value: raw.to_string(),
                allowed: choices.clone(),
            });
        }
    }
    match arg.arg_type {
        ArgType::String | ArgType::Text => Ok(ArgValue::Str(raw.to_string())),
        ArgType::Integer => raw
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| ResolutionError::InvalidValue {
                name: arg.name.clone(),
                value: raw.to_string(),
                expected: "integer",
            }),
        ArgType::Float => raw
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| ResolutionError::InvalidValue {
                name: arg.name.clone(),
                value: raw.to_string(),
                expected: "float",
            }),
        // Flags never reach coercion; presence is handled at partition time.
        ArgType::Flag => Ok(ArgValue::Bool(true)),
    }
}
