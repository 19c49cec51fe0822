//! Core declaration types
//!
//! This module defines the typed, immutable command tree that a validated
//! declaration is compiled into, plus the closed value type used for
//! argument defaults and resolved values.

use std::fmt;

use serde::Serialize;

/// Argument type, as declared in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Plain string value (the default)
    #[default]
    String,
    /// Integer value
    Integer,
    /// Floating point value
    Float,
    /// Boolean presence switch
    Flag,
    /// Positional catch-all absorbing all remaining tokens verbatim
    Text,
}

impl ArgType {
    /// Parse a declared type name, returning `None` for unrecognized values
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ArgType::String),
            "integer" => Some(ArgType::Integer),
            "float" => Some(ArgType::Float),
            "flag" => Some(ArgType::Flag),
            "text" => Some(ArgType::Text),
            _ => None,
        }
    }

    /// The declared name of this type
    pub fn name(&self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Integer => "integer",
            ArgType::Float => "float",
            ArgType::Flag => "flag",
            ArgType::Text => "text",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed argument value
///
/// Defaults and resolved values are represented as this closed sum rather
/// than an open dynamic type. `Absent` marks an optional argument that
/// received neither a token nor a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Absent,
}

impl ArgValue {
    /// Whether this value is the explicit "absent" marker
    pub fn is_absent(&self) -> bool {
        matches!(self, ArgValue::Absent)
    }

    /// Get the string value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer value, if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the float value, if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(x) => write!(f, "{}", x),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Absent => write!(f, "<absent>"),
        }
    }
}

/// An argument declaration on a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    /// Argument name, doubling as the `--name` form when non-positional
    pub name: String,

    /// Usage description for help text
    pub help: String,

    /// Declared value type
    #[serde(rename = "type")]
    pub arg_type: ArgType,

    /// Whether the value comes from token position rather than a named flag
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub positional: bool,

    /// Default value, applied when the argument is absent from input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ArgValue>,

    /// Closed set of permitted values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl Arg {
    /// Whether this argument is a boolean presence switch
    pub fn is_flag(&self) -> bool {
        self.arg_type == ArgType::Flag
    }
}

/// One command or command-group in the tree
///
/// Constructed once from the declaration at startup and immutable
/// thereafter; each node is owned exclusively by its parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Routing keyword (absent only at the tree root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,

    /// Usage description for help text
    pub help: String,

    /// Handler name to invoke when this node is the dispatch target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Argument declarations, in positional matching order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Arg>,

    /// Child nodes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtree: Vec<Node>,

    /// Keyword path from the root, for error and help rendering
    #[serde(skip)]
    pub path: String,
}

/// Path name used for the root node in errors and help output
pub const ROOT_PATH: &str = "<root>";

impl Node {
    /// Find the child whose keyword exactly matches the given token
    pub fn child(&self, keyword: &str) -> Option<&Node> {
        self.subtree
            .iter()
            .find(|n| n.keyword.as_deref() == Some(keyword))
    }

    /// Find a declared argument by name
    pub fn arg(&self, name: &str) -> Option<&Arg> {
        self.args.iter().find(|a| a.name == name)
    }

    /// The keywords of all children, in declaration order
    pub fn child_keywords(&self) -> Vec<String> {
        self.subtree
            .iter()
            .filter_map(|n| n.keyword.clone())
            .collect()
    }
}
