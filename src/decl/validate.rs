//! Declaration validation
//!
//! This module checks that a raw, already-parsed declaration conforms to
//! the structural contract before any tree is built. Validation is a pure
//! check: it collects the full set of structural errors rather than
//! stopping at the first, so all problems surface together. Each error
//! names the declaration path of the offending entry.
//!
//! Subtree nodes are validated by recursively applying the same rule set
//! that governs the root, so nesting depth is unbounded.

use serde_yaml::Value;

use crate::decl::types::{ArgType, ROOT_PATH};
use crate::error::SchemaError;

/// Keys recognized at the root level
const ROOT_KEYS: &[&str] = &["help", "command", "args", "subtree"];

/// Keys recognized at subtree node level
const NODE_KEYS: &[&str] = &["keyword", "help", "command", "args", "subtree"];

/// Keys recognized on an arg entry
const ARG_KEYS: &[&str] = &["name", "help", "type", "positional", "default", "enum"];

/// Validate a raw declaration against the structural contract
///
/// Returns all structural errors found; an empty vector means the
/// declaration is valid.
pub fn validate_decl(decl: &Value) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    validate_node(decl, ROOT_PATH, true, &mut errors);
    errors
}

fn validate_node(value: &Value, path: &str, is_root: bool, errors: &mut Vec<SchemaError>) {
    let mapping = match value.as_mapping() {
        Some(m) => m,
        None => {
            errors.push(SchemaError::NotAMapping {
                path: path.to_string(),
            });
            return;
        }
    };

    let allowed = if is_root { ROOT_KEYS } else { NODE_KEYS };
    for key in mapping.keys() {
        match key.as_str() {
            Some(k) if allowed.contains(&k) => {}
            Some(k) => errors.push(SchemaError::UnknownKey {
                path: path.to_string(),
                key: k.to_string(),
            }),
            None => errors.push(SchemaError::UnknownKey {
                path: path.to_string(),
                key: format!("{:?}", key),
            }),
        }
    }

    if !is_root {
        match mapping.get("keyword") {
            Some(Value::String(s)) if !s.is_empty() => {}
            Some(Value::String(_)) => errors.push(SchemaError::EmptyKeyword {
                path: path.to_string(),
            }),
            Some(_) => errors.push(SchemaError::WrongType {
                path: path.to_string(),
                field: "keyword".to_string(),
                expected: "string",
            }),
            None => errors.push(SchemaError::MissingField {
                path: path.to_string(),
                field: "keyword".to_string(),
            }),
        }
    }

    check_string_field(mapping, "help", true, path, errors);
    check_string_field(mapping, "command", false, path, errors);

    if let Some(args) = mapping.get("args") {
        match args.as_sequence() {
            Some(seq) => {
                for (i, arg) in seq.iter().enumerate() {
                    validate_arg(arg, &format!("{}.args[{}]", path, i), errors);
                }
            }
            None => errors.push(SchemaError::NotASequence {
                path: path.to_string(),
                field: "args".to_string(),
            }),
        }
    }

    if let Some(subtree) = mapping.get("subtree") {
        match subtree.as_sequence() {
            Some(seq) => {
                for (i, child) in seq.iter().enumerate() {
                    let child_path = if is_root {
                        format!("subtree[{}]", i)
                    } else {
                        format!("{}.subtree[{}]", path, i)
                    };
                    validate_node(child, &child_path, false, errors);
                }
            }
            None => errors.push(SchemaError::NotASequence {
                path: path.to_string(),
                field: "subtree".to_string(),
            }),
        }
    }
}

fn validate_arg(value: &Value, path: &str, errors: &mut Vec<SchemaError>) {
    let mapping = match value.as_mapping() {
        Some(m) => m,
        None => {
            errors.push(SchemaError::NotAMapping {
                path: path.to_string(),
            });
            return;
        }
    };

    for key in mapping.keys() {
        match key.as_str() {
            Some(k) if ARG_KEYS.contains(&k) => {}
            Some(k) => errors.push(SchemaError::UnknownKey {
                path: path.to_string(),
                key: k.to_string(),
            }),
            None => errors.push(SchemaError::UnknownKey {
                path: path.to_string(),
                key: format!("{:?}", key),
            }),
        }
    }

    check_string_field(mapping, "name", true, path, errors);
    check_string_field(mapping, "help", true, path, errors);

    let arg_type = match mapping.get("type") {
        None => Some(ArgType::default()),
        Some(Value::String(s)) => {
            let parsed = ArgType::from_name(s);
            if parsed.is_none() {
                errors.push(SchemaError::InvalidArgType {
                    path: path.to_string(),
                    value: s.clone(),
                });
            }
            parsed
        }
        Some(_) => {
            errors.push(SchemaError::WrongType {
                path: path.to_string(),
                field: "type".to_string(),
                expected: "string",
            });
            None
        }
    };

    let positional = match mapping.get("positional") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push(SchemaError::WrongType {
                path: path.to_string(),
                field: "positional".to_string(),
                expected: "boolean",
            });
            false
        }
    };

    // Flags are inherently optional and non-positional; also re-checked at
    // tree build time.
    if positional && arg_type == Some(ArgType::Flag) {
        errors.push(SchemaError::PositionalFlag {
            path: path.to_string(),
        });
    }

    let choices = match mapping.get("enum") {
        None => None,
        Some(Value::Sequence(seq)) => {
            let all_strings = seq.iter().all(|v| v.is_string());
            if seq.len() < 2 || !all_strings {
                errors.push(SchemaError::InvalidEnum {
                    path: path.to_string(),
                });
                None
            } else {
                Some(
                    seq.iter()
                        .filter_map(|v| v.as_str().map(String::from))
                        .collect::<Vec<_>>(),
                )
            }
        }
        Some(_) => {
            errors.push(SchemaError::InvalidEnum {
                path: path.to_string(),
            });
            None
        }
    };

    if let (Some(default), Some(ty)) = (mapping.get("default"), arg_type) {
        if !default_matches_type(default, ty) {
            errors.push(SchemaError::DefaultTypeMismatch {
                path: path.to_string(),
                expected: ty.name().to_string(),
            });
        } else if let (Some(allowed), Some(value)) = (&choices, default.as_str()) {
            if !allowed.iter().any(|c| c == value) {
                errors.push(SchemaError::DefaultNotInEnum {
                    path: path.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }
}

/// Whether a declared default value matches the arg's declared type
///
/// `text` maps to string and `flag` to boolean; an integer default is
/// accepted for a `float` arg.
fn default_matches_type(default: &Value, ty: ArgType) -> bool {
    match ty {
        ArgType::String | ArgType::Text => default.is_string(),
        ArgType::Integer => default.as_i64().is_some(),
        ArgType::Float => default.is_number(),
        ArgType::Flag => default.is_bool(),
    }
}

fn check_string_field(
    mapping: &serde_yaml::Mapping,
    field: &str,
    required: bool,
    path: &str,
    errors: &mut Vec<SchemaError>,
) {
    match mapping.get(field) {
        Some(Value::String(_)) => {}
        Some(_) => errors.push(SchemaError::WrongType {
            path: path.to_string(),
            field: field.to_string(),
            expected: "string",
        }),
        None if required => errors.push(SchemaError::MissingField {
            path: path.to_string(),
            field: field.to_string(),
        }),
        None => {}
    }
}
