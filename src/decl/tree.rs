//! Tree construction
//!
//! This module converts a validated declaration into the immutable [`Node`]
//! tree used for routing and resolution. Construction is depth-first and
//! preserves declaration order, which defines positional matching priority.
//! Building is deterministic and idempotent for a given declaration.
//!
//! Unlike validation, which collects every structural error, tree
//! construction fails on the first build error it finds: a tree with
//! duplicate keywords or unreachable nodes must never be dispatched against.

use serde_yaml::Value;

use crate::decl::types::{Arg, ArgType, ArgValue, Node, ROOT_PATH};
use crate::decl::validate::validate_decl;
use crate::error::{DecliError, Result, TreeError, TreeResult};

/// Validate a raw declaration and build the command tree from it
///
/// This is the usual entry point: schema validation runs first and aborts
/// with the full set of structural errors before any tree exists.
pub fn compile(decl: &Value) -> Result<Node> {
    let errors = validate_decl(decl);
    if !errors.is_empty() {
        return Err(DecliError::Schema(errors));
    }
    Ok(build_tree(decl)?)
}

/// Build the command tree from an already-validated declaration
///
/// Callers that have not validated the declaration get a
/// [`TreeError::Malformed`] on the first shape mismatch rather than a panic.
pub fn build_tree(decl: &Value) -> TreeResult<Node> {
    build_node(decl, None, ROOT_PATH)
}

fn build_node(value: &Value, keyword: Option<String>, path: &str) -> TreeResult<Node> {
    let mapping = value.as_mapping().ok_or_else(|| malformed(path))?;

    let help = mapping
        .get("help")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(path))?
        .to_string();
    let command = match mapping.get("command") {
        None => None,
        Some(v) => Some(v.as_str().ok_or_else(|| malformed(path))?.to_string()),
    };

    let mut args: Vec<Arg> = Vec::new();
    if let Some(raw_args) = mapping.get("args") {
        let seq = raw_args.as_sequence().ok_or_else(|| malformed(path))?;
        for raw_arg in seq {
            let arg = build_arg(raw_arg, path)?;
            if args.iter().any(|a| a.name == arg.name) {
                return Err(TreeError::DuplicateArgName {
                    name: arg.name,
                    path: path.to_string(),
                });
            }
            args.push(arg);
        }
    }

    let mut subtree: Vec<Node> = Vec::new();
    if let Some(raw_subtree) = mapping.get("subtree") {
        let seq = raw_subtree.as_sequence().ok_or_else(|| malformed(path))?;
        for raw_child in seq {
            let child_keyword = raw_child
                .as_mapping()
                .and_then(|m| m.get("keyword"))
                .and_then(Value::as_str)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| malformed(path))?
                .to_string();
            if subtree
                .iter()
                .any(|n| n.keyword.as_deref() == Some(child_keyword.as_str()))
            {
                return Err(TreeError::DuplicateKeyword {
                    keyword: child_keyword,
                    path: path.to_string(),
                });
            }
            let child_path = if path == ROOT_PATH {
                child_keyword.clone()
            } else {
                format!("{} {}", path, child_keyword)
            };
            subtree.push(build_node(
                raw_child,
                Some(child_keyword),
                &child_path,
            )?);
        }
    }

    // A childless, commandless node can never be a meaningful dispatch
    // target, whatever args it declares.
    if command.is_none() && subtree.is_empty() {
        return Err(TreeError::UnreachableNode {
            path: path.to_string(),
        });
    }

    Ok(Node {
        keyword,
        help,
        command,
        args,
        subtree,
        path: path.to_string(),
    })
}

fn build_arg(value: &Value, node_path: &str) -> TreeResult<Arg> {
    let mapping = value.as_mapping().ok_or_else(|| malformed(node_path))?;

    let name = mapping
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(node_path))?
        .to_string();
    let help = mapping
        .get("help")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(node_path))?
        .to_string();

    let arg_type = match mapping.get("type") {
        None => ArgType::default(),
        Some(v) => v
            .as_str()
            .and_then(ArgType::from_name)
            .ok_or_else(|| malformed(node_path))?,
    };
    let positional = match mapping.get("positional") {
        None => false,
        Some(v) => v.as_bool().ok_or_else(|| malformed(node_path))?,
    };

    // Belt and braces: the validator already rejects this, but the
    // relationship must hold before dispatch whichever path built the tree.
    if positional && arg_type == ArgType::Flag {
        return Err(TreeError::PositionalFlag {
            name,
            path: node_path.to_string(),
        });
    }

    let default = match mapping.get("default") {
        None => None,
        Some(v) => Some(convert_default(v, arg_type).ok_or_else(|| malformed(node_path))?),
    };

    let choices = match mapping.get("enum") {
        None => None,
        Some(v) => {
            let seq = v.as_sequence().ok_or_else(|| malformed(node_path))?;
            let entries = seq
                .iter()
                .map(|e| e.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| malformed(node_path))?;
            if entries.len() < 2 {
                return Err(malformed(node_path));
            }
            Some(entries)
        }
    };

    Ok(Arg {
        name,
        help,
        arg_type,
        positional,
        default,
        choices,
    })
}

/// Convert a declared default into the typed value for the arg's type
fn convert_default(value: &Value, ty: ArgType) -> Option<ArgValue> {
    match ty {
        ArgType::String | ArgType::Text => value.as_str().map(|s| ArgValue::Str(s.to_string())),
        ArgType::Integer => value.as_i64().map(ArgValue::Int),
        ArgType::Float => value.as_f64().map(ArgValue::Float),
        ArgType::Flag => value.as_bool().map(ArgValue::Bool),
    }
}

fn malformed(path: &str) -> TreeError {
    TreeError::Malformed {
        path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_build_minimal_tree() {
        let tree = compile(&decl("help: Example CLI\ncommand: run\n")).unwrap();
        assert_eq!(tree.keyword, None);
        assert_eq!(tree.command.as_deref(), Some("run"));
        assert!(tree.subtree.is_empty());
    }

    #[test]
    fn test_build_preserves_declaration_order() {
        let yaml = r#"
help: Example CLI
subtree:
  - keyword: venv
    help: Set up the virtual environment
    command: make-venv
  - keyword: tests
    help: Run the tests
    command: run-tests
"#;
        let tree = compile(&decl(yaml)).unwrap();
        assert_eq!(tree.child_keywords(), vec!["venv", "tests"]);
        assert_eq!(tree.subtree[1].path, "tests");
    }

    #[test]
    fn test_build_is_deterministic() {
        let yaml = r#"
help: Example CLI
command: run
subtree:
  - keyword: dev
    help: Developer tools
    subtree:
      - keyword: bump
        help: Bump the version
        command: bump-version
        args:
          - name: part
            help: Version part
            positional: true
            enum: [major, minor, patch]
"#;
        let value = decl(yaml);
        let first = compile(&value).unwrap();
        let second = compile(&value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_rejects_duplicate_keyword() {
        let yaml = r#"
help: Example CLI
subtree:
  - keyword: venv
    help: Set up the virtual environment
    command: make-venv
  - keyword: venv
    help: Shadowing sibling
    command: make-venv-again
"#;
        let result = build_tree(&decl(yaml));
        assert_eq!(
            result,
            Err(TreeError::DuplicateKeyword {
                keyword: "venv".to_string(),
                path: "<root>".to_string(),
            })
        );
    }

    #[test]
    fn test_build_rejects_duplicate_arg_name() {
        let yaml = r#"
help: Example CLI
command: run
args:
  - name: port
    help: Port to listen on
  - name: port
    help: Port again
"#;
        let result = build_tree(&decl(yaml));
        assert_eq!(
            result,
            Err(TreeError::DuplicateArgName {
                name: "port".to_string(),
                path: "<root>".to_string(),
            })
        );
    }

    #[test]
    fn test_build_rejects_unreachable_node() {
        let yaml = r#"
help: Example CLI
subtree:
  - keyword: dev
    help: Developer tools
"#;
        let result = build_tree(&decl(yaml));
        assert_eq!(
            result,
            Err(TreeError::UnreachableNode {
                path: "dev".to_string(),
            })
        );
    }

    #[test]
    fn test_build_converts_typed_defaults() {
        let yaml = r#"
help: Example CLI
command: run
args:
  - name: port
    help: Port to listen on
    type: integer
    default: 8000
  - name: host
    help: Host interface
    default: 0.0.0.0
  - name: check
    help: Dry run
    type: flag
    default: true
"#;
        let tree = compile(&decl(yaml)).unwrap();
        assert_eq!(tree.args[0].default, Some(ArgValue::Int(8000)));
        assert_eq!(
            tree.args[1].default,
            Some(ArgValue::Str("0.0.0.0".to_string()))
        );
        assert_eq!(tree.args[2].default, Some(ArgValue::Bool(true)));
    }

    #[test]
    fn test_build_node_paths_join_keywords() {
        let yaml = r#"
help: Example CLI
subtree:
  - keyword: bot
    help: Bot management
    command: run-bot
    subtree:
      - keyword: user
        help: Manage bot users
        subtree:
          - keyword: add
            help: Add a user
            command: bot-add-player
"#;
        let tree = compile(&decl(yaml)).unwrap();
        let add = tree
            .child("bot")
            .and_then(|n| n.child("user"))
            .and_then(|n| n.child("add"))
            .unwrap();
        assert_eq!(add.path, "bot user add");
    }

    #[test]
    fn test_compile_surfaces_all_schema_errors() {
        let yaml = r#"
command: run
args:
  - name: part
    help: Version part
    type: list
"#;
        match compile(&decl(yaml)) {
            Err(DecliError::Schema(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected schema errors, got {:?}", other),
        }
    }
}
