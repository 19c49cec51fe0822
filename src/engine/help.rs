//! Help rendering
//!
//! Generates the plain-text help surface for any node: its description,
//! its children's keywords and its args. Presentation beyond plain text
//! (paging, colors, localization) is left to the consumer.

use std::fmt::Write;

use crate::decl::types::{Arg, ArgType, Node};

/// Render the help text for a node
pub fn render_help(node: &Node) -> String {
    let mut out = String::new();
    out.push_str(node.help.trim_end());
    out.push('\n');

    if !node.subtree.is_empty() {
        out.push_str("\nCommands:\n");
        let width = node
            .subtree
            .iter()
            .filter_map(|n| n.keyword.as_deref())
            .map(str::len)
            .max()
            .unwrap_or(0);
        for child in &node.subtree {
            if let Some(keyword) = &child.keyword {
                let _ = writeln!(out, "  {:<width$}  {}", keyword, child.help, width = width);
            }
        }
    }

    if !node.args.is_empty() {
        out.push_str("\nArguments:\n");
        let labels: Vec<String> = node.args.iter().map(arg_label).collect();
        let width = labels.iter().map(String::len).max().unwrap_or(0);
        for (arg, label) in node.args.iter().zip(&labels) {
            let _ = writeln!(
                out,
                "  {:<width$}  {}{}",
                label,
                arg.help,
                arg_details(arg),
                width = width
            );
        }
    }

    out
}

/// The display form of an arg: bare name when positional, `--name` otherwise
fn arg_label(arg: &Arg) -> String {
    if arg.positional {
        arg.name.clone()
    } else {
        format!("--{}", arg.name)
    }
}

/// Trailing detail: type, permitted values and default, when informative
fn arg_details(arg: &Arg) -> String {
    let mut parts = Vec::new();
    if arg.arg_type != ArgType::String {
        parts.push(arg.arg_type.name().to_string());
    }
    if let Some(choices) = &arg.choices {
        parts.push(format!("choices: {}", choices.join(", ")));
    }
    if let Some(default) = &arg.default {
        parts.push(format!("default: {}", default));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::tree::compile;

    fn node(yaml: &str) -> Node {
        compile(&serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_render_group_node_lists_children() {
        let yaml = r#"
help: Manage bot users
subtree:
  - keyword: add
    help: Add a user
    command: bot-add-player
  - keyword: remove
    help: Remove a user
    command: bot-remove-player
"#;
        let help = render_help(&node(yaml));
        assert!(help.starts_with("Manage bot users\n"));
        assert!(help.contains("Commands:"));
        assert!(help.contains("add     Add a user"));
        assert!(help.contains("remove  Remove a user"));
    }

    #[test]
    fn test_render_args_with_details() {
        let yaml = r#"
help: Start the server
command: start-server
args:
  - name: port
    help: Port to listen on
    type: integer
    default: 8000
  - name: part
    help: Version part to bump
    positional: true
    enum: [major, minor, patch]
  - name: check
    help: Only check what would change
    type: flag
"#;
        let help = render_help(&node(yaml));
        assert!(help.contains("Arguments:"));
        assert!(help.contains("--port"));
        assert!(help.contains("(integer; default: 8000)"));
        // Positional args are shown bare, without the -- prefix.
        assert!(help.contains("\n  part "));
        assert!(help.contains("(choices: major, minor, patch)"));
        assert!(help.contains("--check"));
        assert!(help.contains("(flag)"));
    }

    #[test]
    fn test_render_leaf_without_args() {
        let help = render_help(&node("help: Set up the virtual environment\ncommand: make-venv\n"));
        assert_eq!(help, "Set up the virtual environment\n");
    }
}
