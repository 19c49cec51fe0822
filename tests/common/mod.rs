//! Common test utilities

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// The example project declaration used across the integration tests
pub const EXAMPLE_DECL: &str = r#"
help: Example project CLI
command: run
args:
  - name: extra
    help: Arguments to pass through to the app
    type: text
    positional: true
subtree:
  - keyword: venv
    help: Set up the project's virtual environment
    command: make-venv
  - keyword: tests
    help: Run the tests
    command: run-tests
    args:
      - name: pytest-args
        help: Arguments to pass through to pytest
        type: text
        positional: true
  - keyword: dev
    help: Developer tools
    subtree:
      - keyword: bumpversion
        help: Bump the package version
        command: bump-version
        args:
          - name: part
            help: Version part to bump
            positional: true
            enum: [major, minor, patch]
          - name: check
            help: Only check what would change
            type: flag
  - keyword: bot
    help: Run or manage the bot
    command: run-bot
    args:
      - name: bot-args
        help: Arguments to pass through to the bot
        type: text
        positional: true
    subtree:
      - keyword: user
        help: Manage bot users
        subtree:
          - keyword: add
            help: Add a player
            command: bot-add-player
            args:
              - name: player-name
                help: Name of the player to add
                positional: true
          - keyword: remove
            help: Remove a player
            command: bot-remove-player
            args:
              - name: player-name
                help: Name of the player to remove
                positional: true
  - keyword: server
    help: Server controls
    subtree:
      - keyword: start
        help: Start the server
        command: start-server
        args:
          - name: port
            help: Port to listen on
            type: integer
            default: 8000
          - name: host
            help: Host interface to bind
            default: 0.0.0.0
"#;

/// Create a temporary directory holding a declaration file
#[allow(dead_code)]
pub fn create_decl_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let decl_path = temp_dir.path().join("decli.yml");
    fs::write(&decl_path, content).unwrap();
    (temp_dir, decl_path)
}

/// Turn a token slice into owned invocation tokens
#[allow(dead_code)]
pub fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
