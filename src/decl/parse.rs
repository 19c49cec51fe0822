//! Declaration file loading and discovery
//!
//! The engine itself consumes an already-parsed nested structure; this
//! module is the thin collaborator that gets one from disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::decl::tree::compile;
use crate::decl::types::Node;
use crate::error::{DecliError, Result};

/// Default declaration file names to search for
const DECL_FILE_NAMES: &[&str] = &["decli.yml", "decli.yaml"];

/// Find the declaration file by searching current and parent directories
pub fn find_decl_file() -> Result<PathBuf> {
    find_decl_file_from(env::current_dir()?)
}

/// Find the declaration file starting from a specific directory
pub fn find_decl_file_from(start_dir: PathBuf) -> Result<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in DECL_FILE_NAMES {
            let decl_path = current_dir.join(file_name);
            searched_paths.push(decl_path.display().to_string());

            if decl_path.is_file() {
                return Ok(decl_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                return Err(DecliError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!(
                        "no declaration file found (searched: {})",
                        searched_paths.join(", ")
                    ),
                )))
            }
        }
    }
}

/// Parse a declaration from a YAML string into the raw nested structure
pub fn parse_decl_str(yaml: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a declaration file into the raw nested structure
pub fn parse_decl_file(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    parse_decl_str(&contents)
}

/// Load, validate and compile a declaration file into a command tree
pub fn load_file(path: &Path) -> Result<Node> {
    let decl = parse_decl_file(path)?;
    compile(&decl)
}

/// Load a declaration with automatic file discovery
pub fn load_auto() -> Result<(Node, PathBuf)> {
    let path = find_decl_file()?;
    let tree = load_file(&path)?;
    Ok((tree, path))
}
