//! Inspector binary
//!
//! `decli` loads a declaration file, validates and compiles it, then either
//! renders help or prints the dispatch plan for the given invocation tokens
//! (the routed command plus the resolved, typed arguments). No handlers are
//! invoked; binding commands to application logic is the embedding
//! program's job.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use colored::Colorize;

use crate::decl::parse::{load_auto, load_file};
use crate::engine::registry::HandlerRegistry;
use crate::engine::route::{Dispatcher, Plan};
use crate::error::Result;

/// Build the inspector's own argument parser
fn build_command() -> Command {
    Command::new("decli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect a declarative CLI: validate the declaration and show dispatch plans")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to the declaration file (searches for decli.yml by default)"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .help("Print the compiled tree as normalized YAML and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show routing detail alongside the plan")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .value_name("TOKENS")
                .help("Invocation tokens to route through the declared tree")
                .num_args(0..)
                .allow_hyphen_values(true)
                .trailing_var_arg(true),
        )
}

/// Run the inspector
pub fn run() -> Result<()> {
    let matches = build_command().get_matches();

    let tree = match matches.get_one::<String>("file") {
        Some(path) => load_file(&PathBuf::from(path))?,
        None => load_auto()?.0,
    };

    if matches.get_flag("dump") {
        print!("{}", serde_yaml::to_string(&tree)?);
        return Ok(());
    }

    let tokens: Vec<String> = matches
        .get_many::<String>("tokens")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let verbose = matches.get_flag("verbose");

    let dispatcher = Dispatcher::new(tree, HandlerRegistry::new());
    print_plan(&dispatcher, &tokens, verbose)
}

fn print_plan(dispatcher: &Dispatcher, tokens: &[String], verbose: bool) -> Result<()> {
    match dispatcher.plan(tokens)? {
        Plan::Help { text, .. } => print!("{}", text),
        Plan::Invoke {
            node,
            command,
            args,
        } => {
            println!("{} {}", "command:".green().bold(), command);
            if verbose {
                println!("{} {}", "node:".dimmed(), node.path);
                println!(
                    "{} {} routing, {} arguments",
                    "tokens:".dimmed(),
                    tokens.len() - args.consumed(),
                    args.consumed()
                );
            }
            for (name, value) in args.iter() {
                if value.is_absent() {
                    println!("  {} = {}", name, "<absent>".dimmed());
                } else {
                    println!("  {} = {}", name, value.to_string().cyan());
                }
            }
        }
    }
    Ok(())
}
