//! Integration tests for routing, resolution and dispatch

mod common;

use std::sync::{Arc, Mutex};

use decli::decl::{compile, parse_decl_str, ArgValue};
use decli::engine::{Dispatcher, HandlerRegistry, Outcome, Plan};
use decli::error::{DecliError, ResolutionError, RoutingError};

use common::tokens;

fn dispatcher(registry: HandlerRegistry) -> Dispatcher {
    let decl = parse_decl_str(common::EXAMPLE_DECL).unwrap();
    Dispatcher::new(compile(&decl).unwrap(), registry)
}

#[test]
fn test_server_start_scenario() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in_handler = Arc::clone(&seen);

    let mut registry = HandlerRegistry::new();
    registry.register("start-server", move |args| {
        let mut seen = seen_in_handler.lock().unwrap();
        for (name, value) in args.iter() {
            seen.push((name.to_string(), value.clone()));
        }
        Ok(())
    });

    let outcome = dispatcher(registry)
        .dispatch(&tokens(&["server", "start", "--port", "8080"]))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed {
            command: "start-server".to_string(),
        }
    );
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("port".to_string(), ArgValue::Int(8080)),
            ("host".to_string(), ArgValue::Str("0.0.0.0".to_string())),
        ]
    );
}

#[test]
fn test_keyword_routing_consumes_three_keywords() {
    let d = dispatcher(HandlerRegistry::new());
    match d.plan(&tokens(&["bot", "user", "add", "player1"])).unwrap() {
        Plan::Invoke {
            node,
            command,
            args,
        } => {
            assert_eq!(node.path, "bot user add");
            assert_eq!(command, "bot-add-player");
            assert_eq!(
                args.get("player-name"),
                Some(&ArgValue::Str("player1".to_string()))
            );
            assert_eq!(args.consumed(), 1);
        }
        other => panic!("expected invoke plan, got {:?}", other),
    }
}

#[test]
fn test_escape_passes_tokens_through_verbatim() {
    let mut registry = HandlerRegistry::new();
    registry.register("run-bot", |args| {
        assert_eq!(args.get("bot-args"), Some(&ArgValue::Str("-h".to_string())));
        Ok(())
    });

    let outcome = dispatcher(registry)
        .dispatch(&tokens(&["bot", "--", "-h"]))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed {
            command: "run-bot".to_string(),
        }
    );
}

#[test]
fn test_enum_rejects_non_member() {
    let d = dispatcher(HandlerRegistry::new());
    let result = d.dispatch(&tokens(&["dev", "bumpversion", "huge"]));
    assert!(matches!(
        result,
        Err(DecliError::Resolution(ResolutionError::InvalidChoice { name, .. })) if name == "part"
    ));
}

#[test]
fn test_flag_set_by_presence_only() {
    let checked = Arc::new(Mutex::new(None));
    let checked_in_handler = Arc::clone(&checked);

    let mut registry = HandlerRegistry::new();
    registry.register("bump-version", move |args| {
        *checked_in_handler.lock().unwrap() = args.get("check").and_then(ArgValue::as_bool);
        Ok(())
    });
    let d = dispatcher(registry);

    d.dispatch(&tokens(&["dev", "bumpversion", "--check", "patch"]))
        .unwrap();
    assert_eq!(*checked.lock().unwrap(), Some(true));

    d.dispatch(&tokens(&["dev", "bumpversion", "patch"])).unwrap();
    assert_eq!(*checked.lock().unwrap(), Some(false));
}

#[test]
fn test_missing_required_part_never_defaults() {
    let d = dispatcher(HandlerRegistry::new());
    let result = d.dispatch(&tokens(&["dev", "bumpversion"]));
    assert!(matches!(
        result,
        Err(DecliError::Resolution(ResolutionError::MissingArgument { name, .. })) if name == "part"
    ));
}

#[test]
fn test_grouping_node_without_command_suggests_children() {
    let d = dispatcher(HandlerRegistry::new());
    match d.dispatch(&tokens(&["server"])) {
        Err(DecliError::Routing(RoutingError::NoCommand { path, suggestions })) => {
            assert_eq!(path, "server");
            assert_eq!(suggestions, vec!["start".to_string()]);
        }
        other => panic!("expected routing error, got {:?}", other),
    }
}

#[test]
fn test_root_command_absorbs_free_tokens() {
    let mut registry = HandlerRegistry::new();
    registry.register("run", |args| {
        assert_eq!(
            args.get("extra"),
            Some(&ArgValue::Str("--fast --safe".to_string()))
        );
        Ok(())
    });

    let outcome = dispatcher(registry)
        .dispatch(&tokens(&["--", "--fast", "--safe"]))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed {
            command: "run".to_string(),
        }
    );
}

#[test]
fn test_help_rendering_for_routed_node() {
    let d = dispatcher(HandlerRegistry::new());
    match d.dispatch(&tokens(&["server", "start", "--help"])).unwrap() {
        Outcome::Help(text) => {
            assert!(text.contains("Start the server"));
            assert!(text.contains("--port"));
            assert!(text.contains("default: 8000"));
            assert!(text.contains("--host"));
        }
        other => panic!("expected help outcome, got {:?}", other),
    }
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    let mut registry = HandlerRegistry::new();
    registry.register("make-venv", |_args| Ok(()));
    let d = Arc::new(dispatcher(registry));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let d = Arc::clone(&d);
            std::thread::spawn(move || d.dispatch(&tokens(&["venv"])).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            Outcome::Completed {
                command: "make-venv".to_string(),
            }
        );
    }
}
