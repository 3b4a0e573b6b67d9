//! Command dispatch: parse, resolve, invoke, capture.
//!
//! Dispatch is terminal for every failure: handler errors and unknown
//! commands become feedback cards, nothing propagates to the caller, and
//! the input loop stays responsive.

use crate::env::ShellEnv;
use crate::parser::parse_input;

/// Parse and dispatch one submitted line.
///
/// An empty command is a silent no-op. Every non-empty command (including
/// `clear`) is echoed as a styled command record before execution. After
/// the handler runs, everything it appended to the surface is regrouped
/// into a single output block -- except for `clear`, and except when the
/// handler cleared the surface itself (stale capture mark).
pub fn run_command(raw: &str, env: &mut ShellEnv<'_>) {
    let registry = env.registry;
    let parsed = parse_input(raw, registry);
    if parsed.cmd.is_empty() {
        return;
    }

    let timestamp = env.clock.timestamp();
    env.surface.echo_command(timestamp, raw);

    let args: Vec<&str> = parsed.args.iter().map(String::as_str).collect();

    // clear empties the surface and re-renders the banner; wrapping its
    // output would swallow the fresh banner.
    if parsed.cmd == "clear" {
        if let Some(cmd) = registry.resolve(&parsed.cmd) {
            env.session.push_recent(raw);
            if let Err(e) = cmd.execute(&args, &parsed.flags, env) {
                env.surface.echo_error(
                    &format!("Command execution failed: {e}"),
                    Some(&format!("{e:?}")),
                );
            }
        }
        env.session.typing.settle();
        return;
    }

    let mark = env.surface.mark();
    let generation = env.surface.generation();

    match registry.resolve(&parsed.cmd) {
        Some(cmd) => {
            env.session.push_recent(raw);
            if let Err(e) = cmd.execute(&args, &parsed.flags, env) {
                env.surface.echo_error(
                    &format!("Command execution failed: {e}"),
                    Some(&format!("{e:?}")),
                );
            }
        },
        None => {
            let details = match registry.suggest(&parsed.cmd) {
                Some(suggestion) => format!("Did you mean \"{suggestion}\"?"),
                None => "Type \"help\" to see available commands.".to_string(),
            };
            env.surface.echo_error(
                &format!("Command not found: {}", parsed.cmd),
                Some(&details),
            );
        },
    }

    // Group the handler's fragments into one output block, unless the
    // handler cleared the surface (the mark is stale then).
    if env.surface.generation() == generation {
        env.surface.wrap_since(mark);
    }

    env.session.typing.settle();
}
