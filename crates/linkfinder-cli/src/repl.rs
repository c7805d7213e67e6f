//! Subcommand: `linkfinder chat`, the interactive REPL.
//!
//! Every line is treated as a user chat message and routed through the
//! session; the active panel is printed after each one. Lines starting with
//! `:` are meta commands that call the session setters directly.

use std::io::{self, Write as _};

use anyhow::{Context, Result};
use linkfinder_intent::{ActivePanel, ContextUpdate, Session, Technology};
use tracing::info;

use crate::helpers::Advisor;

/// A parsed meta command.
#[derive(Debug, PartialEq, Eq)]
enum Meta<'a> {
    Back,
    Context,
    Panel,
    Zip(&'a str),
    Tech(&'a str),
    Show(&'a str),
    Help,
    Unknown(&'a str),
}

fn parse_meta(line: &str) -> Option<Meta<'_>> {
    let rest = line.strip_prefix(':')?;
    let (command, arg) = match rest.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (rest, ""),
    };
    Some(match command {
        "back" => Meta::Back,
        "context" => Meta::Context,
        "panel" => Meta::Panel,
        "zip" => Meta::Zip(arg),
        "tech" => Meta::Tech(arg),
        "show" => Meta::Show(arg),
        "help" => Meta::Help,
        _ => Meta::Unknown(command),
    })
}

fn print_help() {
    println!();
    println!("  Type a chat message, or one of:");
    println!("    :zip <ZIP>      - Enter a ZIP code directly");
    println!("    :tech <NAME>    - Add a technology, e.g. fiber, fixed wireless");
    println!("    :show <JSON>    - Show a panel, e.g. {{\"type\":\"quiz\"}}");
    println!("    :back           - Leave the current panel");
    println!("    :panel          - Print the active panel as JSON");
    println!("    :context        - Print the conversation context as JSON");
    println!("    quit / exit     - Leave");
    println!();
}

fn print_panel(panel: &ActivePanel) {
    println!("  [panel] {panel}");
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize")?;
    println!("{json}");
    Ok(())
}

/// Handle one meta command.
fn run_meta(session: &mut Session, meta: Meta<'_>) -> Result<()> {
    match meta {
        Meta::Back => print_panel(session.go_back()),
        Meta::Context => print_json(session.context())?,
        Meta::Panel => print_json(session.active_panel())?,
        Meta::Zip(zip) => match session.set_zip_code(zip) {
            Ok(_) => print_panel(session.active_panel()),
            Err(e) => println!("  {e}"),
        },
        Meta::Tech(name) => match name.parse::<Technology>() {
            Ok(tech) => {
                session.update_context(ContextUpdate::new().technology(tech));
                if let Some(best) = session.context().preferred_technology() {
                    println!("  Preferred technology: {best}");
                }
            }
            Err(e) => println!("  {e}"),
        },
        Meta::Show(json) => match serde_json::from_str::<ActivePanel>(json) {
            Ok(panel) => {
                session.show_panel(panel);
                print_panel(session.active_panel());
            }
            Err(e) => println!("  Not a panel: {e}"),
        },
        Meta::Help => print_help(),
        Meta::Unknown(command) => println!("  Unknown command :{command} (try :help)"),
    }
    Ok(())
}

/// Run the interactive REPL.
pub fn cmd_chat(advisor: &Advisor) -> Result<()> {
    let mut session = advisor.new_session()?;
    info!(session = %session.id(), "chat session started");

    println!();
    println!("  linkfinder v{}", env!("CARGO_PKG_VERSION"));
    println!("  Ask about internet providers, or ':help'. 'quit' to exit.");
    print_panel(session.active_panel());
    println!();

    let stdin = io::stdin();
    let mut line_buf = String::new();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        line_buf.clear();
        let bytes_read = stdin
            .read_line(&mut line_buf)
            .context("failed to read input")?;
        if bytes_read == 0 {
            println!();
            info!("EOF received, exiting");
            break;
        }

        let trimmed = line_buf.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            info!("user requested exit");
            break;
        }

        if let Some(meta) = parse_meta(trimmed) {
            run_meta(&mut session, meta)?;
            continue;
        }

        match session.process_message(trimmed) {
            Some(rule) => {
                print_panel(session.active_panel());
                println!("  ({rule})");
            }
            None => println!("  (no panel change)"),
        }
    }

    info!(session = %session.id(), "chat session ended");
    Ok(())
}
