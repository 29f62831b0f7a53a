//! Interactive session - a line-oriented operator prompt.
//!
//! One engine lives for the whole session, so interface numbering and the
//! "new" markers carry over between commands. A failed command prints its
//! error and the prompt continues.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use ifbind_core::IfBindEngine;
use tracing::debug;

use crate::commands;

#[derive(Debug, PartialEq, Eq)]
enum Action {
    List,
    Refresh,
    Add(String),
    Remove(String),
    Processes(Option<String>),
    Bind { pid: u32, ordinal: usize },
    Primary,
    Help,
    Quit,
}

fn parse(line: &str) -> std::result::Result<Option<Action>, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_lowercase().as_str() {
        "" => return Ok(None),
        "list" | "ls" => Action::List,
        "refresh" => Action::Refresh,
        "add" if !rest.is_empty() => Action::Add(rest.to_string()),
        "remove" | "rm" if !rest.is_empty() => Action::Remove(rest.to_string()),
        "add" | "remove" | "rm" => return Err(format!("Usage: {} <name>", command)),
        "ps" => Action::Processes((!rest.is_empty()).then(|| rest.to_string())),
        "bind" => {
            let mut args = rest.split_whitespace();
            let pid = args.next().and_then(|a| a.parse().ok());
            let ordinal = args.next().and_then(|a| a.parse().ok());
            match (pid, ordinal, args.next()) {
                (Some(pid), Some(ordinal), None) => Action::Bind { pid, ordinal },
                _ => return Err("Usage: bind <pid> <interface number>".to_string()),
            }
        }
        "primary" => Action::Primary,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("Unknown command: {} (try help)", other)),
    };
    Ok(Some(action))
}

fn print_help() {
    println!("Commands:");
    println!("  list | ls             Show numbered interfaces");
    println!("  refresh               Renumber from the current interface list");
    println!("  add <name>            Create a virtual interface");
    println!("  remove | rm <name>    Remove a virtual interface");
    println!("  ps [filter]           List running processes");
    println!("  bind <pid> <number>   Relaunch a process through an interface");
    println!("  primary               Show the primary IPv4 address");
    println!("  help                  Show this help");
    println!("  quit | exit           Leave the session");
}

fn execute(engine: &IfBindEngine, action: Action) -> Result<()> {
    debug!(?action, "Session command");
    match action {
        Action::List => commands::interfaces::run(engine, false)?,
        Action::Refresh => {
            engine.refresh_interfaces()?;
            commands::interfaces::run(engine, false)?;
        }
        Action::Add(name) => commands::adapter::add(engine, &name)?,
        Action::Remove(name) => commands::adapter::remove(engine, &name)?,
        Action::Processes(filter) => commands::processes::run(engine, filter.as_deref(), false)?,
        Action::Bind { pid, ordinal } => commands::bind::run(engine, Some(pid), None, ordinal)?,
        Action::Primary => match engine.primary_address()? {
            Some(address) => println!("Primary address: {}", address),
            None => println!("No routable IPv4 address found."),
        },
        Action::Help => print_help(),
        Action::Quit => {}
    }
    Ok(())
}

pub fn run(engine: &IfBindEngine) -> Result<()> {
    debug!(config = ?engine.config(), "Session started");
    commands::interfaces::run(engine, false)?;
    println!("\nType help for commands.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("ifbind> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse(&line) {
            Ok(None) => {}
            Ok(Some(Action::Quit)) => break,
            Ok(Some(action)) => {
                if let Err(e) = execute(engine, action) {
                    println!("Error: {:#}", e);
                }
            }
            Err(usage) => println!("{}", usage),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse("  "), Ok(None));
        assert_eq!(parse("ls"), Ok(Some(Action::List)));
        assert_eq!(parse("LIST\n"), Ok(Some(Action::List)));
        assert_eq!(parse("exit"), Ok(Some(Action::Quit)));
        assert_eq!(parse("primary"), Ok(Some(Action::Primary)));
    }

    #[test]
    fn test_parse_names_keep_spaces() {
        assert_eq!(
            parse("add Work VPN"),
            Ok(Some(Action::Add("Work VPN".to_string())))
        );
        assert_eq!(
            parse("rm  tap-work "),
            Ok(Some(Action::Remove("tap-work".to_string())))
        );
        assert!(parse("add").is_err());
    }

    #[test]
    fn test_parse_ps_filter() {
        assert_eq!(parse("ps"), Ok(Some(Action::Processes(None))));
        assert_eq!(
            parse("ps chrome"),
            Ok(Some(Action::Processes(Some("chrome".to_string()))))
        );
    }

    #[test]
    fn test_parse_bind() {
        assert_eq!(
            parse("bind 1234 2"),
            Ok(Some(Action::Bind {
                pid: 1234,
                ordinal: 2
            }))
        );
        assert!(parse("bind 1234").is_err());
        assert!(parse("bind abc 2").is_err());
        assert!(parse("bind 1 2 3").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse("frobnicate").unwrap_err().contains("frobnicate"));
    }
}
