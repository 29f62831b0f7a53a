//! ifbind CLI - Virtual interfaces and per-process address binding
//!
//! A command-line tool for listing interfaces, creating and removing
//! virtual adapters, and relaunching applications bound to an interface.

mod commands;
mod session;

use clap::{Parser, Subcommand};
use ifbind_core::IfBindEngine;

#[derive(Parser)]
#[command(name = "ifbind")]
#[command(author, version, about = "Route an application's traffic through a chosen interface")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Disable the interactive session
    #[arg(long, global = true)]
    no_interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List network interfaces with their numbers
    #[command(alias = "ls")]
    Interfaces,

    /// Create a virtual interface
    Add {
        /// Name of the new interface
        name: String,
    },

    /// Remove a virtual interface
    #[command(alias = "rm")]
    Remove {
        /// Name of the interface to remove
        name: String,
    },

    /// List running processes
    #[command(alias = "ps")]
    Processes {
        /// Filter by process name
        #[arg(short = 'n', long)]
        name: Option<String>,
    },

    /// Relaunch a running application bound to an interface's IPv4 address
    Bind {
        /// PID of the running application
        #[arg(short, long, conflicts_with = "process", required_unless_present = "process")]
        pid: Option<u32>,

        /// Process name of the running application (first match)
        #[arg(short = 'n', long)]
        process: Option<String>,

        /// Interface number as shown by `ifbind interfaces`
        #[arg(short, long)]
        interface: usize,
    },

    /// Show or change tool settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the virtual adapter tool path
    SetAdapterTool { path: std::path::PathBuf },
    /// Set the binding tool path
    SetBindTool { path: std::path::PathBuf },
    /// Set the adapter hardware id
    SetHwid { hardware_id: String },
    /// Set the adapter tool timeout in seconds (0 disables it)
    SetTimeout { secs: u64 },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action }) => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(cli.json)?,
            ConfigAction::SetAdapterTool { path } => commands::config::set_adapter_tool(path)?,
            ConfigAction::SetBindTool { path } => commands::config::set_bind_tool(path)?,
            ConfigAction::SetHwid { hardware_id } => commands::config::set_hwid(&hardware_id)?,
            ConfigAction::SetTimeout { secs } => commands::config::set_timeout(secs)?,
        },
        Some(Commands::Interfaces) => {
            commands::interfaces::run(&IfBindEngine::new()?, cli.json)?;
        }
        Some(Commands::Add { name }) => {
            commands::adapter::add(&IfBindEngine::new()?, &name)?;
        }
        Some(Commands::Remove { name }) => {
            commands::adapter::remove(&IfBindEngine::new()?, &name)?;
        }
        Some(Commands::Processes { name }) => {
            commands::processes::run(&IfBindEngine::new()?, name.as_deref(), cli.json)?;
        }
        Some(Commands::Bind {
            pid,
            process,
            interface,
        }) => {
            commands::bind::run(&IfBindEngine::new()?, pid, process.as_deref(), interface)?;
        }
        None => {
            let engine = IfBindEngine::new()?;
            // Default: interactive session, or a plain listing when piped
            if cli.no_interactive || !atty::is(atty::Stream::Stdout) {
                commands::interfaces::run(&engine, cli.json)?;
            } else {
                session::run(&engine)?;
            }
        }
    }

    Ok(())
}
