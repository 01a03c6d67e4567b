// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use recal_core::{APP_NAME, Config, Event, EventStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd_event::{
    CmdEventDelete, CmdEventDetach, CmdEventEdit, CmdEventList, CmdEventMove, CmdEventNew,
};
use crate::cmd_rule::{CmdRuleDecode, CmdRuleEncode};
use crate::config::parse_config;

/// Run the recal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Recurring calendar events: rule codec and occurrence reconciliation.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $RECAL_CONFIG, then $XDG_CONFIG_HOME/recal/config.toml on \
Linux and MacOS, %LOCALAPPDATA%/recal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDetach::command())
                    .subcommand(CmdEventMove::command())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(
                Command::new("rule")
                    .alias("r")
                    .about("Encode and decode recurrence rules")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdRuleEncode::command())
                    .subcommand(CmdRuleDecode::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDetach::NAME, matches)) => EventDetach(CmdEventDetach::from(matches)),
                Some((CmdEventMove::NAME, matches)) => EventMove(CmdEventMove::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => EventDelete(CmdEventDelete::from(matches)),
                _ => return Err("Unknown event command".into()),
            },
            Some(("rule", matches)) => match matches.subcommand() {
                Some((CmdRuleEncode::NAME, matches)) => RuleEncode(CmdRuleEncode::from(matches)),
                Some((CmdRuleDecode::NAME, matches)) => RuleDecode(CmdRuleDecode::from(matches)),
                _ => return Err("Unknown rule command".into()),
            },
            _ => return Err("Unknown command".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List events
    EventList(CmdEventList),

    /// Create an event from a dragged range
    EventNew(CmdEventNew),

    /// Edit an event and its recurrence
    EventEdit(CmdEventEdit),

    /// Detach one occurrence from its series
    EventDetach(CmdEventDetach),

    /// Move an event or a whole series
    EventMove(CmdEventMove),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// Encode a recurrence rule
    RuleEncode(CmdRuleEncode),

    /// Decode a recurrence rule
    RuleDecode(CmdRuleDecode),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            EventList(a)   => Self::run_with(config, |x| a.run(x)).await,
            EventNew(a)    => Self::run_with(config, |x| a.run(x)).await,
            EventEdit(a)   => Self::run_with(config, |x| a.run(x)).await,
            EventDetach(a) => Self::run_with(config, |x| a.run(x)).await,
            EventMove(a)   => Self::run_with(config, |x| a.run(x)).await,
            EventDelete(a) => Self::run_with(config, |x| a.run(x)).await,
            RuleEncode(a)  => a.run(),
            RuleDecode(a)  => a.run(),
        }
    }

    /// Loads the collection, runs `f` on it and saves it back if `f` replaced it.
    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut Session) -> Result<(), Box<dyn Error>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut session = Session::load(config).await?;

        f(&mut session)?;

        session.close().await
    }
}

/// The event collection of one invocation, loaded from and saved to the store.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub events: Vec<Event>,
    store: EventStore,
    dirty: bool,
}

impl Session {
    pub async fn load(config: Config) -> Result<Self, Box<dyn Error>> {
        let store = EventStore::new(&config.events_path);
        let events = store.load().await?;
        Ok(Self {
            config,
            events,
            store,
            dirty: false,
        })
    }

    /// Replaces the collection with the result of a reconciliation.
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
        self.dirty = true;
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        if self.dirty {
            self.store.save(&self.events).await?;
        }
        Ok(())
    }
}
