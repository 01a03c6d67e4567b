// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use recal_core::{
    BoundaryInput, Event, EventDraft, Frequency, ReconcileError, Weekday, commit_edit,
    create_from_drag, delete_event, detach_occurrence, move_event, toggle_day_of_week,
};

use crate::arg::{CommonArgs, EventArgs, RuleArgs};
use crate::cli::Session;
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{OutputFormat, parse_boundary};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub start: String,
    pub end: Option<String>,
    pub title: Option<String>,
    pub color: Option<String>,
    pub resource: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create an event as if dragged on the calendar")
            .arg(EventArgs::start(true))
            .arg(EventArgs::end(false))
            .arg(EventArgs::title())
            .arg(EventArgs::color())
            .arg(EventArgs::resource())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            start: EventArgs::get_start(matches).expect("start is required"),
            end: EventArgs::get_end(matches),
            title: EventArgs::get_title(matches),
            color: EventArgs::get_color(matches),
            resource: EventArgs::get_resource(matches),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating event...");
        let start = parse_boundary(&self.start)?;
        let mut draft = match self.end {
            Some(end) => EventDraft::new(start, parse_boundary(&end)?),
            None => EventDraft::with_default_duration(start, session.config.default_duration.get())?,
        };
        draft.title = self.title;
        draft.color = self.color;
        draft.resource_id = self.resource;

        let events = create_from_drag(&session.events, draft, &session.config.palette);
        let created = events.last().ok_or("No event created")?;
        created.validate()?;

        print_events(std::slice::from_ref(created), self.output_format, false);
        session.replace(events);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,

    pub freq: Option<Frequency>,
    pub interval: Option<u32>,
    pub days: Option<Vec<Weekday>>,
    pub toggle_days: Vec<Weekday>,

    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event and its recurrence, then commit it")
            .arg(EventArgs::id("The id of the event to edit"))
            .arg(EventArgs::title())
            .arg(EventArgs::description())
            .arg(EventArgs::start(false))
            .arg(EventArgs::end(false))
            .arg(RuleArgs::freq(false))
            .arg(RuleArgs::interval())
            .arg(RuleArgs::day())
            .arg(RuleArgs::toggle_day())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            title: EventArgs::get_title(matches),
            description: EventArgs::get_description(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),

            freq: RuleArgs::get_freq(matches),
            interval: RuleArgs::get_interval(matches),
            days: RuleArgs::get_days(matches),
            toggle_days: RuleArgs::get_toggle_days(matches),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let mut edited = find(&session.events, &self.id)?.clone();
        if let Some(title) = self.title {
            edited.title = title;
        }
        if let Some(description) = self.description {
            edited.description = Some(description);
        }
        if let Some(start) = &self.start {
            edited.start = parse_boundary(start)?;
        }
        if let Some(end) = &self.end {
            edited.end = parse_boundary(end)?;
        }

        let mut desc = edited.recurrence();
        if let Some(freq) = self.freq {
            desc.frequency = freq;
        }
        if let Some(interval) = self.interval {
            desc = desc.with_interval(interval);
        }
        if let Some(days) = self.days {
            desc = desc.with_days(days);
        }
        for day in self.toggle_days {
            desc = toggle_day_of_week(desc, day);
        }

        let events = commit_edit(&session.events, edited, &desc)?;
        print_events(&[find(&events, &self.id)?.clone()], self.output_format, false);
        session.replace(events);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDetach {
    pub series_id: String,
    pub occurrence: String,
    pub start: String,
    pub end: String,
    pub title: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdEventDetach {
    pub const NAME: &str = "detach";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Move one occurrence of a recurring event out of its series")
            .arg(EventArgs::id("The id of the recurring series"))
            .arg(
                clap::arg!(--occurrence <OCCURRENCE> "Original start of the occurrence")
                    .required(true),
            )
            .arg(EventArgs::start(true))
            .arg(EventArgs::end(true))
            .arg(EventArgs::title())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            series_id: EventArgs::get_id(matches),
            occurrence: matches
                .get_one::<String>("occurrence")
                .expect("occurrence is required")
                .clone(),
            start: EventArgs::get_start(matches).expect("start is required"),
            end: EventArgs::get_end(matches).expect("end is required"),
            title: EventArgs::get_title(matches),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "detaching occurrence...");
        let parent = find(&session.events, &self.series_id)?;
        let occurrence = BoundaryInput::from(parse_boundary(&self.occurrence)?);

        let mut overrides = parent.clone();
        overrides.start = parse_boundary(&self.start)?;
        overrides.end = parse_boundary(&self.end)?;
        if let Some(title) = self.title {
            overrides.title = title;
        }
        overrides.validate()?;

        let events = detach_occurrence(&session.events, Some(parent), &occurrence, overrides)?;
        let detached = events.last().ok_or("No override created")?;
        print_events(std::slice::from_ref(detached), self.output_format, true);
        session.replace(events);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventMove {
    pub id: String,
    pub start: String,
    pub end: String,

    pub output_format: OutputFormat,
}

impl CmdEventMove {
    pub const NAME: &str = "move";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("mv")
            .about("Move an event, or a whole series, to new bounds")
            .arg(EventArgs::id("The id of the event to move"))
            .arg(EventArgs::start(true))
            .arg(EventArgs::end(true))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            start: EventArgs::get_start(matches).expect("start is required"),
            end: EventArgs::get_end(matches).expect("end is required"),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving event...");
        let start = parse_boundary(&self.start)?;
        let end = parse_boundary(&self.end)?;

        let events = move_event(&session.events, &self.id, start, end)?;
        let moved = find(&events, &self.id)?;
        moved.validate()?;

        print_events(std::slice::from_ref(moved), self.output_format, false);
        session.replace(events);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event, a series also loses its detached occurrences")
            .arg(EventArgs::id("The id of the event to delete"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
        }
    }

    pub fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let events = delete_event(&session.events, &self.id)?;
        let removed = session.events.len() - events.len();
        println!("Deleted {} event(s)", removed.to_string().bold());
        session.replace(events);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub fn run(self, session: &mut Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        if session.events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&session.events, self.output_format, self.verbose);
        Ok(())
    }
}

fn find<'a>(events: &'a [Event], id: &str) -> Result<&'a Event, ReconcileError> {
    events
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| ReconcileError::EventNotFound { id: id.to_string() })
}

fn print_events(events: &[Event], output_format: OutputFormat, verbose: bool) {
    let formatter =
        EventFormatter::new(EventColumn::defaults(verbose)).with_output_format(output_format);
    print!("{}", formatter.format(events));
}
