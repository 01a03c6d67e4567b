// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use recal_core::{Frequency, Weekday};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id(help: &'static str) -> Arg {
        arg!(id: <ID>).help(help)
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("id")
            .expect("id is required")
            .clone()
    }

    pub fn title() -> Arg {
        arg!(-t --title <TITLE> "Title of the event")
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event, empty to clear")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn start(required: bool) -> Arg {
        arg!(--start <START> "Start date, date and time, or timestamp of the event")
            .required(required)
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end(required: bool) -> Arg {
        arg!(--end <END> "End date, date and time, or timestamp of the event").required(required)
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }

    pub fn color() -> Arg {
        arg!(--color <COLOR> "Display color of the event, e.g. #BA3D9D")
    }

    pub fn get_color(matches: &ArgMatches) -> Option<String> {
        matches.get_one("color").cloned()
    }

    pub fn resource() -> Arg {
        arg!(--resource <RESOURCE> "Resource the event belongs to")
    }

    pub fn get_resource(matches: &ArgMatches) -> Option<String> {
        matches.get_one("resource").cloned()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleArgs;

impl RuleArgs {
    pub fn freq(required: bool) -> Arg {
        arg!(--freq <FREQ> "Frequency: none, daily, weekly, monthly or yearly")
            .value_parser(value_parser!(Frequency))
            .required(required)
    }

    pub fn get_freq(matches: &ArgMatches) -> Option<Frequency> {
        matches.get_one("freq").copied()
    }

    pub fn interval() -> Arg {
        arg!(--interval <N> "Repeat every N periods")
            .value_parser(value_parser!(u32).range(1..))
    }

    pub fn get_interval(matches: &ArgMatches) -> Option<u32> {
        matches.get_one("interval").copied()
    }

    pub fn day() -> Arg {
        arg!(--day <DAY> "Weekday of a weekly rule (SU..SA or 0..6), repeatable")
            .value_parser(value_parser!(Weekday))
            .action(ArgAction::Append)
    }

    pub fn get_days(matches: &ArgMatches) -> Option<Vec<Weekday>> {
        matches
            .get_many::<Weekday>("day")
            .map(|days| days.copied().collect())
    }

    pub fn toggle_day() -> Arg {
        arg!(--"toggle-day" <DAY> "Toggle a weekday of the current rule, repeatable")
            .value_parser(value_parser!(Weekday))
            .action(ArgAction::Append)
    }

    pub fn get_toggle_days(matches: &ArgMatches) -> Vec<Weekday> {
        matches
            .get_many::<Weekday>("toggle-day")
            .map(|days| days.copied().collect())
            .unwrap_or_default()
    }
}
