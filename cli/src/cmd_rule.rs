// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use recal_core::{Frequency, RecurrenceDescription, Weekday, decode, encode};

use crate::arg::RuleArgs;

#[derive(Debug, Clone)]
pub struct CmdRuleEncode {
    pub freq: Frequency,
    pub interval: Option<u32>,
    pub days: Vec<Weekday>,
}

impl CmdRuleEncode {
    pub const NAME: &str = "encode";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Encode a recurrence into a rule string")
            .arg(RuleArgs::freq(true))
            .arg(RuleArgs::interval())
            .arg(RuleArgs::day())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            freq: RuleArgs::get_freq(matches).unwrap_or_default(),
            interval: RuleArgs::get_interval(matches),
            days: RuleArgs::get_days(matches).unwrap_or_default(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "encoding rule...");
        let desc = self.description();
        match encode(&desc) {
            Some(rule) => println!("{rule}"),
            None => println!("{}", "Does not repeat".italic()),
        }
        Ok(())
    }

    fn description(&self) -> RecurrenceDescription {
        RecurrenceDescription::new(self.freq)
            .with_interval(self.interval.unwrap_or(1))
            .with_days(self.days.iter().copied())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRuleDecode {
    pub rule: String,
}

impl CmdRuleDecode {
    pub const NAME: &str = "decode";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Decode a rule string and show its normalized form")
            .arg(arg!(rule: <RULE> "Rule string, e.g. FREQ=WEEKLY;BYDAY=MO,WE"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rule: matches
                .get_one::<String>("rule")
                .expect("rule is required")
                .clone(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "decoding rule...");
        let desc = decode(&self.rule);
        println!("{}", desc);
        if let Some(rule) = encode(&desc) {
            println!("{} {}", "Normalized:".bold(), rule);
        }
        Ok(())
    }
}
