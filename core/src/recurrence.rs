// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Compact recurrence rules, a restricted subset of the RFC 5545 RRULE grammar.
//!
//! Only `FREQ`, `INTERVAL` and `BYDAY` are understood. Decoding is lenient:
//! unknown parts are skipped and malformed values fall back to defaults, so
//! [`decode`] never fails.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::event::Boundary;

const KW_RRULE_PREFIX: &str = "RRULE:";
const KW_FREQ: &str = "FREQ";
const KW_INTERVAL: &str = "INTERVAL";
const KW_BYDAY: &str = "BYDAY";

const KW_FREQ_DAILY: &str = "DAILY";
const KW_FREQ_WEEKLY: &str = "WEEKLY";
const KW_FREQ_MONTHLY: &str = "MONTHLY";
const KW_FREQ_YEARLY: &str = "YEARLY";

const KW_DAY_SU: &str = "SU";
const KW_DAY_MO: &str = "MO";
const KW_DAY_TU: &str = "TU";
const KW_DAY_WE: &str = "WE";
const KW_DAY_TH: &str = "TH";
const KW_DAY_FR: &str = "FR";
const KW_DAY_SA: &str = "SA";

/// How often a series repeats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// The event does not repeat.
    #[default]
    None,

    /// Every `interval` days.
    Daily,

    /// Every `interval` weeks, optionally on selected weekdays.
    Weekly,

    /// Every `interval` months.
    Monthly,

    /// Every `interval` years.
    Yearly,
}

impl Frequency {
    /// The `FREQ` value, `None` for [`Frequency::None`].
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Frequency::None => None,
            Frequency::Daily => Some(KW_FREQ_DAILY),
            Frequency::Weekly => Some(KW_FREQ_WEEKLY),
            Frequency::Monthly => Some(KW_FREQ_MONTHLY),
            Frequency::Yearly => Some(KW_FREQ_YEARLY),
        }
    }

    fn from_keyword(value: &str) -> Self {
        match value {
            KW_FREQ_DAILY => Frequency::Daily,
            KW_FREQ_WEEKLY => Frequency::Weekly,
            KW_FREQ_MONTHLY => Frequency::Monthly,
            KW_FREQ_YEARLY => Frequency::Yearly,
            _ => Frequency::None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Frequency::None => "Does not repeat",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }

    fn plural_unit(self) -> &'static str {
        match self {
            Frequency::None => "",
            Frequency::Daily => "days",
            Frequency::Weekly => "weeks",
            Frequency::Monthly => "months",
            Frequency::Yearly => "years",
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    /// Accepts both the lowercase names used by the editing surface and the
    /// RRULE keywords.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Frequency::None),
            KW_FREQ_DAILY => Ok(Frequency::Daily),
            KW_FREQ_WEEKLY => Ok(Frequency::Weekly),
            KW_FREQ_MONTHLY => Ok(Frequency::Monthly),
            KW_FREQ_YEARLY => Ok(Frequency::Yearly),
            _ => Err(format!("Unknown frequency: {s}")),
        }
    }
}

/// Day of the week, ordered from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in index order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// The weekday for an index in `0..=6`, `None` otherwise.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Index of the weekday, 0 for Sunday through 6 for Saturday.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The two-letter `BYDAY` token.
    pub fn token(self) -> &'static str {
        match self {
            Weekday::Sunday => KW_DAY_SU,
            Weekday::Monday => KW_DAY_MO,
            Weekday::Tuesday => KW_DAY_TU,
            Weekday::Wednesday => KW_DAY_WE,
            Weekday::Thursday => KW_DAY_TH,
            Weekday::Friday => KW_DAY_FR,
            Weekday::Saturday => KW_DAY_SA,
        }
    }

    /// Parses a two-letter `BYDAY` token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.token() == token)
    }

    /// Short label used for display, e.g. `Mon`.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if let Some(day) = Self::from_token(&upper) {
            return Ok(day);
        }

        match s.parse::<u8>().ok().and_then(Self::from_index) {
            Some(day) => Ok(day),
            None => Err(format!("Unknown weekday: {s}")),
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(day: jiff::civil::Weekday) -> Self {
        match day {
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
        }
    }
}

/// Structured form of a recurrence rule, as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceDescription {
    /// How often the series repeats.
    pub frequency: Frequency,

    /// Step between occurrences, in units of `frequency`.
    pub interval: NonZeroU32,

    /// Selected weekdays, only meaningful for [`Frequency::Weekly`].
    /// Empty means the weekday of the start boundary.
    pub days_of_week: BTreeSet<Weekday>,
}

impl Default for RecurrenceDescription {
    fn default() -> Self {
        Self {
            frequency: Frequency::None,
            interval: NonZeroU32::MIN,
            days_of_week: BTreeSet::new(),
        }
    }
}

impl RecurrenceDescription {
    /// Creates a description with the given frequency and interval 1.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Default::default()
        }
    }

    /// Sets the interval, values below 1 are clamped to 1.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN);
        self
    }

    /// Sets the weekdays for a weekly recurrence.
    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_of_week = days.into_iter().collect();
        self
    }

    /// Decodes the rule of an event, or returns the non-repeating default.
    pub fn from_rule(rule: Option<&str>) -> Self {
        rule.map(decode).unwrap_or_default()
    }

    /// Whether this description produces a rule at all.
    pub fn is_recurring(&self) -> bool {
        self.frequency != Frequency::None
    }

    /// Encodes the description, see [`encode`].
    pub fn encode(&self) -> Option<String> {
        encode(self)
    }

    /// The weekdays a weekly series actually lands on: the selected set, or the
    /// weekday of `start` when none is selected.
    pub fn effective_weekdays(&self, start: &Boundary) -> BTreeSet<Weekday> {
        if self.days_of_week.is_empty() {
            BTreeSet::from([start.weekday()])
        } else {
            self.days_of_week.clone()
        }
    }
}

impl Display for RecurrenceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.frequency, self.interval.get()) {
            (Frequency::None, _) | (_, 1) => write!(f, "{}", self.frequency.label())?,
            (_, n) => write!(f, "Every {n} {}", self.frequency.plural_unit())?,
        }

        if self.frequency == Frequency::Weekly && !self.days_of_week.is_empty() {
            let labels: Vec<_> = self.days_of_week.iter().map(|d| d.label()).collect();
            write!(f, " on {}", labels.join(", "))?;
        }
        Ok(())
    }
}

/// Encodes a description into a rule string.
///
/// Returns `None` for a non-repeating description. `INTERVAL` is omitted when
/// it is 1 and `BYDAY` is only written for weekly rules with selected days.
pub fn encode(desc: &RecurrenceDescription) -> Option<String> {
    let freq = desc.frequency.keyword()?;

    let mut parts = vec![format!("{KW_FREQ}={freq}")];
    if desc.interval.get() > 1 {
        parts.push(format!("{KW_INTERVAL}={}", desc.interval));
    }

    if desc.frequency == Frequency::Weekly && !desc.days_of_week.is_empty() {
        let days: Vec<_> = desc.days_of_week.iter().map(|d| d.token()).collect();
        parts.push(format!("{KW_BYDAY}={}", days.join(",")));
    }

    Some(parts.join(";"))
}

/// Decodes a rule string. Never fails: anything unusable decodes to the
/// non-repeating default.
pub fn decode(rule: &str) -> RecurrenceDescription {
    let rule = rule.trim();
    let rule = rule.strip_prefix(KW_RRULE_PREFIX).unwrap_or(rule);

    let mut freq = None;
    let mut interval = None;
    let mut by_day = None;
    for part in rule.split(';') {
        let Some((key, value)) = part.split_once('=') else {
            if !part.trim().is_empty() {
                tracing::debug!(part, "ignoring malformed rule part");
            }
            continue;
        };

        let (key, value) = (key.trim(), value.trim());
        match key {
            KW_FREQ => {
                freq.get_or_insert(value);
            }
            KW_INTERVAL => {
                interval.get_or_insert(value);
            }
            KW_BYDAY => {
                by_day.get_or_insert(value);
            }
            _ => tracing::debug!(key, "ignoring unsupported rule part"),
        }
    }

    let frequency = freq.map(Frequency::from_keyword).unwrap_or_default();
    let interval = interval
        .and_then(|a| a.parse::<u32>().ok())
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN);

    let days_of_week = match (frequency, by_day) {
        (Frequency::Weekly, Some(days)) => parse_by_day(days),
        _ => BTreeSet::new(),
    };

    RecurrenceDescription {
        frequency,
        interval,
        days_of_week,
    }
}

fn parse_by_day(value: &str) -> BTreeSet<Weekday> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            Weekday::from_token(token).unwrap_or_else(|| {
                tracing::warn!(token, "unknown weekday in BYDAY, falling back to Sunday");
                Weekday::Sunday
            })
        })
        .collect()
}

/// Toggles a weekday in the description: removes it when selected, adds it
/// otherwise. The set stays in ascending order.
pub fn toggle_day_of_week(mut desc: RecurrenceDescription, day: Weekday) -> RecurrenceDescription {
    if !desc.days_of_week.remove(&day) {
        desc.days_of_week.insert(day);
    }
    desc
}
