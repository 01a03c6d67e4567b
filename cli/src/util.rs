// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use recal_core::Boundary;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

const HINT: &str = "Expected format: YYYY-MM-DD, YYYY-MM-DD HH:MM or an RFC 3339 timestamp";

/// Parses a boundary from the command line.
///
/// `YYYY-MM-DD` is an all-day date, `YYYY-MM-DD HH:MM` is read in the local
/// time zone and anything else must be an RFC 3339 timestamp with offset.
pub fn parse_boundary(s: &str) -> Result<Boundary, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::strptime("%Y-%m-%d %H:%M", s) {
        return dt
            .to_zoned(TimeZone::system())
            .map(|zoned| Boundary::Instant(zoned.timestamp()))
            .map_err(|e| format!("Invalid local time {s:?}: {e}"));
    }

    s.parse()
        .map_err(|e| format!("Invalid date {s:?}: {e}. {HINT}"))
}

/// Formats a boundary for display, instants in the local time zone.
pub fn format_boundary(boundary: &Boundary) -> String {
    match boundary {
        Boundary::AllDay(d) => d.to_string(),
        Boundary::Instant(ts) => ts
            .to_zoned(TimeZone::system())
            .strftime("%Y-%m-%d %H:%M")
            .to_string(),
    }
}

/// Truncates `s` to at most `max_width` display columns, appending `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.to_string().width();
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}
