// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod arg;
mod cli;
mod cmd_event;
mod cmd_rule;
mod config;
mod event_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, Session, run};
pub use crate::cmd_event::{
    CmdEventDelete, CmdEventDetach, CmdEventEdit, CmdEventList, CmdEventMove, CmdEventNew,
};
pub use crate::cmd_rule::{CmdRuleDecode, CmdRuleEncode};
pub use crate::util::OutputFormat;
