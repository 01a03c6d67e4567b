// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Custom assertion helpers
//! - Temporary directory management with auto-cleanup

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use assertions::{assert_detached, assert_file_exists};
#[allow(unused_imports)]
pub use fixtures::{
    ALL_DAY_SERIES_ID, SAMPLE_EVENTS_JSON, TIMED_SERIES_ID, WEEKLY_RULE, sample_events, test_config,
    timed_event, ts,
};
pub use temp_dir::setup_temp_dirs;
