// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the recal-core crate.
//!
//! These tests validate multi-step workflows that load a collection, apply
//! several reconciliation operations in sequence and persist the result.

mod config_driven;
mod series_lifecycle;
mod store_sync;
