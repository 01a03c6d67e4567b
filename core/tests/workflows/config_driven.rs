// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.
//!
//! These tests validate how configuration affects event creation, including
//! the palette and the default duration.

use jiff::SignedDuration;
use recal_core::{Boundary, Config, EventDraft, EventStore, create_from_drag};

use crate::common::{sample_events, setup_temp_dirs, test_config, ts};

#[tokio::test]
async fn config_default_duration_fills_end() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config: Config = toml::from_str(&format!(
        r#"
        events_path = "{}"
        default_duration = "00:45"
        "#,
        temp_dirs.events_path.display()
    ))
    .unwrap();

    // Act
    let draft =
        EventDraft::with_default_duration(ts("2024-09-20T09:00:00Z"), config.default_duration.get())
            .unwrap();
    let events = create_from_drag(&[], draft, &config.palette);
    EventStore::new(&config.events_path).save(&events).await.unwrap();

    // Assert
    let reloaded = EventStore::new(&config.events_path).load().await.unwrap();
    assert_eq!(reloaded[0].end, Boundary::Instant(ts("2024-09-20T09:45:00Z")));
    assert_eq!(reloaded[0].color.as_ref(), config.palette.first());
}

#[test]
fn config_palette_is_round_robin() {
    // Arrange
    let mut config = test_config(std::path::Path::new("/tmp/events.json"));
    config.palette = vec!["#a".to_string(), "#b".to_string(), "#c".to_string()];
    let draft = EventDraft::new(ts("2024-09-20T09:00:00Z"), ts("2024-09-20T10:00:00Z"));

    // Act
    let mut events = sample_events();
    for _ in 0..3 {
        events = create_from_drag(&events, draft.clone(), &config.palette);
    }

    // Assert - the sample holds three events, so colors start at index 0
    let colors: Vec<_> = events[3..].iter().map(|a| a.color.as_deref()).collect();
    assert_eq!(colors, vec![Some("#a"), Some("#b"), Some("#c")]);
}

#[test]
fn config_normalize_expands_home() {
    // Arrange
    let mut config = test_config(std::path::Path::new("~/recal/events.json"));
    config.default_duration = recal_core::ConfigDuration(SignedDuration::ZERO);

    // Act
    config.normalize().unwrap();

    // Assert
    assert!(config.events_path.is_absolute());
    assert!(config.events_path.ends_with("recal/events.json"));
    assert_eq!(config.default_duration.get(), SignedDuration::from_mins(60));
}
