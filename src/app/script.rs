// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/script.rs
//
// Recorded interaction sessions, replayed against a fresh model.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use super::message::{InteractionMessage, Notification};
use super::model::WidgetModel;
use crate::config::AppConfig;
use crate::domain::crop::CropConfig;
use crate::domain::range::RangeConfig;

/// A TOML file with optional engine overrides and a list of steps:
///
/// ```toml
/// [range]
/// max = 10
///
/// [[steps]]
/// action = "range_geometry"
/// origin = 0.0
/// length = 100.0
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub range: Option<RangeConfig>,
    #[serde(default)]
    pub crop: Option<CropConfig>,
    #[serde(default)]
    pub steps: Vec<InteractionMessage>,
}

/// Result of replaying one step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub index: usize,
    pub notifications: Vec<Notification>,
    pub error: Option<String>,
}

impl Script {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse interaction script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// `base` with this script's engine overrides applied.
    pub fn config(&self, base: &AppConfig) -> AppConfig {
        let mut config = base.clone();
        if let Some(range) = &self.range {
            config.range = range.clone();
        }
        if let Some(crop) = &self.crop {
            config.crop = crop.clone();
        }
        config
    }

    /// Replay every step on a new model. Failing steps are reported and the
    /// replay carries on.
    pub fn replay(&self, base: &AppConfig) -> anyhow::Result<Vec<StepOutcome>> {
        let config = self.config(base);
        let mut model = WidgetModel::new(&config).context("script configuration rejected")?;

        let outcomes = self
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let notifications = model.dispatch(step.clone());
                StepOutcome {
                    index,
                    notifications,
                    error: model.error.clone(),
                }
            })
            .collect();
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWIPE: &str = r#"
[range]
min = 0
max = 100
range_mode = true

[[steps]]
action = "range_geometry"
origin = 0.0
length = 200.0

[[steps]]
action = "range_drag_start"
knob = "secondary"
x = 200.0

[[steps]]
action = "range_drag_move"
x = 150.0

[[steps]]
action = "range_drag_start"
x = 0.0

[[steps]]
action = "range_drag_end"
"#;

    #[test]
    fn replays_steps_and_reports_failures() {
        let script = Script::parse(SWIPE).unwrap();
        let outcomes = script.replay(&AppConfig::default()).unwrap();
        assert_eq!(outcomes.len(), 5);

        match outcomes[2].notifications.as_slice() {
            [Notification::ValueChanged(event)] => assert_eq!(event.state.value2, 75.0),
            other => panic!("unexpected notifications: {other:?}"),
        }

        // Second drag start while the first is still open.
        assert!(outcomes[3].error.is_some());
        assert!(outcomes[4].error.is_none());
    }

    #[test]
    fn commit_step_takes_nested_metrics() {
        let text = r#"
[[steps]]
action = "crop_load_image"
name = "big.png"
width = 300.0
height = 300.0

[[steps]]
action = "crop_commit"
displayed = { x = 0.0, y = 0.0, width = 150.0, height = 150.0 }
natural = { width = 300.0, height = 300.0 }
"#;
        let outcomes = Script::parse(text)
            .unwrap()
            .replay(&AppConfig::default())
            .unwrap();
        match outcomes[1].notifications.as_slice() {
            [Notification::CropCommitted(crop)] => {
                assert_eq!((crop.source_x, crop.source_width), (50.0, 200.0));
            }
            other => panic!("unexpected notifications: {other:?}"),
        }
    }

    #[test]
    fn invalid_overrides_fail_the_replay() {
        let script = Script::parse("[range]\nmin = 3\nmax = 1\n").unwrap();
        assert!(script.replay(&AppConfig::default()).is_err());
    }
}
