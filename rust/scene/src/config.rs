// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene configuration, optionally loaded from environment variables.

use crate::error::{Result, SceneError};
use crate::types::MaterialRef;
use floorplan_lite_geometry::PipelineConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Wall height in scene units.
    pub wall_height: f64,
    /// Material for every wall object (default material if unset).
    pub wall_material: Option<MaterialRef>,
    /// Material for the floor object (default material if unset).
    pub floor_material: Option<MaterialRef>,
    /// Merge overlapping wall rectangles into their union outline.
    pub merge_overlaps: bool,
    /// Extrude wall loops in parallel.
    pub parallel: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            wall_height: 2.5,
            wall_material: None,
            floor_material: None,
            merge_overlaps: true,
            parallel: true,
        }
    }
}

impl SceneConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            wall_height: lookup("FLOORPLAN_WALL_HEIGHT")
                .and_then(|v| parse_or_warn("FLOORPLAN_WALL_HEIGHT", &v, |s| s.parse().ok()))
                .unwrap_or(defaults.wall_height),
            wall_material: lookup("FLOORPLAN_WALL_MATERIAL").map(MaterialRef::new),
            floor_material: lookup("FLOORPLAN_FLOOR_MATERIAL").map(MaterialRef::new),
            merge_overlaps: lookup("FLOORPLAN_MERGE_OVERLAPS")
                .and_then(|v| parse_or_warn("FLOORPLAN_MERGE_OVERLAPS", &v, parse_flag))
                .unwrap_or(defaults.merge_overlaps),
            parallel: lookup("FLOORPLAN_PARALLEL")
                .and_then(|v| parse_or_warn("FLOORPLAN_PARALLEL", &v, parse_flag))
                .unwrap_or(defaults.parallel),
        }
    }

    /// Check the configuration before building a scene.
    pub fn validate(&self) -> Result<()> {
        for (what, material) in [
            ("wall", &self.wall_material),
            ("floor", &self.floor_material),
        ] {
            if material.as_ref().is_some_and(|m| m.name().trim().is_empty()) {
                return Err(SceneError::InvalidConfig(format!(
                    "{} material name is empty",
                    what
                )));
            }
        }
        self.pipeline_config().validate()?;
        Ok(())
    }

    /// Wall pipeline settings derived from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            height: self.wall_height,
            merge_overlaps: self.merge_overlaps,
            parallel: self.parallel,
            ..Default::default()
        }
    }

    pub fn wall_material(&self) -> MaterialRef {
        self.wall_material.clone().unwrap_or_default()
    }

    pub fn floor_material(&self) -> MaterialRef {
        self.floor_material.clone().unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or_warn<T>(key: &str, value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(value.trim());
    if parsed.is_none() {
        warn!(key, value, "ignoring unparsable setting");
    }
    parsed
}
