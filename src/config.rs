//! Demo configuration
//!
//! Viewport, player tuning and the scene layout table. Serialized as JSON;
//! every field falls back to the built-in demo scene when absent.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::PlaceholderSprite;
use crate::consts::{BACKGROUND_RGB, PLAYER_SPEED};
use crate::sim::Viewport;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A row of identical static sprites spaced along X
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRow {
    pub sprite: String,
    /// Position of the first sprite
    pub start: Vec2,
    /// Horizontal distance between consecutive sprites
    pub spacing: f32,
    pub count: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl StaticRow {
    /// Positions of every sprite in the row, left to right
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.count).map(|i| Vec2::new(self.start.x + i as f32 * self.spacing, self.start.y))
    }
}

/// A bouncing sprite's starting state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverSpec {
    pub sprite: String,
    pub pos: Vec2,
    pub vel: Vec2,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

/// The player's starting state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub sprite: String,
    pub pos: Vec2,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

/// Everything placed at setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub statics: Vec<StaticRow>,
    pub movers: Vec<MoverSpec>,
    pub player: PlayerSpec,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            statics: vec![
                StaticRow {
                    sprite: "chupep".into(),
                    start: Vec2::new(100.0, 100.0),
                    spacing: 500.0,
                    count: 4,
                    scale: 1.0,
                },
                StaticRow {
                    sprite: "cheliabinsk".into(),
                    start: Vec2::new(10.0, 700.0),
                    spacing: 650.0,
                    count: 3,
                    scale: 0.5,
                },
            ],
            movers: vec![
                MoverSpec::sobaka(Vec2::new(100.0, 100.0), Vec2::new(0.0, 3.0)),
                MoverSpec::sobaka(Vec2::new(200.0, 200.0), Vec2::new(4.0, 0.0)),
                MoverSpec::sobaka(Vec2::new(300.0, 300.0), Vec2::new(2.0, 2.0)),
                MoverSpec::sobaka(Vec2::new(700.0, 700.0), Vec2::new(-10.0, -10.0)),
            ],
            player: PlayerSpec {
                sprite: "player".into(),
                pos: Vec2::new(500.0, 500.0),
                scale: 0.3,
            },
        }
    }
}

impl MoverSpec {
    fn sobaka(pos: Vec2, vel: Vec2) -> Self {
        Self {
            sprite: "sobaka".into(),
            pos,
            vel,
            scale: 0.3,
        }
    }
}

impl SceneLayout {
    /// Every sprite name the layout refers to, first use first
    pub fn sprite_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let all = self
            .statics
            .iter()
            .map(|r| r.sprite.as_str())
            .chain(self.movers.iter().map(|m| m.sprite.as_str()))
            .chain(std::iter::once(self.player.sprite.as_str()));
        for name in all {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn static_count(&self) -> usize {
        self.statics.iter().map(|r| r.count as usize).sum()
    }
}

/// Top-level demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub viewport: Viewport,
    /// Player displacement per tick
    pub player_speed: f32,
    /// Frame clear colour
    pub background: [u8; 3],
    /// Directory holding `<sprite>.png` files (native builds)
    pub asset_dir: String,
    /// Generated stand-ins used when sprite files are unavailable
    pub placeholders: HashMap<String, PlaceholderSprite>,
    pub scene: SceneLayout,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let placeholders = [
            ("chupep", 256, 256, [230, 180, 60, 255]),
            ("cheliabinsk", 600, 300, [90, 90, 110, 255]),
            ("sobaka", 400, 300, [150, 95, 50, 255]),
            ("player", 300, 400, [60, 200, 90, 255]),
        ]
        .into_iter()
        .map(|(name, width, height, rgba)| {
            (
                name.to_string(),
                PlaceholderSprite {
                    width,
                    height,
                    rgba,
                },
            )
        })
        .collect();

        Self {
            viewport: Viewport::default(),
            player_speed: PLAYER_SPEED,
            background: BACKGROUND_RGB,
            asset_dir: "assets".into(),
            placeholders,
            scene: SceneLayout::default(),
        }
    }
}

impl DemoConfig {
    /// Parse from a JSON string and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vp = &self.viewport;
        if !(vp.width > 0.0 && vp.height > 0.0 && vp.width.is_finite() && vp.height.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                vp.width, vp.height
            )));
        }
        if !(self.player_speed >= 0.0 && self.player_speed.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "player_speed must be non-negative, got {}",
                self.player_speed
            )));
        }

        let scales = self
            .scene
            .statics
            .iter()
            .map(|r| (r.sprite.as_str(), r.scale))
            .chain(self.scene.movers.iter().map(|m| (m.sprite.as_str(), m.scale)))
            .chain(std::iter::once((self.scene.player.sprite.as_str(), self.scene.player.scale)));
        for (sprite, scale) in scales {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "scale for '{sprite}' must be positive, got {scale}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = SceneLayout::default();
        assert_eq!(layout.static_count(), 7);
        assert_eq!(layout.movers.len(), 4);
        assert_eq!(
            layout.sprite_names(),
            vec!["chupep", "cheliabinsk", "sobaka", "player"]
        );

        let first_row: Vec<Vec2> = layout.statics[0].positions().collect();
        assert_eq!(first_row[3], Vec2::new(1600.0, 100.0));
        let second_row: Vec<Vec2> = layout.statics[1].positions().collect();
        assert_eq!(
            second_row,
            vec![
                Vec2::new(10.0, 700.0),
                Vec2::new(660.0, 700.0),
                Vec2::new(1310.0, 700.0)
            ]
        );
    }

    #[test]
    fn test_default_is_valid() {
        DemoConfig::default().validate().unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let config = DemoConfig::default();
        let json = config.to_json().unwrap();
        let back = DemoConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DemoConfig::from_json(r#"{ "player_speed": 9.5 }"#).unwrap();
        assert_eq!(config.player_speed, 9.5);
        assert_eq!(config.viewport, Viewport::default());
        assert_eq!(config.scene, SceneLayout::default());
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let json = r#"{
            "scene": {
                "statics": [],
                "movers": [{ "sprite": "ball", "pos": [1.0, 2.0], "vel": [3.0, 4.0] }],
                "player": { "sprite": "hero", "pos": [0.0, 0.0] }
            }
        }"#;
        let config = DemoConfig::from_json(json).unwrap();
        assert_eq!(config.scene.movers[0].scale, 1.0);
        assert_eq!(config.scene.player.scale, 1.0);
        assert_eq!(config.scene.movers[0].vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_rejects_bad_scale() {
        let mut config = DemoConfig::default();
        config.scene.movers[2].scale = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("sobaka")));
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let mut config = DemoConfig::default();
        config.viewport.height = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            DemoConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = DemoConfig::load_or_default("/nonexistent/bounce-demo.json");
        assert_eq!(config, DemoConfig::default());
    }
}
