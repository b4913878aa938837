//! World and player settings
//!
//! Loaded from a JSON file next to the binary. Missing fields fall back to
//! the defaults in `consts`, and a missing or malformed file falls back to
//! `Settings::default()`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Terrain and chunk layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// World seed. `None` draws a fresh seed each run.
    pub seed: Option<u64>,
    /// Chunk edge length in tiles
    pub chunk_size: i32,
    /// World row of the dirt crust
    pub surface_level: i32,
    /// Chance (0-1) that a chunk gets a cave
    pub cave_chance: f64,
    /// Inclusive cave radius range, in tiles
    pub cave_min_radius: i32,
    pub cave_max_radius: i32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: None,
            chunk_size: CHUNK_SIZE,
            surface_level: SURFACE_LEVEL,
            cave_chance: CAVE_CHANCE,
            cave_min_radius: CAVE_MIN_RADIUS,
            cave_max_radius: CAVE_MAX_RADIUS,
        }
    }
}

impl WorldSettings {
    /// Settings with a fixed seed (tests, replays)
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// The configured seed, or a fresh one from the OS-seeded generator
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                log::info!("No world seed configured, using random seed {}", seed);
                seed
            }
        }
    }

    /// Clamp values that would make generation meaningless
    pub fn sanitized(mut self) -> Self {
        if self.chunk_size < 1 {
            log::warn!("chunk_size {} is invalid, using {}", self.chunk_size, CHUNK_SIZE);
            self.chunk_size = CHUNK_SIZE;
        }
        self.cave_chance = self.cave_chance.clamp(0.0, 1.0);
        self.cave_min_radius = self.cave_min_radius.max(1);
        self.cave_max_radius = self.cave_max_radius.max(self.cave_min_radius);
        self
    }
}

/// Player spawn and interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Spawn position in tiles
    pub spawn: Vec2,
    /// Max Chebyshev distance for pointer mining/placing
    pub interaction_radius: i32,
    /// Dirt blocks in the inventory at spawn
    pub starting_dirt: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            // Middle of the default screen, in the sky row above the crust
            spawn: Vec2::new((SCREEN_WIDTH / 2.0 / TILE_SIZE).floor(), 0.0),
            interaction_radius: INTERACTION_RADIUS,
            starting_dirt: 0,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub player: PlayerSettings,
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.world = settings.world.sanitized();
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings in {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Save settings to a file (best effort)
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "world": { "seed": 7 } }"#).unwrap();
        assert_eq!(settings.world.seed, Some(7));
        assert_eq!(settings.world.chunk_size, CHUNK_SIZE);
        assert_eq!(settings.player, PlayerSettings::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitized_fixes_bad_values() {
        let settings = Settings::from_json(
            r#"{ "world": { "chunk_size": 0, "cave_chance": 3.0, "cave_min_radius": 4, "cave_max_radius": 1 } }"#,
        )
        .unwrap();
        assert_eq!(settings.world.chunk_size, CHUNK_SIZE);
        assert_eq!(settings.world.cave_chance, 1.0);
        assert_eq!(settings.world.cave_max_radius, 4);
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        assert_eq!(WorldSettings::seeded(42).resolve_seed(), 42);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here/pixel_miner.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("pixel_miner_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.world.seed = Some(99);
        settings.player.starting_dirt = 5;
        settings.save(&path);
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
