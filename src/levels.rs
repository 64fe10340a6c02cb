//! Level configuration table
//!
//! Maps a level name to its tuning: obstacle speed range, spawn interval and
//! player speed cap. The built-in table is initialized once and never mutated.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PLAYER_MAX_SPEED;
use crate::error::ConfigError;

/// Tunable parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub obstacle_speed_min: f32,
    pub obstacle_speed_max: f32,
    /// Ticks between spawns
    pub spawn_interval: u32,
    /// Optional per-level override of the player's speed cap
    #[serde(default)]
    pub player_max_speed: Option<f32>,
}

impl LevelConfig {
    pub fn new(speed_min: f32, speed_max: f32, spawn_interval: u32) -> Self {
        Self {
            obstacle_speed_min: speed_min,
            obstacle_speed_max: speed_max,
            spawn_interval,
            player_max_speed: None,
        }
    }

    pub fn with_player_max_speed(mut self, speed: f32) -> Self {
        self.player_max_speed = Some(speed);
        self
    }

    /// Effective player speed cap
    pub fn player_max_speed(&self) -> f32 {
        self.player_max_speed.unwrap_or(DEFAULT_PLAYER_MAX_SPEED)
    }

    /// Reject configurations the spawner or integrator can't honor
    pub fn validate(&self, level: &str) -> Result<(), ConfigError> {
        let (min, max) = (self.obstacle_speed_min, self.obstacle_speed_max);
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(ConfigError::InvalidSpeedRange {
                level: level.to_string(),
                min,
                max,
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::InvalidSpawnInterval {
                level: level.to_string(),
            });
        }
        if let Some(speed) = self.player_max_speed {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::InvalidPlayerSpeed {
                    level: level.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// One named row of a level table file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelEntry {
    name: String,
    #[serde(flatten)]
    config: LevelConfig,
}

/// Ordered, validated set of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    levels: Vec<(String, LevelConfig)>,
}

impl LevelTable {
    /// Build a table, validating every entry
    pub fn new(
        levels: impl IntoIterator<Item = (impl Into<String>, LevelConfig)>,
    ) -> Result<Self, ConfigError> {
        let mut table = Vec::new();
        for (name, config) in levels {
            let name = name.into();
            config.validate(&name)?;
            if table.iter().any(|(n, _): &(String, LevelConfig)| n.eq_ignore_ascii_case(&name)) {
                return Err(ConfigError::DuplicateLevel(name));
            }
            table.push((name, config));
        }
        Ok(Self { levels: table })
    }

    /// The process-wide built-in table
    pub fn builtin() -> &'static LevelTable {
        static TABLE: OnceLock<LevelTable> = OnceLock::new();
        TABLE.get_or_init(|| LevelTable {
            levels: vec![
                (
                    "Easy".to_string(),
                    LevelConfig::new(5.0, 8.0, 60).with_player_max_speed(10.0),
                ),
                (
                    "Medium".to_string(),
                    LevelConfig::new(8.0, 12.0, 40).with_player_max_speed(12.0),
                ),
                (
                    "Hard".to_string(),
                    LevelConfig::new(12.0, 18.0, 25).with_player_max_speed(15.0),
                ),
            ],
        })
    }

    /// Parse a JSON array of `{ name, obstacle_speed_min, ... }`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<LevelEntry> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::new(entries.into_iter().map(|e| (e.name, e.config)))
    }

    /// Look up a level by name (case-insensitive)
    pub fn lookup(&self, level_id: &str) -> Result<&LevelConfig, ConfigError> {
        self.levels
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(level_id))
            .map(|(_, config)| config)
            .ok_or_else(|| ConfigError::UnknownLevel(level_id.to_string()))
    }

    /// Level names in menu order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = LevelTable::builtin();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Easy", "Medium", "Hard"]);

        let hard = table.lookup("hard").unwrap();
        assert_eq!(hard.spawn_interval, 25);
        assert_eq!(hard.player_max_speed(), 15.0);

        for name in table.names() {
            table.lookup(name).unwrap().validate(name).unwrap();
        }
    }

    #[test]
    fn test_unknown_level() {
        let err = LevelTable::builtin().lookup("Nightmare").unwrap_err();
        assert_eq!(err, ConfigError::UnknownLevel("Nightmare".to_string()));
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let err = LevelTable::new([("Broken", LevelConfig::new(9.0, 3.0, 10))]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeedRange { .. }));
    }

    #[test]
    fn test_zero_interval_and_bad_speed_rejected() {
        assert!(matches!(
            LevelTable::new([("A", LevelConfig::new(1.0, 2.0, 0))]),
            Err(ConfigError::InvalidSpawnInterval { .. })
        ));
        assert!(matches!(
            LevelTable::new([("B", LevelConfig::new(1.0, 2.0, 5).with_player_max_speed(0.0))]),
            Err(ConfigError::InvalidPlayerSpeed { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "Sunday", "obstacle_speed_min": 4, "obstacle_speed_max": 7,
             "spawn_interval": 70, "player_max_speed": 15},
            {"name": "Rush", "obstacle_speed_min": 10, "obstacle_speed_max": 10,
             "spawn_interval": 20}
        ]"#;
        let table = LevelTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("sunday").unwrap().player_max_speed(), 15.0);
        assert_eq!(
            table.lookup("Rush").unwrap().player_max_speed(),
            DEFAULT_PLAYER_MAX_SPEED
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(LevelTable::from_json("{"), Err(ConfigError::Parse(_))));
        let dup = r#"[
            {"name": "X", "obstacle_speed_min": 1, "obstacle_speed_max": 2, "spawn_interval": 3},
            {"name": "x", "obstacle_speed_min": 1, "obstacle_speed_max": 2, "spawn_interval": 3}
        ]"#;
        assert!(matches!(LevelTable::from_json(dup), Err(ConfigError::DuplicateLevel(_))));
    }
}
