use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::games::snake::{Board, Difficulty, Point, Rival, SelfCollisionRule};
use super::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

pub const CONFIG_FILE_NAME: &str = "snake_config.yaml";

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)))
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct SpeedConfig {
    pub decrement_ms: u32,
    pub min_interval_ms: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            decrement_ms: 15,
            min_interval_ms: 80,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub board_width: u32,
    pub board_height: u32,
    pub difficulty: Difficulty,
    pub tick_interval_ms: u32,
    #[serde(default)]
    pub speed: SpeedConfig,
    #[serde(default)]
    pub self_collision_rule: SelfCollisionRule,
    #[serde(default)]
    pub start: Option<Point>,
    pub profile: String,
    pub best_score_file: String,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.board_width < 5 || self.board_height < 5 {
            return Err("board dimensions must be at least 5x5".to_string());
        }
        if self.board_width > 50 || self.board_height > 50 {
            return Err("board dimensions must not exceed 50x50".to_string());
        }
        if self.tick_interval_ms < 50 || self.tick_interval_ms > 2000 {
            return Err("tick_interval_ms must be between 50 and 2000".to_string());
        }
        if self.speed.min_interval_ms < 20 {
            return Err("speed.min_interval_ms must be at least 20".to_string());
        }
        if self.speed.min_interval_ms > self.tick_interval_ms {
            return Err("speed.min_interval_ms must not exceed tick_interval_ms".to_string());
        }
        if let Some(start) = self.start {
            if start.x >= self.board_width as usize || start.y >= self.board_height as usize {
                return Err("start must lie inside the board".to_string());
            }
            if self.difficulty.has_rival() && start == self.rival_spawn() {
                return Err("start must not be the rival's spawn cell".to_string());
            }
        }
        if self.profile.trim().is_empty() {
            return Err("profile must not be empty".to_string());
        }
        if self.best_score_file.trim().is_empty() {
            return Err("best_score_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl GameConfig {
    fn rival_spawn(&self) -> Point {
        Rival::spawn_point(&Board::new(
            self.board_width as usize,
            self.board_height as usize,
        ))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 12,
            board_height: 12,
            difficulty: Difficulty::Easy,
            tick_interval_ms: 300,
            speed: SpeedConfig::default(),
            self_collision_rule: SelfCollisionRule::IncludeTail,
            start: None,
            profile: "default".to_string(),
            best_score_file: "snake_best_scores.yaml".to_string(),
        }
    }
}
