use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::{IdlePolicy, TilePolicy, WanderPolicy};
use crate::tile::{TileType, UnknownTileType};

pub const PYSCRIPT_EXTENSION: &str = "pyscript";
pub const CONFIG_ENV: &str = "PYSCRIPT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "pyscript.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Level-file character table for tile types. Several characters may map to
/// the same type; rendering uses the first one in character order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, TileType>", into = "BTreeMap<String, TileType>")]
pub struct TileSymbols {
    by_char: BTreeMap<char, TileType>,
}

impl TileSymbols {
    pub fn parse(&self, c: char) -> Result<TileType, UnknownTileType> {
        self.by_char.get(&c).copied().ok_or(UnknownTileType(c))
    }

    pub fn to_char(&self, tile_type: TileType) -> char {
        self.by_char
            .iter()
            .find(|(_, t)| **t == tile_type)
            .map(|(c, _)| *c)
            .unwrap_or_else(|| tile_type.default_char())
    }
}

impl Default for TileSymbols {
    fn default() -> Self {
        Self {
            by_char: TileType::ALL.iter().map(|t| (t.default_char(), *t)).collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, TileType>> for TileSymbols {
    type Error = String;

    fn try_from(raw: BTreeMap<String, TileType>) -> Result<Self, Self::Error> {
        let mut by_char = BTreeMap::new();
        for (key, tile_type) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    by_char.insert(c, tile_type);
                }
                _ => return Err(format!("tile symbol '{}' must be exactly one character", key)),
            }
        }
        Ok(Self { by_char })
    }
}

impl From<TileSymbols> for BTreeMap<String, TileType> {
    fn from(symbols: TileSymbols) -> Self {
        symbols.by_char.into_iter().map(|(c, t)| (c.to_string(), t)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyConfig {
    #[default]
    Idle,
    Wander {
        seed: u64,
    },
}

impl PolicyConfig {
    pub fn build(self) -> Box<dyn TilePolicy> {
        match self {
            PolicyConfig::Idle => Box::new(IdlePolicy),
            PolicyConfig::Wander { seed } => Box::new(WanderPolicy::from_seed(seed)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub levels: Vec<PathBuf>,
    pub solutions_dir: PathBuf,
    pub tile_symbols: TileSymbols,
    pub enemy_policy: PolicyConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: vec![PathBuf::from("levels/tutorial.json")],
            solutions_dir: PathBuf::from("solutions"),
            tile_symbols: TileSymbols::default(),
            enemy_policy: PolicyConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `$PYSCRIPT_CONFIG`, then `./pyscript.json`, then built-in defaults.
    pub fn load_or_default() -> Self {
        let path = match env::var(CONFIG_ENV) {
            Ok(p) => PathBuf::from(p),
            Err(_) => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.is_file() {
                    info!("no config file found, using defaults");
                    return Self::default();
                }
                local
            }
        };
        match Self::load(&path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Where the player's solution for a level is saved.
    pub fn solution_path(&self, level_path: &Path) -> PathBuf {
        let stem = level_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "level".to_string());
        self.solutions_dir
            .join(format!("{}_solution.{}", stem, PYSCRIPT_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_symbols() {
        let s = TileSymbols::default();
        assert_eq!(s.parse('X'), Ok(TileType::Blocked));
        assert_eq!(s.parse('E'), Ok(TileType::Enemy));
        assert_eq!(s.parse('?'), Err(UnknownTileType('?')));
        assert_eq!(s.to_char(TileType::Gate), 'G');
    }

    #[test]
    fn config_from_json_with_alias_symbols() {
        let config: GameConfig = serde_json::from_value(json!({
            "levels": ["a.json", "b.json"],
            "tile_symbols": { "#": "BLOCKED", ".": "EMPTY", "@": "PLAYER", "G": "FLAG", "L": "GATE" },
            "enemy_policy": { "wander": { "seed": 9 } }
        }))
        .unwrap();
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.solutions_dir, PathBuf::from("solutions"));
        assert_eq!(config.tile_symbols.parse('G'), Ok(TileType::Flag));
        assert_eq!(config.tile_symbols.parse('L'), Ok(TileType::Gate));
        assert_eq!(config.tile_symbols.to_char(TileType::Player), '@');
        // unmapped types still render
        assert_eq!(config.tile_symbols.to_char(TileType::Key), 'K');
        assert_eq!(config.enemy_policy, PolicyConfig::Wander { seed: 9 });
    }

    #[test]
    fn multi_char_symbol_rejected() {
        let r: Result<GameConfig, _> = serde_json::from_value(json!({ "tile_symbols": { "XX": "BLOCKED" } }));
        assert!(r.is_err());
    }

    #[test]
    fn idle_policy_as_plain_string() {
        let config: GameConfig = serde_json::from_value(json!({ "enemy_policy": "idle" })).unwrap();
        assert_eq!(config.enemy_policy, PolicyConfig::Idle);
    }

    #[test]
    fn solution_path_uses_level_stem() {
        let config = GameConfig::default();
        assert_eq!(
            config.solution_path(Path::new("levels/tutorial.json")),
            PathBuf::from("solutions/tutorial_solution.pyscript")
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GameConfig::load(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
