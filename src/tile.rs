use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no tile type matching character '{0}'")]
pub struct UnknownTileType(pub char);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
	Blocked,
	#[default]
	Empty,
	Player,
	Flag,
	Key,
	Gate,
	Enemy,
}

impl TileType {
	pub const ALL: [TileType; 7] = [
		TileType::Blocked,
		TileType::Empty,
		TileType::Player,
		TileType::Flag,
		TileType::Key,
		TileType::Gate,
		TileType::Enemy,
	];

	pub fn is_walkable(self) -> bool {
		matches!(self, TileType::Empty | TileType::Flag | TileType::Key)
	}

	/// Whether the tile gets a turn in the decision phase.
	pub fn is_actor(self) -> bool {
		matches!(self, TileType::Player | TileType::Enemy)
	}

	/// Default level-file character.
	pub fn default_char(self) -> char {
		match self {
			TileType::Blocked => 'X',
			TileType::Empty => 'O',
			TileType::Player => 'P',
			TileType::Flag => 'F',
			TileType::Key => 'K',
			TileType::Gate => 'G',
			TileType::Enemy => 'E',
		}
	}

	pub fn from_default_char(c: char) -> Result<TileType, UnknownTileType> {
		TileType::ALL.into_iter().find(|t| t.default_char() == c).ok_or(UnknownTileType(c))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileData {
	pub tile_type: TileType,
	pub tile_direction: Direction,
}

impl TileData {
	pub fn new(tile_type: TileType, tile_direction: Direction) -> Self {
		Self { tile_type, tile_direction }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileAction {
	MoveForward,
	MoveBack,
	TurnLeft,
	TurnRight,
	/// Reserved; applying it changes nothing yet.
	Attack,
	/// No action this cycle.
	#[default]
	Idle,
}
