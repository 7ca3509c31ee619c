//! Presentation lookups handed to the view layer. Nothing here affects the
//! simulation; images are never loaded by this crate.

use crate::direction::Direction;
use crate::tile::TileType;

const TILE_BACKGROUND: &str = "sprites/tile_background.png";

/// Background and foreground sprite paths a view composes for a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSprite {
	pub background: Option<&'static str>,
	pub foreground: Option<&'static str>,
}

pub fn tile_sprite(tile_type: TileType) -> TileSprite {
	let foreground = match tile_type {
		TileType::Blocked => return TileSprite { background: None, foreground: None },
		TileType::Empty => None,
		TileType::Player => Some("sprites/player.png"),
		TileType::Flag => Some("sprites/flag.png"),
		TileType::Key => Some("sprites/key.png"),
		TileType::Gate => Some("sprites/gate.png"),
		TileType::Enemy => Some("sprites/enemy.png"),
	};
	TileSprite { background: Some(TILE_BACKGROUND), foreground }
}

/// Sprites face right; this is the counter-clockwise turn to draw them with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRotation {
	None,
	Rotate90,
	Rotate180,
	Rotate270,
}

pub fn sprite_rotation(direction: Direction) -> SpriteRotation {
	match direction {
		Direction::Right => SpriteRotation::None,
		Direction::Up => SpriteRotation::Rotate90,
		Direction::Left => SpriteRotation::Rotate180,
		Direction::Down => SpriteRotation::Rotate270,
	}
}

impl SpriteRotation {
	pub fn degrees(self) -> u16 {
		match self {
			SpriteRotation::None => 0,
			SpriteRotation::Rotate90 => 90,
			SpriteRotation::Rotate180 => 180,
			SpriteRotation::Rotate270 => 270,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blocked_has_no_sprite() {
		assert_eq!(tile_sprite(TileType::Blocked), TileSprite { background: None, foreground: None });
		assert_eq!(tile_sprite(TileType::Empty).foreground, None);
		assert_eq!(tile_sprite(TileType::Player).foreground, Some("sprites/player.png"));
	}

	#[test]
	fn opposite_directions_differ_by_half_turn() {
		for d in Direction::ALL {
			let a = sprite_rotation(d).degrees();
			let b = sprite_rotation(-d).degrees();
			assert_eq!((a + 180) % 360, b);
		}
	}
}
