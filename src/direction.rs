use std::ops::Neg;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no direction matching character '{0}'")]
pub struct UnknownDirection(pub char);

/// Facing of a tile occupant. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
	Up,
	Down,
	Left,
	#[default]
	Right,
}

impl Direction {
	pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

	/// Unit displacement `(dx, dy)`.
	pub fn delta(self) -> (i32, i32) {
		match self {
			Direction::Up => (0, -1),
			Direction::Down => (0, 1),
			Direction::Left => (-1, 0),
			Direction::Right => (1, 0),
		}
	}

	pub fn negate(self) -> Direction {
		match self {
			Direction::Up => Direction::Down,
			Direction::Down => Direction::Up,
			Direction::Left => Direction::Right,
			Direction::Right => Direction::Left,
		}
	}

	/// Clockwise maps `(dx, dy)` to `(-dy, dx)`, counter-clockwise to `(dy, -dx)`.
	pub fn rotate(self, clockwise: bool) -> Direction {
		match (self, clockwise) {
			(Direction::Up, true) => Direction::Right,
			(Direction::Right, true) => Direction::Down,
			(Direction::Down, true) => Direction::Left,
			(Direction::Left, true) => Direction::Up,
			(Direction::Up, false) => Direction::Left,
			(Direction::Left, false) => Direction::Down,
			(Direction::Down, false) => Direction::Right,
			(Direction::Right, false) => Direction::Up,
		}
	}

	pub fn from_char(c: char) -> Result<Direction, UnknownDirection> {
		match c {
			'U' => Ok(Direction::Up),
			'D' => Ok(Direction::Down),
			'L' => Ok(Direction::Left),
			'R' => Ok(Direction::Right),
			other => Err(UnknownDirection(other)),
		}
	}

	pub fn to_char(self) -> char {
		match self {
			Direction::Up => 'U',
			Direction::Down => 'D',
			Direction::Left => 'L',
			Direction::Right => 'R',
		}
	}
}

impl Neg for Direction {
	type Output = Direction;

	fn neg(self) -> Direction {
		self.negate()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	#[test]
	fn negate_matches_displacement() {
		for d in Direction::ALL {
			let (dx, dy) = d.delta();
			assert_eq!((-d).delta(), (-dx, -dy));
			assert_eq!(-(-d), d);
		}
	}

	#[test]
	fn rotate_matches_displacement() {
		for d in Direction::ALL {
			let (dx, dy) = d.delta();
			assert_eq!(d.rotate(true).delta(), (-dy, dx));
			assert_eq!(d.rotate(false).delta(), (dy, -dx));
			assert_eq!(d.rotate(true).rotate(false), d);
		}
	}

	#[test]
	fn four_turns_is_identity() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..64 {
			let d = Direction::ALL[rng.gen_range(0..4)];
			let cw = rng.r#gen::<bool>();
			assert_eq!(d.rotate(cw).rotate(cw).rotate(cw).rotate(cw), d);
			assert_eq!(d.rotate(cw).rotate(cw), -d);
		}
	}

	#[test]
	fn chars_round_trip() {
		for d in Direction::ALL {
			assert_eq!(Direction::from_char(d.to_char()), Ok(d));
		}
		assert_eq!(Direction::from_char('x'), Err(UnknownDirection('x')));
		assert_eq!(Direction::default(), Direction::Right);
	}
}
