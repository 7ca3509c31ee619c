use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::coords::TileCoord;
use crate::grid::{Grid, GridIndexError};
use crate::tile::{TileAction, TileData, TileType};

/// Decides the action of a non-player tile from the frozen pre-cycle grid.
pub trait TilePolicy {
	fn decide(&mut self, at: TileCoord, snapshot: &Grid<TileData>) -> Result<TileAction, GridIndexError>;
}

/// Baseline: nothing but the player ever acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePolicy;

impl TilePolicy for IdlePolicy {
	fn decide(&mut self, at: TileCoord, snapshot: &Grid<TileData>) -> Result<TileAction, GridIndexError> {
		snapshot.get(at)?;
		Ok(TileAction::Idle)
	}
}

/// Enemies stumble around at random; reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct WanderPolicy {
	rng: StdRng,
}

impl WanderPolicy {
	const CHOICES: [TileAction; 4] = [
		TileAction::MoveForward,
		TileAction::TurnLeft,
		TileAction::TurnRight,
		TileAction::Idle,
	];

	pub fn from_seed(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl TilePolicy for WanderPolicy {
	fn decide(&mut self, at: TileCoord, snapshot: &Grid<TileData>) -> Result<TileAction, GridIndexError> {
		let tile = snapshot.get(at)?;
		if tile.tile_type != TileType::Enemy {
			return Ok(TileAction::Idle);
		}
		Ok(Self::CHOICES[self.rng.gen_range(0..Self::CHOICES.len())])
	}
}
