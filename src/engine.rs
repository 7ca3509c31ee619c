use log::{debug, error};

use crate::coords::TileCoord;
use crate::events::{Event, EventSink};
use crate::grid::{Grid, GridIndexError};
use crate::policy::{IdlePolicy, TilePolicy};
use crate::tile::{TileAction, TileData, TileType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
	pub cycle: u64,
	pub changed: usize,
}

/// Owns the live grid and advances it one cycle at a time.
pub struct Engine {
	grid: Grid<TileData>,
	policy: Box<dyn TilePolicy>,
	cycles: u64,
}

impl std::fmt::Debug for Engine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Engine").field("grid", &self.grid).field("cycles", &self.cycles).finish_non_exhaustive()
	}
}

impl Engine {
	pub fn new(grid: Grid<TileData>) -> Self {
		Self::with_policy(grid, Box::new(IdlePolicy))
	}

	pub fn with_policy(grid: Grid<TileData>, policy: Box<dyn TilePolicy>) -> Self {
		Self { grid, policy, cycles: 0 }
	}

	pub fn grid(&self) -> &Grid<TileData> {
		&self.grid
	}

	pub fn cycles(&self) -> u64 {
		self.cycles
	}

	// One cycle:
	// - decide every cell's action against a frozen copy of the grid
	// - apply the decisions in raster order, judging targets by the copy
	// - emit a TileChanged for each cell that actually changed
	pub fn cycle(&mut self, player_action: Option<TileAction>, sink: &mut impl EventSink) -> CycleSummary {
		self.cycles += 1;
		let snapshot = self.grid.clone();
		let player_action = player_action.unwrap_or_default();

		let decisions: Vec<(TileCoord, TileAction)> = snapshot
			.iter_xy()
			.map(|(at, tile)| {
				let action = if tile.tile_type == TileType::Player {
					player_action
				} else {
					self.policy.decide(at, &snapshot).unwrap_or_else(|e| {
						error!("cycle {}: no decision for {}: {}", self.cycles, at, e);
						TileAction::Idle
					})
				};
				(at, action)
			})
			.collect();

		let mut touched = vec![false; snapshot.len()];
		let mut changed = Vec::new();
		for (at, action) in decisions {
			if action == TileAction::Idle {
				continue;
			}
			match self.apply(at, action, &snapshot, &mut touched) {
				Ok(cells) => changed.extend(cells),
				Err(e) => error!("cycle {}: skipping {:?} at {}: {}", self.cycles, action, at, e),
			}
		}

		for at in &changed {
			if let Ok(tile) = self.grid.get(*at) {
				sink.emit(Event::TileChanged { x: at.x, y: at.y, tile: *tile });
			}
		}
		CycleSummary { cycle: self.cycles, changed: changed.len() }
	}

	/// Applies one decision; returns the cells it changed.
	fn apply(
		&mut self,
		at: TileCoord,
		action: TileAction,
		snapshot: &Grid<TileData>,
		touched: &mut [bool],
	) -> Result<Vec<TileCoord>, GridIndexError> {
		let actor = *snapshot.get(at)?;
		let source = snapshot.index(at)?;
		if touched[source] {
			debug!("{} already changed this cycle, dropping {:?}", at, action);
			return Ok(Vec::new());
		}

		match action {
			TileAction::MoveForward | TileAction::MoveBack => {
				let direction = if action == TileAction::MoveForward { actor.tile_direction } else { -actor.tile_direction };
				let to = at.step(direction);
				let Ok(target) = snapshot.index(to) else {
					debug!("move from {} to {} leaves the grid", at, to);
					return Ok(Vec::new());
				};
				let target_tile = snapshot.get(to)?;
				if !target_tile.tile_type.is_walkable() || touched[target] {
					debug!("move from {} to {} blocked by {:?}", at, to, target_tile.tile_type);
					return Ok(Vec::new());
				}
				debug!("moving {:?} from {} to {}", actor.tile_type, at, to);
				self.grid.set(to, actor)?;
				self.grid.set(at, TileData::default())?;
				touched[target] = true;
				touched[source] = true;
				Ok(vec![to, at])
			}
			TileAction::TurnLeft | TileAction::TurnRight => {
				let clockwise = action == TileAction::TurnRight;
				self.grid.get_mut(at)?.tile_direction = actor.tile_direction.rotate(clockwise);
				touched[source] = true;
				Ok(vec![at])
			}
			TileAction::Attack => {
				debug!("{:?} at {} attacks (no effect yet)", actor.tile_type, at);
				Ok(Vec::new())
			}
			TileAction::Idle => Ok(Vec::new()),
		}
	}
}
