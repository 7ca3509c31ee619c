use crate::config::TileSymbols;
use crate::coords::TileCoord;
use crate::direction::Direction;
use crate::engine::CycleSummary;
use crate::grid::Grid;
use crate::level::Level;
use crate::lexer::LexError;
use crate::tile::{TileData, TileType};
use crate::token::Token;

/// One line per grid row, tile characters from `symbols`.
pub fn format_grid(grid: &Grid<TileData>, symbols: &TileSymbols) -> Vec<String> {
	grid.rows()
		.map(|row| row.iter().map(|t| symbols.to_char(t.tile_type)).collect())
		.collect()
}

/// Facing arrows for actors, `.` elsewhere.
pub fn format_facings(grid: &Grid<TileData>) -> Vec<String> {
	grid.rows()
		.map(|row| {
			row.iter()
				.map(|t| match (t.tile_type.is_actor(), t.tile_direction) {
					(false, _) => '.',
					(true, Direction::Up) => '^',
					(true, Direction::Down) => 'v',
					(true, Direction::Left) => '<',
					(true, Direction::Right) => '>',
				})
				.collect()
		})
		.collect()
}

pub fn format_status(level_name: &str, summary: Option<CycleSummary>) -> String {
	match summary {
		Some(s) => format!("{} | cycle {} | {} tile(s) changed", level_name, s.cycle, s.changed),
		None => format!("{} | cycle 0", level_name),
	}
}

pub fn format_tokens(tokens: &[Token]) -> Vec<String> {
	tokens.iter().enumerate().map(|(i, t)| format!("{:>4}  {}", i, t)).collect()
}

/// The error message followed by the script line it points at, when that line exists.
pub fn format_lex_error(source: &str, err: &LexError) -> Vec<String> {
	let mut lines = vec![err.to_string()];
	if let Some(text) = source.lines().nth(err.line().saturating_sub(1)) {
		lines.push(format!("{:>4} | {}", err.line(), text));
	}
	lines
}

pub fn count_tiles(grid: &Grid<TileData>, tile_type: TileType) -> usize {
	grid.iter_xy().filter(|(_, t)| t.tile_type == tile_type).count()
}

/// Reports a player arriving on one of the level's flag cells, once per arrival.
#[derive(Debug, Clone, Default)]
pub struct FlagWatch {
	flags: Vec<TileCoord>,
	on_flag: bool,
}

impl FlagWatch {
	pub fn new(level: &Level) -> Self {
		let flags = level
			.initial_grid()
			.map(|grid| grid.iter_xy().filter(|(_, t)| t.tile_type == TileType::Flag).map(|(at, _)| at).collect())
			.unwrap_or_default();
		Self { flags, on_flag: false }
	}

	/// True only on the update where a player first stands on a flag cell.
	pub fn update(&mut self, grid: &Grid<TileData>) -> bool {
		let now = self.flags.iter().any(|at| grid.get(*at).is_ok_and(|t| t.tile_type == TileType::Player));
		let arrived = now && !self.on_flag;
		self.on_flag = now;
		arrived
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::Engine;
	use crate::events::NullSink;
	use crate::lexer::tokenize;
	use crate::tile::TileAction;

	fn grid() -> Grid<TileData> {
		Grid::from_cells(3, 2, vec![
			TileData::new(TileType::Player, Direction::Up),
			TileData::default(),
			TileData::new(TileType::Blocked, Direction::Right),
			TileData::new(TileType::Enemy, Direction::Left),
			TileData::new(TileType::Flag, Direction::Right),
			TileData::default(),
		])
		.unwrap()
	}

	#[test]
	fn grid_rows() {
		assert_eq!(format_grid(&grid(), &TileSymbols::default()), vec!["POX", "EFO"]);
		assert_eq!(format_facings(&grid()), vec!["^..", "<.."]);
		assert_eq!(count_tiles(&grid(), TileType::Empty), 2);
	}

	#[test]
	fn status_line() {
		let s = format_status("Tutorial", Some(CycleSummary { cycle: 4, changed: 2 }));
		assert!(s.contains("Tutorial"));
		assert!(s.contains("cycle 4"));
		assert!(format_status("Tutorial", None).contains("cycle 0"));
	}

	#[test]
	fn token_listing() {
		let lines = format_tokens(&tokenize("x = 1").unwrap());
		assert_eq!(lines.len(), 3);
		assert!(lines[0].ends_with("Token(REFERENCE, x)"));
		assert!(lines[1].ends_with("Token(ASSIGN)"));
	}

	#[test]
	fn lex_error_quotes_offending_line() {
		let source = "var a = 1;\nvar b = $;\n";
		let err = tokenize(source).unwrap_err();
		assert_eq!(format_lex_error(source, &err), vec![
			"line 2: no token starts with '$'".to_string(),
			"   2 | var b = $;".to_string(),
		]);
	}

	#[test]
	fn flag_reported_once_per_arrival() {
		let level = Level::from_json_str(r#"{ "name": "F", "layout": "PFO" }"#, None, &TileSymbols::default()).unwrap();
		let mut watch = FlagWatch::new(&level);
		let mut engine = Engine::new(level.initial_grid().unwrap());
		let mut step = |action| {
			engine.cycle(Some(action), &mut NullSink);
			watch.update(engine.grid())
		};
		assert!(step(TileAction::MoveForward));
		assert!(!step(TileAction::Idle));
		// stepping off leaves an empty cell where the flag was
		assert!(!step(TileAction::MoveForward));
		assert!(step(TileAction::MoveBack));
		assert!(!step(TileAction::Idle));
	}
}
